// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recursive overlay merge of configuration trees.
//!
//! When two mappings meet, they are merged key by key. Every other pairing is
//! resolved in favour of the overlay: scalars, sequences and nulls replace the
//! base value wholesale, and so does a mapping that lands on a non-mapping (or
//! the other way round).

use crate::domain::config_value::{ConfigMap, ConfigValue};
use indexmap::map::Entry;

/// Merges `overlay` into `base`, with `overlay` taking precedence.
///
/// Keys already in `base` keep their position; keys only present in `overlay`
/// are appended in overlay order.
///
/// # Examples
///
/// ```
/// use confwire::config_map;
/// use confwire::domain::{merge_maps, ConfigValue};
///
/// let base = config_map! { "keyA" => "valueA", "keyB" => "valueX" };
/// let overlay = config_map! { "keyB" => "valueB" };
///
/// let merged = merge_maps(base, overlay);
/// assert_eq!(merged["keyA"], ConfigValue::from("valueA"));
/// assert_eq!(merged["keyB"], ConfigValue::from("valueB"));
/// ```
pub fn merge_maps(mut base: ConfigMap, overlay: ConfigMap) -> ConfigMap {
    for (key, overlay_value) in overlay {
        match base.entry(key) {
            Entry::Occupied(mut slot) => {
                let base_value = std::mem::replace(slot.get_mut(), ConfigValue::Null);
                *slot.get_mut() = merge_values(base_value, overlay_value);
            }
            Entry::Vacant(slot) => {
                slot.insert(overlay_value);
            }
        }
    }
    base
}

/// Merges two values, with `overlay` taking precedence.
pub fn merge_values(base: ConfigValue, overlay: ConfigValue) -> ConfigValue {
    match (base, overlay) {
        (ConfigValue::Mapping(base_map), ConfigValue::Mapping(overlay_map)) => {
            ConfigValue::Mapping(merge_maps(base_map, overlay_map))
        }
        (_, overlay) => overlay,
    }
}

/// Merges a list of mappings in order, later ones taking precedence.
pub fn merge_all(maps: impl IntoIterator<Item = ConfigMap>) -> ConfigMap {
    maps.into_iter().fold(ConfigMap::new(), merge_maps)
}
