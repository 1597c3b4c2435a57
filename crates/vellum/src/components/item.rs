//! Identity, ordering and appearance components shared by every entity.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::math::Color;

/// What kind of descriptor an entity was composed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Composite,
    Image,
    ColorPrimitive,
}

/// Identity and bookkeeping for one scene item.
///
/// `visible` starts `true` and is overwritten once by the linker. After that
/// only the button reconciler and explicit layer refreshes change it.
#[derive(Debug, Clone, PartialEq)]
pub struct MainItem {
    pub unique_id: u32,
    pub item_identifier: String,
    pub library_link: String,
    pub tags: HashSet<String>,
    pub custom_vars: CustomVariables,
    pub entity_type: EntityType,
    pub visible: bool,
}

impl MainItem {
    pub fn new(entity_type: EntityType) -> Self {
        Self {
            unique_id: 0,
            item_identifier: String::new(),
            library_link: String::new(),
            tags: HashSet::new(),
            custom_vars: CustomVariables::default(),
            entity_type,
            visible: true,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// User key/value pairs, serialized as `key:value;key2:value2`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomVariables {
    vars: BTreeMap<String, String>,
}

impl CustomVariables {
    /// Parse a `key:value;...` string. Empty entries and entries without a
    /// `:` are ignored; a repeated key keeps its last value.
    pub fn parse(source: &str) -> Self {
        let vars = source
            .split(';')
            .filter_map(|pair| pair.split_once(':'))
            .filter(|(key, _)| !key.is_empty())
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self { vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn get_f32(&self, key: &str) -> Option<f32> {
        self.get(key)?.trim().parse().ok()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Serialize back to `key:value;...`, keys in sorted order.
    pub fn to_var_string(&self) -> String {
        self.vars
            .iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect::<Vec<_>>()
            .join(";")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tint {
    pub color: Color,
}

/// Layer membership and draw order within the parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZIndex {
    /// Never empty once composed.
    pub layer_name: String,
    pub z_index: i32,
    /// Position of `layer_name` in the parent's layer list. Maintained by
    /// [`layer_system`](crate::layer::layer_system).
    pub layer_index: usize,
    pub need_reorder: bool,
}

impl ZIndex {
    pub fn set_z_index(&mut self, z_index: i32) {
        if self.z_index != z_index {
            self.z_index = z_index;
            self.need_reorder = true;
        }
    }
}

/// Attachment point for scripts. Always present on composed entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub scripts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_vars_parse_and_print() {
        let vars = CustomVariables::parse("speed:2.5;name:door;;broken;:x");
        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get("name"), Some("door"));
        assert_eq!(vars.get_f32("speed"), Some(2.5));
        assert_eq!(vars.to_var_string(), "name:door;speed:2.5");
        assert!(CustomVariables::parse("").is_empty());
    }

    #[test]
    fn z_index_change_requests_reorder() {
        let mut z = ZIndex {
            layer_name: "Default".into(),
            z_index: 3,
            layer_index: 0,
            need_reorder: false,
        };
        z.set_z_index(3);
        assert!(!z.need_reorder);
        z.set_z_index(1);
        assert!(z.need_reorder);
    }
}
