//! # Layers — Named Visibility Groups
//!
//! A composite owns a [`LayerMap`]: its layers in draw order, each with a
//! visibility flag. Each child names its layer in [`ZIndex::layer_name`].
//!
//! ```text
//! LayerMap of composite C        children of C (Node order after layer_system)
//! ┌───┬────────────┬─────────┐   ┌────────────────────────────────────────┐
//! │ 0 │ Default    │ visible │   │ e4 (Default, z 0)  e2 (Default, z 3)   │
//! │ 1 │ normal     │ visible │   │ e5 (normal,  z 0)                      │
//! │ 2 │ pressed    │ hidden  │   │ e6 (pressed, z 0)                      │
//! └───┴────────────┴─────────┘   └────────────────────────────────────────┘
//! ```
//!
//! Visibility is derived, not bound. The linker copies one lookup into
//! [`MainItem::visible`] when the edge is made; after that, a change to the
//! map shows up only through [`refresh_layer_visibility`] or the button
//! reconciler.

use crate::components::{MainItem, ZIndex};
use crate::descriptor::LayerDescriptor;
use crate::ecs::{Entity, Node, World};

/// Layer new items land on when they don't name one.
pub const DEFAULT_LAYER: &str = "Default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerItem {
    pub name: String,
    pub is_visible: bool,
    pub is_locked: bool,
}

impl LayerItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_visible: true,
            is_locked: false,
        }
    }
}

impl From<&LayerDescriptor> for LayerItem {
    fn from(d: &LayerDescriptor) -> Self {
        Self {
            name: d.name.clone(),
            is_visible: d.is_visible,
            is_locked: d.is_locked,
        }
    }
}

/// Ordered layers of one composite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerMap {
    layers: Vec<LayerItem>,
}

impl LayerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from descriptors. An empty list yields just [`DEFAULT_LAYER`].
    pub fn from_descriptors(layers: &[LayerDescriptor]) -> Self {
        let mut map = Self {
            layers: layers.iter().map(LayerItem::from).collect(),
        };
        if map.layers.is_empty() {
            map.add_layer(LayerItem::new(DEFAULT_LAYER));
        }
        map
    }

    /// Append a layer, replacing any layer with the same name in place.
    pub fn add_layer(&mut self, layer: LayerItem) {
        match self.layers.iter_mut().find(|l| l.name == layer.name) {
            Some(existing) => *existing = layer,
            None => self.layers.push(layer),
        }
    }

    /// Unknown layers count as visible.
    pub fn is_visible(&self, name: &str) -> bool {
        self.get(name).is_none_or(|l| l.is_visible)
    }

    /// Returns `false` if there is no such layer.
    pub fn set_visible(&mut self, name: &str, visible: bool) -> bool {
        match self.layers.iter_mut().find(|l| l.name == name) {
            Some(layer) => {
                layer.is_visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&LayerItem> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.name == name)
    }

    pub fn layers(&self) -> &[LayerItem] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Keep every composite's children in draw order.
///
/// Refreshes each child's [`ZIndex::layer_index`] (children on an unknown
/// layer sort after all known ones), stably sorts the children by
/// `(layer_index, z_index)` and clears `need_reorder`. Never changes
/// visibility.
pub fn layer_system(world: &mut World) {
    for composite in world.entities_with::<LayerMap>() {
        let Some(node) = world.get::<Node>(composite) else {
            continue;
        };
        let mut children = node.children.clone();
        let map = world.component::<LayerMap>(composite).clone();

        for &child in &children {
            if let Some(z) = world.get_mut::<ZIndex>(child) {
                z.layer_index = map.index_of(&z.layer_name).unwrap_or(map.len());
                z.need_reorder = false;
            }
        }

        children.sort_by_key(|&child| {
            world
                .get::<ZIndex>(child)
                .map_or((usize::MAX, i32::MAX), |z| (z.layer_index, z.z_index))
        });
        world.component_mut::<Node>(composite).children = children;
    }
}

/// Re-derive the visibility of `composite`'s direct children from each
/// child's own layer in `composite`'s [`LayerMap`].
///
/// Does nothing if `composite` has no `Node` or `LayerMap`.
pub fn refresh_layer_visibility(world: &mut World, composite: Entity) {
    let (Some(node), Some(map)) = (world.get::<Node>(composite), world.get::<LayerMap>(composite))
    else {
        return;
    };
    let updates: Vec<(Entity, bool)> = node
        .children
        .iter()
        .filter_map(|&child| {
            let z = world.get::<ZIndex>(child)?;
            Some((child, map.is_visible(&z.layer_name)))
        })
        .collect();

    for (child, visible) in updates {
        if let Some(item) = world.get_mut::<MainItem>(child) {
            item.visible = visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::EntityType;

    fn child(world: &mut World, parent: Entity, layer: &str, z_index: i32) -> Entity {
        let e = world.spawn_empty();
        world.insert(e, MainItem::new(EntityType::Image));
        world.insert(
            e,
            ZIndex {
                layer_name: layer.into(),
                z_index,
                layer_index: 0,
                need_reorder: true,
            },
        );
        world.component_mut::<Node>(parent).children.push(e);
        e
    }

    fn composite(world: &mut World, layers: &[LayerDescriptor]) -> Entity {
        let e = world.spawn_empty();
        world.insert(e, Node::default());
        world.insert(e, LayerMap::from_descriptors(layers));
        e
    }

    #[test]
    fn empty_layer_list_gets_default() {
        let map = LayerMap::from_descriptors(&[]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.index_of(DEFAULT_LAYER), Some(0));
        assert!(map.is_visible("never-declared"));
    }

    #[test]
    fn add_layer_replaces_by_name() {
        let mut map = LayerMap::new();
        map.add_layer(LayerItem::new("a"));
        map.add_layer(LayerItem::new("b"));
        map.add_layer(LayerItem {
            name: "a".into(),
            is_visible: false,
            is_locked: true,
        });
        assert_eq!(map.len(), 2);
        assert_eq!(map.index_of("a"), Some(0));
        assert!(!map.is_visible("a"));
        assert!(map.set_visible("a", true));
        assert!(!map.set_visible("zzz", true));
    }

    #[test]
    fn layer_system_sorts_by_layer_then_z() {
        let mut world = World::new();
        let root = composite(
            &mut world,
            &[
                LayerDescriptor::new("back", true),
                LayerDescriptor::new("front", true),
            ],
        );
        let a = child(&mut world, root, "front", 0);
        let b = child(&mut world, root, "back", 5);
        let c = child(&mut world, root, "back", 1);
        let d = child(&mut world, root, "back", 5);
        let stray = child(&mut world, root, "nowhere", -10);

        layer_system(&mut world);

        // Equal keys keep link order (b before d).
        assert_eq!(world.component::<Node>(root).children, vec![c, b, d, a, stray]);
        assert_eq!(world.component::<ZIndex>(a).layer_index, 1);
        assert_eq!(world.component::<ZIndex>(stray).layer_index, 2);
        assert!(!world.component::<ZIndex>(b).need_reorder);
        assert!(world.component::<MainItem>(a).visible);
    }

    #[test]
    fn refresh_uses_each_childs_own_layer() {
        let mut world = World::new();
        let root = composite(
            &mut world,
            &[
                LayerDescriptor::new("shown", true),
                LayerDescriptor::new("hidden", false),
            ],
        );
        let shown = child(&mut world, root, "shown", 0);
        let hidden = child(&mut world, root, "hidden", 0);

        refresh_layer_visibility(&mut world, root);
        assert!(world.component::<MainItem>(shown).visible);
        assert!(!world.component::<MainItem>(hidden).visible);

        world.component_mut::<LayerMap>(root).set_visible("hidden", true);
        refresh_layer_visibility(&mut world, root);
        assert!(world.component::<MainItem>(hidden).visible);
    }
}
