//! # Scene Graph Linker
//!
//! [`link`] creates one parent → child edge:
//!
//! ```text
//!   parent                        child
//!   ├─ Node { children: [.., child] }  ◄──►  ParentNode(parent)
//!   ├─ LayerMap ──┐
//!   └─ ZIndex ────┴─ is_visible(parent's layer) ──► MainItem.visible
//! ```
//!
//! Both halves of the edge are written in the same call, and the child's
//! visibility is read from the parent's own layer at that moment. The child's
//! own layer plays no part here; re-deriving visibility per child layer is
//! [`refresh_layer_visibility`](crate::layer::refresh_layer_visibility).

use crate::components::{MainItem, ZIndex};
use crate::ecs::{Entity, Node, ParentNode, World};
use crate::layer::LayerMap;

/// Register `child` as the last child of `parent`.
///
/// A child that already had a parent is detached from it first, so it ends
/// up in exactly one `Node`, once.
///
/// # Panics
///
/// Panics if `parent` lacks `Node`, `LayerMap` or `ZIndex`, if `child` lacks
/// `MainItem`, or if `child` is `parent` or one of its ancestors. The
/// missing components mean the entities were not composed before linking.
pub fn link(world: &mut World, parent: Entity, child: Entity) {
    assert_ne!(parent, child, "Cannot link {parent:?} under itself");
    assert!(
        !is_ancestor(world, child, parent),
        "Cannot link {child:?} under its own descendant {parent:?}"
    );
    assert!(
        world.has::<Node>(parent),
        "Entity {parent:?} is missing component `Node`; only composites can be parents"
    );
    let layer_name = &world.component::<ZIndex>(parent).layer_name;
    let visible = world.component::<LayerMap>(parent).is_visible(layer_name);
    assert!(
        world.has::<MainItem>(child),
        "Entity {child:?} is missing component `MainItem`; compose it before linking"
    );

    if let Some(old) = detach(world, child) {
        log::debug!("relinking {child:?}: {old:?} → {parent:?}");
    }

    world.insert(child, ParentNode(parent));
    world.component_mut::<MainItem>(child).visible = visible;
    world.component_mut::<Node>(parent).children.push(child);

    log::debug!("linked {child:?} under {parent:?} (visible: {visible})");
}

/// Remove both halves of `child`'s parent edge. Returns the old parent.
pub fn detach(world: &mut World, child: Entity) -> Option<Entity> {
    let ParentNode(parent) = world.remove::<ParentNode>(child)?;
    if let Some(node) = world.get_mut::<Node>(parent) {
        node.children.retain(|&c| c != child);
    }
    Some(parent)
}

/// Whether `ancestor` sits somewhere on `entity`'s `ParentNode` chain.
pub fn is_ancestor(world: &World, ancestor: Entity, entity: Entity) -> bool {
    let mut current = parent_of(world, entity);
    while let Some(e) = current {
        if e == ancestor {
            return true;
        }
        current = parent_of(world, e);
    }
    false
}

/// `entity`'s parent, if linked.
pub fn parent_of(world: &World, entity: Entity) -> Option<Entity> {
    world.get::<ParentNode>(entity).map(|p| p.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::EntityType;
    use crate::descriptor::LayerDescriptor;

    fn parent_on_layer(world: &mut World, layer: &str, layers: &[(&str, bool)]) -> Entity {
        let e = world.spawn_empty();
        let layers: Vec<_> = layers
            .iter()
            .map(|&(name, visible)| LayerDescriptor::new(name, visible))
            .collect();
        world.insert(e, Node::default());
        world.insert(e, LayerMap::from_descriptors(&layers));
        world.insert(
            e,
            ZIndex {
                layer_name: layer.into(),
                z_index: 0,
                layer_index: 0,
                need_reorder: false,
            },
        );
        world.insert(e, MainItem::new(EntityType::Composite));
        e
    }

    fn fresh_child(world: &mut World, layer: &str) -> Entity {
        let e = world.spawn_empty();
        world.insert(e, MainItem::new(EntityType::Image));
        world.insert(
            e,
            ZIndex {
                layer_name: layer.into(),
                z_index: 0,
                layer_index: 0,
                need_reorder: false,
            },
        );
        e
    }

    #[test]
    fn visibility_comes_from_parents_own_layer() {
        let mut world = World::new();
        let parent = parent_on_layer(&mut world, "B", &[("A", true), ("B", false)]);
        let existing = fresh_child(&mut world, "A");
        link(&mut world, parent, existing);

        // The child sits on visible layer "A" yet inherits hidden "B".
        let child = fresh_child(&mut world, "A");
        link(&mut world, parent, child);

        assert!(!world.component::<MainItem>(child).visible);
        let children = &world.component::<Node>(parent).children;
        assert_eq!(children, &vec![existing, child]);
        assert_eq!(children.iter().filter(|&&c| c == child).count(), 1);
        assert_eq!(parent_of(&world, child), Some(parent));
    }

    #[test]
    fn visible_parent_layer_shows_child() {
        let mut world = World::new();
        let parent = parent_on_layer(&mut world, "A", &[("A", true), ("B", false)]);
        let child = fresh_child(&mut world, "B");
        link(&mut world, parent, child);
        assert!(world.component::<MainItem>(child).visible);
    }

    #[test]
    fn inheritance_is_point_in_time() {
        let mut world = World::new();
        let parent = parent_on_layer(&mut world, "A", &[("A", true)]);
        let child = fresh_child(&mut world, "A");
        link(&mut world, parent, child);

        world.component_mut::<LayerMap>(parent).set_visible("A", false);
        assert!(world.component::<MainItem>(child).visible);
    }

    #[test]
    fn children_keep_link_order_not_z_order() {
        let mut world = World::new();
        let parent = parent_on_layer(&mut world, "Default", &[]);
        let high = fresh_child(&mut world, "Default");
        world.component_mut::<ZIndex>(high).z_index = 10;
        let low = fresh_child(&mut world, "Default");
        link(&mut world, parent, high);
        link(&mut world, parent, low);
        assert_eq!(world.component::<Node>(parent).children, vec![high, low]);
    }

    #[test]
    fn relinking_moves_the_edge() {
        let mut world = World::new();
        let first = parent_on_layer(&mut world, "Default", &[]);
        let second = parent_on_layer(&mut world, "Default", &[]);
        let child = fresh_child(&mut world, "Default");

        link(&mut world, first, child);
        link(&mut world, second, child);
        link(&mut world, second, child);

        assert!(world.component::<Node>(first).children.is_empty());
        assert_eq!(world.component::<Node>(second).children, vec![child]);
        assert_eq!(parent_of(&world, child), Some(second));

        assert_eq!(detach(&mut world, child), Some(second));
        assert!(world.component::<Node>(second).children.is_empty());
        assert_eq!(detach(&mut world, child), None);
    }

    #[test]
    #[should_panic(expected = "LayerMap")]
    fn parent_without_layer_map_panics() {
        let mut world = World::new();
        let parent = world.spawn_empty();
        world.insert(parent, Node::default());
        world.insert(
            parent,
            ZIndex {
                layer_name: "Default".into(),
                z_index: 0,
                layer_index: 0,
                need_reorder: false,
            },
        );
        let child = fresh_child(&mut world, "Default");
        link(&mut world, parent, child);
    }

    #[test]
    #[should_panic(expected = "MainItem")]
    fn uncomposed_child_panics() {
        let mut world = World::new();
        let parent = parent_on_layer(&mut world, "Default", &[]);
        let child = world.spawn_empty();
        link(&mut world, parent, child);
    }

    #[test]
    #[should_panic(expected = "own descendant")]
    fn linking_an_ancestor_under_its_descendant_panics() {
        let mut world = World::new();
        let top = parent_on_layer(&mut world, "Default", &[]);
        let middle = parent_on_layer(&mut world, "Default", &[]);
        let bottom = parent_on_layer(&mut world, "Default", &[]);
        link(&mut world, top, middle);
        link(&mut world, middle, bottom);
        assert!(is_ancestor(&world, top, bottom));
        assert!(!is_ancestor(&world, bottom, top));

        link(&mut world, bottom, top);
    }
}
