//! # World — The Component Store
//!
//! The [`World`] owns entity slots, one sparse column per component type, and
//! global resources.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ World                                                │
//! │                                                      │
//! │  allocator: EntityAllocator (generational slots)     │
//! │                                                      │
//! │  columns: HashMap<TypeId, ComponentColumn>           │
//! │    one sparse column per component type              │
//! │                                                      │
//! │  resources: HashMap<TypeId, Box<dyn Any>>            │
//! │    singletons: input state, focus token, ...         │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract used by the composer
//!
//! - [`insert`](World::insert) attaches a component; attaching a second value
//!   of the same type replaces the first, so a kind is present at most once.
//! - [`get`](World::get) / [`get_mut`](World::get_mut) return `None` for an
//!   absent component. [`component`](World::component) /
//!   [`component_mut`](World::component_mut) panic instead, for call sites
//!   where absence means an earlier step was skipped.
//! - [`has_aspect`](World::has_aspect) checks a whole tuple of types at once.
//! - [`entities_with`](World::entities_with) lists owners in ascending slot
//!   order, which systems rely on for a stable iteration order.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use super::component::ComponentColumn;
use super::entity::{Entity, EntityAllocator};

/// The central container for entities, components and resources.
pub struct World {
    allocator: EntityAllocator,
    columns: HashMap<TypeId, ComponentColumn>,
    resources: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl World {
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            columns: HashMap::new(),
            resources: HashMap::new(),
        }
    }

    // ── Resources ────────────────────────────────────────────────────

    /// Insert a resource, replacing any existing one of the same type.
    pub fn insert_resource<T: 'static + Send + Sync>(&mut self, value: T) {
        self.resources.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// # Panics
    ///
    /// Panics if the resource hasn't been inserted.
    pub fn resource<T: 'static + Send + Sync>(&self) -> &T {
        self.get_resource::<T>().unwrap_or_else(|| {
            panic!(
                "Resource `{}` not found. Did you forget to insert it?",
                std::any::type_name::<T>()
            )
        })
    }

    /// # Panics
    ///
    /// Panics if the resource hasn't been inserted.
    pub fn resource_mut<T: 'static + Send + Sync>(&mut self) -> &mut T {
        self.get_resource_mut::<T>().unwrap_or_else(|| {
            panic!(
                "Resource `{}` not found. Did you forget to insert it?",
                std::any::type_name::<T>()
            )
        })
    }

    pub fn get_resource<T: 'static + Send + Sync>(&self) -> Option<&T> {
        self.resources
            .get(&TypeId::of::<T>())
            .and_then(|r| r.downcast_ref::<T>())
    }

    pub fn get_resource_mut<T: 'static + Send + Sync>(&mut self) -> Option<&mut T> {
        self.resources
            .get_mut(&TypeId::of::<T>())
            .and_then(|r| r.downcast_mut::<T>())
    }

    pub fn has_resource<T: 'static + Send + Sync>(&self) -> bool {
        self.resources.contains_key(&TypeId::of::<T>())
    }

    /// Take a resource out of the world. Pair with
    /// [`insert_resource`](Self::insert_resource) to borrow a resource and the
    /// world at the same time.
    pub fn resource_remove<T: 'static + Send + Sync>(&mut self) -> Option<T> {
        self.resources
            .remove(&TypeId::of::<T>())
            .and_then(|r| r.downcast::<T>().ok())
            .map(|b| *b)
    }

    // ── Entities ─────────────────────────────────────────────────────

    /// Allocate an entity with no components.
    pub fn spawn_empty(&mut self) -> Entity {
        self.allocator.allocate()
    }

    /// Drop every component of `entity` and free its slot.
    ///
    /// Returns `false` if the handle was already stale. Hierarchy edges that
    /// point at the entity are left to the caller.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.allocator.is_alive(entity) {
            return false;
        }
        for column in self.columns.values_mut() {
            column.remove(entity.index);
        }
        self.allocator.deallocate(entity)
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
    }

    pub fn entity_count(&self) -> usize {
        self.allocator.alive_count()
    }

    // ── Per-Entity Component Access ──────────────────────────────────

    /// Attach a component. An existing component of the same type is
    /// replaced and returned.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not alive.
    pub fn insert<T: 'static + Send + Sync>(&mut self, entity: Entity, component: T) -> Option<T> {
        assert!(
            self.allocator.is_alive(entity),
            "Cannot insert component `{}` on dead entity {:?}",
            std::any::type_name::<T>(),
            entity
        );
        self.columns
            .entry(TypeId::of::<T>())
            .or_insert_with(|| ComponentColumn::new(std::any::type_name::<T>()))
            .insert(entity.index, Box::new(component))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|b| *b)
    }

    /// Detach a component, returning it if it was present.
    pub fn remove<T: 'static + Send + Sync>(&mut self, entity: Entity) -> Option<T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.columns
            .get_mut(&TypeId::of::<T>())?
            .remove(entity.index)
            .and_then(|old| old.downcast::<T>().ok())
            .map(|b| *b)
    }

    /// Returns `None` if the entity is dead or doesn't have the component.
    pub fn get<T: 'static + Send + Sync>(&self, entity: Entity) -> Option<&T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.columns.get(&TypeId::of::<T>())?.get::<T>(entity.index)
    }

    /// Returns `None` if the entity is dead or doesn't have the component.
    pub fn get_mut<T: 'static + Send + Sync>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.columns
            .get_mut(&TypeId::of::<T>())?
            .get_mut::<T>(entity.index)
    }

    /// Like [`get`](Self::get), for components an earlier step must have
    /// attached.
    ///
    /// # Panics
    ///
    /// Panics if the component is missing.
    pub fn component<T: 'static + Send + Sync>(&self, entity: Entity) -> &T {
        self.get::<T>(entity)
            .unwrap_or_else(|| missing_component::<T>(entity))
    }

    /// Like [`get_mut`](Self::get_mut), for components an earlier step must
    /// have attached.
    ///
    /// # Panics
    ///
    /// Panics if the component is missing.
    pub fn component_mut<T: 'static + Send + Sync>(&mut self, entity: Entity) -> &mut T {
        self.get_mut::<T>(entity)
            .unwrap_or_else(|| missing_component::<T>(entity))
    }

    pub fn has<T: 'static + Send + Sync>(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
            && self
                .columns
                .get(&TypeId::of::<T>())
                .is_some_and(|c| c.contains(entity.index))
    }

    /// Check that `entity` carries every component type in the tuple `A`.
    ///
    /// ```ignore
    /// if world.has_aspect::<(Node, LayerMap, ZIndex)>(parent) { ... }
    /// ```
    pub fn has_aspect<A: Aspect>(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
            && A::type_ids().iter().all(|tid| {
                self.columns
                    .get(tid)
                    .is_some_and(|c| c.contains(entity.index))
            })
    }

    /// All entities that carry a `T`, in ascending slot order.
    pub fn entities_with<T: 'static + Send + Sync>(&self) -> Vec<Entity> {
        let Some(column) = self.columns.get(&TypeId::of::<T>()) else {
            return Vec::new();
        };
        column
            .indices()
            .filter_map(|index| self.live_entity(index))
            .collect()
    }

    /// Short type names of every component attached to `entity`, sorted.
    pub fn component_names(&self, entity: Entity) -> Vec<&'static str> {
        if !self.allocator.is_alive(entity) {
            return Vec::new();
        }
        let mut names: Vec<_> = self
            .columns
            .values()
            .filter(|c| c.contains(entity.index))
            .map(|c| short_type_name(c.type_name()))
            .collect();
        names.sort_unstable();
        names
    }

    /// Columns are cleared on despawn, so an occupied slot belongs to the
    /// slot's current generation.
    fn live_entity(&self, index: u32) -> Option<Entity> {
        self.allocator.current(index)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn missing_component<T>(entity: Entity) -> ! {
    panic!(
        "Entity {:?} is missing component `{}`; was it composed in order?",
        entity,
        std::any::type_name::<T>()
    )
}

fn short_type_name(full: &'static str) -> &'static str {
    full.rsplit("::").next().unwrap_or(full)
}

// ── Aspects ──────────────────────────────────────────────────────────────

/// A set of component types, checked together by
/// [`World::has_aspect`]. Implemented for tuples of up to eight types.
pub trait Aspect {
    fn type_ids() -> Vec<TypeId>;
}

macro_rules! impl_aspect_tuple {
    ($($C:ident),+) => {
        impl<$($C: 'static + Send + Sync),+> Aspect for ($($C,)+) {
            fn type_ids() -> Vec<TypeId> {
                vec![$(TypeId::of::<$C>()),+]
            }
        }
    };
}

impl_aspect_tuple!(A);
impl_aspect_tuple!(A, B);
impl_aspect_tuple!(A, B, C);
impl_aspect_tuple!(A, B, C, D);
impl_aspect_tuple!(A, B, C, D, E);
impl_aspect_tuple!(A, B, C, D, E, F);
impl_aspect_tuple!(A, B, C, D, E, F, G);
impl_aspect_tuple!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Position(f32, f32);

    #[derive(Debug, Clone, PartialEq)]
    struct Label(String);

    struct Score(u32);

    #[test]
    fn insert_get_remove() {
        let mut world = World::new();
        let e = world.spawn_empty();
        assert!(world.insert(e, Position(1.0, 2.0)).is_none());
        assert_eq!(world.get::<Position>(e), Some(&Position(1.0, 2.0)));
        assert_eq!(world.remove::<Position>(e), Some(Position(1.0, 2.0)));
        assert!(world.get::<Position>(e).is_none());
        assert!(world.remove::<Position>(e).is_none());
    }

    #[test]
    fn insert_twice_replaces() {
        let mut world = World::new();
        let e = world.spawn_empty();
        world.insert(e, Label("a".into()));
        let old = world.insert(e, Label("b".into()));
        assert_eq!(old, Some(Label("a".into())));
        assert_eq!(world.component::<Label>(e).0, "b");
        assert_eq!(world.component_names(e), vec!["Label"]);
    }

    #[test]
    fn despawn_drops_components_and_invalidates_handle() {
        let mut world = World::new();
        let e = world.spawn_empty();
        world.insert(e, Position(0.0, 0.0));
        assert!(world.despawn(e));
        assert!(!world.despawn(e));
        assert!(!world.is_alive(e));
        assert!(world.get::<Position>(e).is_none());

        // The recycled slot starts clean.
        let reused = world.spawn_empty();
        assert_eq!(reused.index(), e.index());
        assert!(world.get::<Position>(reused).is_none());
        assert!(world.get::<Position>(e).is_none());
    }

    #[test]
    fn aspect_requires_every_type() {
        let mut world = World::new();
        let e = world.spawn_empty();
        world.insert(e, Position(0.0, 0.0));
        assert!(world.has_aspect::<(Position,)>(e));
        assert!(!world.has_aspect::<(Position, Label)>(e));
        world.insert(e, Label("x".into()));
        assert!(world.has_aspect::<(Position, Label)>(e));
        assert!(world.has::<Label>(e));
    }

    #[test]
    fn entities_with_is_in_slot_order() {
        let mut world = World::new();
        let a = world.spawn_empty();
        let b = world.spawn_empty();
        let c = world.spawn_empty();
        world.insert(c, Score(3));
        world.insert(a, Score(1));
        world.insert(b, Label("skip".into()));
        assert_eq!(world.entities_with::<Score>(), vec![a, c]);
        assert!(world.entities_with::<Position>().is_empty());
    }

    #[test]
    fn resources_round_trip() {
        let mut world = World::new();
        world.insert_resource(Score(10));
        world.resource_mut::<Score>().0 += 1;
        assert_eq!(world.resource::<Score>().0, 11);
        let taken = world.resource_remove::<Score>().unwrap();
        assert_eq!(taken.0, 11);
        assert!(!world.has_resource::<Score>());
    }

    #[test]
    #[should_panic(expected = "Resource")]
    fn missing_resource_panics() {
        let world = World::new();
        let _ = world.resource::<Score>();
    }

    #[test]
    #[should_panic(expected = "missing component")]
    fn missing_component_panics() {
        let mut world = World::new();
        let e = world.spawn_empty();
        let _ = world.component::<Label>(e);
    }

    #[test]
    #[should_panic(expected = "dead entity")]
    fn insert_on_dead_entity_panics() {
        let mut world = World::new();
        let e = world.spawn_empty();
        world.despawn(e);
        world.insert(e, Score(0));
    }
}
