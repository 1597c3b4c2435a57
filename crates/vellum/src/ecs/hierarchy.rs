//! # Entity Hierarchies — Parent/Child Edges
//!
//! One edge of the scene graph lives in two components: [`ParentNode`] on the
//! child and an entry in the parent's [`Node::children`]. Only the linker
//! ([`link`](crate::link::link)) creates edges, and it always writes both
//! halves together.
//!
//! ## Coordinate spaces
//!
//! ```text
//!   screen (pixels, y down)
//!        │  ViewPort::unproject
//!        ▼
//!   scene space ── the ViewPort entity's local space
//!        │  Transform::local_matrix, parent → child
//!        ▼
//!   entity local space ── Dimensions live here, (0,0) bottom-left
//! ```
//!
//! [`local_to_world`] composes local matrices up the [`ParentNode`] chain and
//! stops at the first entity that carries a [`ViewPort`]; that entity's own
//! transform is the camera and is not applied. [`world_to_local`] runs the
//! other way and takes screen coordinates when a viewport is found.

use crate::components::{BoundingBox, Dimensions, Transform, ViewPort};
use crate::ecs::entity::Entity;
use crate::ecs::world::World;
use crate::math::{Affine2, Rect, Vec2};

/// Marks an entity as a child of another entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentNode(pub Entity);

/// The ordered children of a composite. Order is link order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub children: Vec<Entity>,
}

impl Node {
    pub fn contains(&self, entity: Entity) -> bool {
        self.children.contains(&entity)
    }
}

/// Transform from `entity`'s local space into scene space.
pub fn local_to_world(world: &World, entity: Entity) -> Affine2 {
    let mut matrix = Affine2::IDENTITY;
    let mut current = Some(entity);
    while let Some(e) = current {
        if world.has::<ViewPort>(e) {
            break;
        }
        if let Some(transform) = world.get::<Transform>(e) {
            matrix = transform.local_matrix() * matrix;
        }
        current = world.get::<ParentNode>(e).map(|p| p.0);
    }
    matrix
}

/// The first [`ViewPort`] found walking up from `entity`, itself included.
pub fn find_viewport(world: &World, entity: Entity) -> Option<&ViewPort> {
    let mut current = Some(entity);
    while let Some(e) = current {
        if let Some(viewport) = world.get::<ViewPort>(e) {
            return Some(viewport);
        }
        current = world.get::<ParentNode>(e).map(|p| p.0);
    }
    None
}

/// Map `point` into `entity`'s local space.
///
/// With a [`ViewPort`] up the chain, `point` is in screen pixels; without
/// one it is already in scene space.
pub fn world_to_local(world: &World, entity: Entity, point: Vec2) -> Vec2 {
    let scene_point = match find_viewport(world, entity) {
        Some(viewport) => viewport.unproject(point),
        None => point,
    };
    local_to_world(world, entity)
        .inverse()
        .transform_point2(scene_point)
}

/// Refresh every [`BoundingBox`] with the scene-space corners of its
/// entity's [`Dimensions`].
pub fn bounding_box_system(world: &mut World) {
    for entity in world.entities_with::<BoundingBox>() {
        let Some(dimensions) = world.get::<Dimensions>(entity) else {
            continue;
        };
        let local = dimensions
            .bound_box
            .unwrap_or_else(|| Rect::from_size(dimensions.width, dimensions.height));
        let matrix = local_to_world(world, entity);
        let corners = local.corners().map(|c| matrix.transform_point2(c));
        let bbox = world.component_mut::<BoundingBox>(entity);
        bbox.corners = corners;
        bbox.rect = Rect::from_points(corners).unwrap_or_default();
    }
}
