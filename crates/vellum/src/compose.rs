//! # Entity Composer — Ordered Component Creation
//!
//! [`compose`] turns one descriptor into the component set of one entity.
//! The steps always run in the same order, and each may read what earlier
//! steps attached:
//!
//! ```text
//!  1 Dimensions   ← DimensionsStrategy::create_dimensions
//!  2 BoundingBox  ← Dimensions
//!  3 MainItem
//!  4 Transform    ← Dimensions (origin defaults to the centre)
//!  5 Tint
//!  6 ZIndex       (empty layer → "Default")
//!  7 Script       (always, empty)
//!  8 Polygon      only with a shape
//!    ─ DimensionsStrategy::finish_dimensions
//!  9 PhysicsBody  only with a physics record
//! 10 LightBody    only with a light record
//! 11 Shader       only with a non-empty shader name
//! ```
//!
//! The only thing that varies between item kinds is how the dimensions are
//! computed, so that is the one injected piece: a [`DimensionsStrategy`]
//! (see [`variant`](crate::variant)). The sequence itself cannot be
//! overridden.
//!
//! ## Failure
//!
//! A lookup failure (`create_dimensions` or step 11) returns `Err` at once.
//! Components attached before the failure stay on the entity; the caller
//! discards it. An invalid shape skips step 8 only and is reported in
//! [`Composition::skipped`].
//!
//! Composition touches `entity` and nothing else. Linking under a parent is a
//! separate step ([`link`](crate::link::link)), which
//! [`EntityFactory`](crate::factory::EntityFactory) runs right after.

use crate::components::{
    BoundingBox, CustomVariables, Dimensions, EntityType, LightBody, MainItem, PhysicsBody,
    Polygon, Script, Shader, Tint, Transform, ZIndex,
};
use crate::descriptor::ItemDescriptor;
use crate::ecs::{Entity, World};
use crate::error::{Error, Result};
use crate::layer::DEFAULT_LAYER;
use crate::math::Color;
use crate::resource::{ResourceRetriever, require_shader};

/// How one kind of item gets its size.
pub trait DimensionsStrategy {
    /// Step 1. May attach variant-specific components to `entity` (such as a
    /// texture region) on the way.
    fn create_dimensions<R: ResourceRetriever + ?Sized>(
        &self,
        world: &mut World,
        resources: &R,
        entity: Entity,
        item: &ItemDescriptor,
    ) -> Result<Dimensions>;

    /// Runs once `Dimensions` and the optional `Polygon` both exist.
    fn finish_dimensions(&self, _world: &mut World, _entity: Entity) {}
}

/// Result of a successful [`compose`].
#[derive(Debug)]
pub struct Composition {
    pub entity: Entity,
    /// Optional components that were left off because their descriptor
    /// record was invalid.
    pub skipped: Vec<Error>,
}

impl Composition {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Attach the full component set described by `item` to `entity`.
pub fn compose<R, S>(
    world: &mut World,
    resources: &R,
    entity: Entity,
    item: &ItemDescriptor,
    entity_type: EntityType,
    strategy: &S,
) -> Result<Composition>
where
    R: ResourceRetriever + ?Sized,
    S: DimensionsStrategy,
{
    let mut skipped = Vec::new();

    let dimensions = strategy.create_dimensions(world, resources, entity, item)?;
    world.insert(entity, dimensions);
    create_bounding_box(world, entity);
    create_main_item(world, entity, item, entity_type);
    create_transform(world, entity, item);
    world.insert(
        entity,
        Tint {
            color: Color::from_array(item.tint),
        },
    );
    create_z_index(world, entity, item);
    world.insert(entity, Script::default());

    if let Err(err) = create_polygon(world, entity, item) {
        log::warn!("{entity:?}: skipping Polygon: {err}");
        skipped.push(err);
    }
    strategy.finish_dimensions(world, entity);

    if let Some(physics) = &item.physics {
        world.insert(entity, PhysicsBody::from(physics));
    }
    if let Some(light) = &item.light {
        world.insert(entity, LightBody::from(light));
    }
    create_shader(world, resources, entity, item)?;

    log::debug!(
        "composed {entity:?} ({entity_type:?} `{}`): {:?}",
        item.item_identifier,
        world.component_names(entity)
    );
    Ok(Composition { entity, skipped })
}

fn create_bounding_box(world: &mut World, entity: Entity) {
    let bbox = BoundingBox::from_dimensions(world.component::<Dimensions>(entity));
    world.insert(entity, bbox);
}

fn create_main_item(world: &mut World, entity: Entity, item: &ItemDescriptor, entity_type: EntityType) {
    world.insert(
        entity,
        MainItem {
            unique_id: item.unique_id,
            item_identifier: item.item_identifier.clone(),
            library_link: item.library_link.clone(),
            tags: item.tags.iter().cloned().collect(),
            custom_vars: CustomVariables::parse(&item.custom_vars),
            entity_type,
            visible: true,
        },
    );
}

fn create_transform(world: &mut World, entity: Entity, item: &ItemDescriptor) {
    let dimensions = world.component::<Dimensions>(entity);
    let transform = Transform {
        x: item.x,
        y: item.y,
        rotation: item.rotation,
        scale_x: item.scale_x,
        scale_y: item.scale_y,
        origin_x: item.origin_x.unwrap_or(dimensions.width / 2.0),
        origin_y: item.origin_y.unwrap_or(dimensions.height / 2.0),
    };
    world.insert(entity, transform);
}

fn create_z_index(world: &mut World, entity: Entity, item: &ItemDescriptor) {
    let layer_name = if item.layer_name.is_empty() {
        DEFAULT_LAYER.to_string()
    } else {
        item.layer_name.clone()
    };
    world.insert(
        entity,
        ZIndex {
            layer_name,
            z_index: item.z_index,
            layer_index: 0,
            need_reorder: false,
        },
    );
}

fn create_polygon(world: &mut World, entity: Entity, item: &ItemDescriptor) -> Result<()> {
    if let Some(shape) = &item.shape {
        world.insert(entity, Polygon::from_shape(shape)?);
    }
    Ok(())
}

fn create_shader<R: ResourceRetriever + ?Sized>(
    world: &mut World,
    resources: &R,
    entity: Entity,
    item: &ItemDescriptor,
) -> Result<()> {
    let Some(name) = item.shader_name.as_deref().filter(|n| !n.is_empty()) else {
        return Ok(());
    };
    let program = require_shader(resources, name)?;
    world.insert(
        entity,
        Shader {
            shader_name: name.to_string(),
            program,
        },
    );
    Ok(())
}
