//! # Entity Factory — Building Scene Trees
//!
//! [`EntityFactory`] drives the composer and the linker for whole
//! descriptor trees. For every item:
//!
//! ```text
//! spawn_empty ─► compose(strategy) ─► Node + LayerMap (+ Button) ─► link(parent)
//!                     │                  composites only
//!                     └─ Err ─► despawn, return the error
//! ```
//!
//! A composite is finished and linked before any of its children are
//! created, so each child links against a parent that already has its
//! `Node`, `LayerMap` and `ZIndex`. Children are created images first, then
//! primitives, then nested composites, each group in descriptor order.

use crate::components::{Button, EntityType, ViewPort};
use crate::compose::{DimensionsStrategy, compose};
use crate::descriptor::{
    ColorPrimitiveDescriptor, CompositeDescriptor, ImageDescriptor, ItemDescriptor,
    SceneDescriptor,
};
use crate::ecs::{Entity, Node, World};
use crate::error::{Error, Result};
use crate::layer::LayerMap;
use crate::link::{detach, link};
use crate::resource::ResourceRetriever;
use crate::variant::{CompositeDimensions, ImageDimensions, PrimitiveDimensions};

/// Composites carrying this tag become buttons.
pub const BUTTON_TAG: &str = "button";

/// What [`EntityFactory::load_scene`] built.
#[derive(Debug)]
pub struct SceneLoad {
    pub root: Entity,
    /// Every entity created, in creation order. `entities[0] == root`.
    pub entities: Vec<Entity>,
    /// Optional components left off, per entity.
    pub skipped: Vec<(Entity, Error)>,
}

/// Bookkeeping for one factory call.
#[derive(Debug, Default)]
struct Build {
    entities: Vec<Entity>,
    skipped: Vec<(Entity, Error)>,
}

impl Build {
    /// Undo a failed call: detach and despawn everything it created.
    fn discard(self, world: &mut World) {
        for entity in self.entities.into_iter().rev() {
            detach(world, entity);
            world.despawn(entity);
        }
    }
}

/// Creates linked entities from descriptors.
pub struct EntityFactory<'r, R: ResourceRetriever + ?Sized> {
    resources: &'r R,
}

impl<'r, R: ResourceRetriever + ?Sized> EntityFactory<'r, R> {
    pub fn new(resources: &'r R) -> Self {
        Self { resources }
    }

    /// Build a whole scene under a new root composite.
    ///
    /// `viewport` goes on the root and defines the screen mapping for
    /// pointer input. On error every entity created by this call is
    /// despawned again.
    pub fn load_scene(
        &self,
        world: &mut World,
        scene: &SceneDescriptor,
        viewport: Option<ViewPort>,
    ) -> Result<SceneLoad> {
        let mut build = Build::default();
        match self.build_composite(world, &mut build, None, &scene.composite, viewport) {
            Ok(root) => {
                log::info!(
                    "loaded scene `{}`: {} entities, {} skipped components",
                    scene.scene_name,
                    build.entities.len(),
                    build.skipped.len()
                );
                Ok(SceneLoad {
                    root,
                    entities: build.entities,
                    skipped: build.skipped,
                })
            }
            Err(err) => {
                log::warn!("failed to load scene `{}`: {err}", scene.scene_name);
                build.discard(world);
                Err(err)
            }
        }
    }

    /// Create one image, linked under `parent` if given.
    pub fn create_image(
        &self,
        world: &mut World,
        parent: Option<Entity>,
        image: &ImageDescriptor,
    ) -> Result<Entity> {
        let mut build = Build::default();
        let entity = self.spawn_composed(
            world,
            &mut build,
            &image.item,
            EntityType::Image,
            &ImageDimensions::from(image),
        )?;
        attach(world, parent, entity);
        Ok(entity)
    }

    /// Create one color primitive, linked under `parent` if given.
    pub fn create_primitive(
        &self,
        world: &mut World,
        parent: Option<Entity>,
        primitive: &ColorPrimitiveDescriptor,
    ) -> Result<Entity> {
        let mut build = Build::default();
        let entity = self.spawn_composed(
            world,
            &mut build,
            &primitive.item,
            EntityType::ColorPrimitive,
            &PrimitiveDimensions,
        )?;
        attach(world, parent, entity);
        Ok(entity)
    }

    /// Create a composite and its whole subtree, linked under `parent` if
    /// given. On error the partial subtree is removed again.
    pub fn create_composite(
        &self,
        world: &mut World,
        parent: Option<Entity>,
        composite: &CompositeDescriptor,
    ) -> Result<Entity> {
        let mut build = Build::default();
        let result = self.build_composite(world, &mut build, parent, composite, None);
        if result.is_err() {
            build.discard(world);
        }
        result
    }

    fn build_composite(
        &self,
        world: &mut World,
        build: &mut Build,
        parent: Option<Entity>,
        composite: &CompositeDescriptor,
        viewport: Option<ViewPort>,
    ) -> Result<Entity> {
        let entity = self.spawn_composed(
            world,
            build,
            &composite.item,
            EntityType::Composite,
            &CompositeDimensions::from(composite),
        )?;
        world.insert(entity, Node::default());
        world.insert(entity, LayerMap::from_descriptors(&composite.layers));
        if composite.item.tags.iter().any(|t| t == BUTTON_TAG) {
            world.insert(entity, Button::default());
        }
        if let Some(viewport) = viewport {
            world.insert(entity, viewport);
        }
        attach(world, parent, entity);

        let items = &composite.composite;
        for image in &items.images {
            let child = self.spawn_composed(
                world,
                build,
                &image.item,
                EntityType::Image,
                &ImageDimensions::from(image),
            )?;
            link(world, entity, child);
        }
        for primitive in &items.primitives {
            let child = self.spawn_composed(
                world,
                build,
                &primitive.item,
                EntityType::ColorPrimitive,
                &PrimitiveDimensions,
            )?;
            link(world, entity, child);
        }
        for nested in &items.composites {
            self.build_composite(world, build, Some(entity), nested, None)?;
        }
        Ok(entity)
    }

    /// Spawn and compose one entity. A failed composition despawns it.
    fn spawn_composed<S: DimensionsStrategy>(
        &self,
        world: &mut World,
        build: &mut Build,
        item: &ItemDescriptor,
        entity_type: EntityType,
        strategy: &S,
    ) -> Result<Entity> {
        let entity = world.spawn_empty();
        match compose(world, self.resources, entity, item, entity_type, strategy) {
            Ok(composition) => {
                build.entities.push(entity);
                build
                    .skipped
                    .extend(composition.skipped.into_iter().map(|err| (entity, err)));
                Ok(entity)
            }
            Err(err) => {
                log::warn!("discarding {entity:?} (`{}`): {err}", item.item_identifier);
                world.despawn(entity);
                Err(err)
            }
        }
    }
}

fn attach(world: &mut World, parent: Option<Entity>, entity: Entity) {
    if let Some(parent) = parent {
        link(world, parent, entity);
    }
}
