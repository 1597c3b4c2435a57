//! # Dimension Strategies
//!
//! One [`DimensionsStrategy`] per item kind:
//!
//! - [`ImageDimensions`]: size from an atlas region, scaled for the loaded
//!   resolution and converted to world units. Binds a `.normal` companion
//!   region when one exists.
//! - [`CompositeDimensions`]: size straight from the composite descriptor.
//! - [`PrimitiveDimensions`]: size from the extents of the item's shape.

use crate::components::{BoundingBox, Dimensions, NormalMapRendering, Polygon, TextureRegion};
use crate::compose::DimensionsStrategy;
use crate::descriptor::{CompositeDescriptor, ImageDescriptor, ItemDescriptor};
use crate::ecs::{Entity, World};
use crate::error::Result;
use crate::math::Rect;
use crate::resource::{RegionHandle, ResourceRetriever, require_region};

/// Suffix of a region's normal map in the atlas.
pub const NORMAL_MAP_SUFFIX: &str = ".normal";

/// Sizes an image from its atlas region.
///
/// ```text
/// width  = region.width  * multiplier / pixel_to_world
/// height = region.height * multiplier / pixel_to_world
/// ```
///
/// Also attaches the [`TextureRegion`], and adds or removes
/// [`NormalMapRendering`] depending on whether `<name>.normal` exists.
/// With `is_polygon` set and a [`Polygon`] composed, the polygon's extents
/// replace the region box once step 8 has run.
#[derive(Debug, Clone, Copy)]
pub struct ImageDimensions<'a> {
    pub image_name: &'a str,
    pub is_polygon: bool,
}

impl<'a> From<&'a ImageDescriptor> for ImageDimensions<'a> {
    fn from(image: &'a ImageDescriptor) -> Self {
        Self {
            image_name: &image.image_name,
            is_polygon: image.is_polygon,
        }
    }
}

impl DimensionsStrategy for ImageDimensions<'_> {
    fn create_dimensions<R: ResourceRetriever + ?Sized>(
        &self,
        world: &mut World,
        resources: &R,
        entity: Entity,
        _item: &ItemDescriptor,
    ) -> Result<Dimensions> {
        let diffuse = require_region(resources, self.image_name)?;
        let normal_name = format!("{}{NORMAL_MAP_SUFFIX}", self.image_name);
        let region = if resources.has_texture_region(&normal_name) {
            let normal = require_region(resources, &normal_name)?;
            world.insert(entity, NormalMapRendering);
            RegionHandle::WithNormal { diffuse, normal }
        } else {
            world.remove::<NormalMapRendering>(entity);
            RegionHandle::Single(diffuse)
        };

        let project = resources.project_info();
        let multiplier = resources
            .loaded_resolution()
            .multiplier(&project.original_resolution);
        let scale = multiplier / project.pixel_to_world;

        world.insert(
            entity,
            TextureRegion {
                region_name: self.image_name.to_string(),
                region,
                is_polygon: self.is_polygon,
            },
        );
        Ok(Dimensions::new(
            diffuse.width as f32 * scale,
            diffuse.height as f32 * scale,
        ))
    }

    fn finish_dimensions(&self, world: &mut World, entity: Entity) {
        if self.is_polygon {
            apply_polygon_bounds(world, entity);
        }
    }
}

/// Sizes a composite from its declared width and height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeDimensions {
    pub width: f32,
    pub height: f32,
}

impl From<&CompositeDescriptor> for CompositeDimensions {
    fn from(composite: &CompositeDescriptor) -> Self {
        Self {
            width: composite.width,
            height: composite.height,
        }
    }
}

impl DimensionsStrategy for CompositeDimensions {
    fn create_dimensions<R: ResourceRetriever + ?Sized>(
        &self,
        _world: &mut World,
        _resources: &R,
        _entity: Entity,
        _item: &ItemDescriptor,
    ) -> Result<Dimensions> {
        Ok(Dimensions::new(self.width, self.height))
    }
}

/// Sizes a color primitive from its shape. No shape means zero size.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveDimensions;

impl DimensionsStrategy for PrimitiveDimensions {
    fn create_dimensions<R: ResourceRetriever + ?Sized>(
        &self,
        _world: &mut World,
        _resources: &R,
        _entity: Entity,
        item: &ItemDescriptor,
    ) -> Result<Dimensions> {
        let extents = item
            .shape
            .as_ref()
            .and_then(|shape| Rect::from_points(shape.polygons.iter().flatten().copied()));
        Ok(match extents {
            Some(rect) => Dimensions::new(rect.width(), rect.height()),
            None => Dimensions::new(0.0, 0.0),
        })
    }

    fn finish_dimensions(&self, world: &mut World, entity: Entity) {
        apply_polygon_bounds(world, entity);
    }
}

/// Replace the box bounds with the polygon outline, if a polygon was
/// composed, and refresh the placeholder bounding box to match.
fn apply_polygon_bounds(world: &mut World, entity: Entity) {
    let Some(polygon) = world.get::<Polygon>(entity).cloned() else {
        return;
    };
    let dimensions = world.component_mut::<Dimensions>(entity);
    dimensions.set_polygon(&polygon);
    let bbox = BoundingBox::from_dimensions(dimensions);
    world.insert(entity, bbox);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{EntityType, Transform};
    use crate::compose::compose;
    use crate::descriptor::ShapeDescriptor;
    use crate::math::Vec2;
    use crate::resource::{ProjectInfo, Resolution, ResourceCache};

    fn project() -> ProjectInfo {
        ProjectInfo {
            pixel_to_world: 10.0,
            original_resolution: Resolution::new("orig", 1000, 500, 0),
            resolutions: vec![Resolution::new("half", 500, 250, 0)],
        }
    }

    fn compose_image(world: &mut World, cache: &ResourceCache, image: &ImageDescriptor) -> Entity {
        let e = world.spawn_empty();
        compose(
            world,
            cache,
            e,
            &image.item,
            EntityType::Image,
            &ImageDimensions::from(image),
        )
        .unwrap();
        e
    }

    #[test]
    fn image_size_is_scaled_to_world_units() {
        let mut cache = ResourceCache::new(project());
        cache.add_region("tree", 200, 80);
        let mut world = World::new();
        let e = compose_image(&mut world, &cache, &ImageDescriptor::new("tree"));

        let dims = world.component::<Dimensions>(e);
        assert_eq!((dims.width, dims.height), (20.0, 8.0));
        assert_eq!(world.component::<Transform>(e).origin_x, 10.0);
        assert!(!world.has::<NormalMapRendering>(e));

        // Half-resolution assets are scaled back up by 2.
        let cache = {
            let mut c = ResourceCache::new(project()).with_resolution(Resolution::new("half", 500, 250, 0));
            c.add_region("tree", 100, 40);
            c
        };
        let e = compose_image(&mut world, &cache, &ImageDescriptor::new("tree"));
        let dims = world.component::<Dimensions>(e);
        assert_eq!((dims.width, dims.height), (20.0, 8.0));
    }

    #[test]
    fn normal_map_is_bound_when_present() {
        let mut cache = ResourceCache::new(project());
        let diffuse = cache.add_region("rock", 10, 10);
        let normal = cache.add_region("rock.normal", 10, 10);
        let mut world = World::new();
        let e = compose_image(&mut world, &cache, &ImageDescriptor::new("rock"));

        assert!(world.has::<NormalMapRendering>(e));
        let region = world.component::<TextureRegion>(e);
        assert_eq!(region.region, RegionHandle::WithNormal { diffuse, normal });
        assert_eq!(region.region.normal(), Some(normal));
    }

    #[test]
    fn stale_normal_marker_is_removed() {
        let mut cache = ResourceCache::new(project());
        cache.add_region("flat", 10, 10);
        let mut world = World::new();
        let e = world.spawn_empty();
        world.insert(e, NormalMapRendering);

        let image = ImageDescriptor::new("flat");
        compose(
            &mut world,
            &cache,
            e,
            &image.item,
            EntityType::Image,
            &ImageDimensions::from(&image),
        )
        .unwrap();
        assert!(!world.has::<NormalMapRendering>(e));
        assert!(matches!(
            world.component::<TextureRegion>(e).region,
            RegionHandle::Single(_)
        ));
    }

    #[test]
    fn polygon_image_bounds_come_from_outline() {
        let mut cache = ResourceCache::new(project());
        cache.add_region("blob", 100, 100);
        let triangle = vec![Vec2::new(1.0, 1.0), Vec2::new(4.0, 1.0), Vec2::new(1.0, 3.0)];
        let mut image = ImageDescriptor::new("blob");
        image.is_polygon = true;
        image.item.shape = Some(ShapeDescriptor {
            polygons: vec![triangle],
        });

        let mut world = World::new();
        let e = compose_image(&mut world, &cache, &image);

        let dims = world.component::<Dimensions>(e);
        assert_eq!((dims.width, dims.height), (10.0, 10.0));
        let bounds = dims.bound_box.unwrap();
        assert_eq!((bounds.min, bounds.max), (Vec2::new(1.0, 1.0), Vec2::new(4.0, 3.0)));
        assert!(!dims.hit(5.0, 5.0));
        assert_eq!(world.component::<BoundingBox>(e).rect, bounds);
        // Origin keeps the region centre.
        assert_eq!(world.component::<Transform>(e).origin_x, 5.0);

        // Without the flag the shape is kept but the region box stays.
        image.is_polygon = false;
        let e = compose_image(&mut world, &cache, &image);
        assert!(world.has::<Polygon>(e));
        assert!(world.component::<Dimensions>(e).bound_box.is_none());
    }

    #[test]
    fn primitive_size_from_shape() {
        let cache = ResourceCache::new(project());
        let item = ItemDescriptor {
            shape: Some(ShapeDescriptor {
                polygons: vec![vec![
                    Vec2::new(-1.0, 0.0),
                    Vec2::new(2.0, 0.0),
                    Vec2::new(2.0, 5.0),
                ]],
            }),
            ..Default::default()
        };
        let mut world = World::new();
        let e = world.spawn_empty();
        compose(&mut world, &cache, e, &item, EntityType::ColorPrimitive, &PrimitiveDimensions).unwrap();

        let dims = world.component::<Dimensions>(e);
        assert_eq!((dims.width, dims.height), (3.0, 5.0));
        assert!(dims.polygon.is_some());
        assert!(dims.hit(1.5, 1.0));

        let e = world.spawn_empty();
        compose(
            &mut world,
            &cache,
            e,
            &ItemDescriptor::default(),
            EntityType::ColorPrimitive,
            &PrimitiveDimensions,
        )
        .unwrap();
        assert_eq!(world.component::<Dimensions>(e).width, 0.0);
    }
}
