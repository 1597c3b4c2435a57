//! # Geometry Components
//!
//! [`Dimensions`] is the first component composed and everything spatial
//! reads from it: the [`BoundingBox`] placeholder, the [`Transform`] origin
//! default, the button hit test.
//!
//! Local space is y-up with (0, 0) at the bottom-left of the item.

use crate::descriptor::ShapeDescriptor;
use crate::error::{Error, Result};
use crate::math::{Affine2, Rect, Vec2, outline_contains};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
    /// Tight bounds of the polygon outline, when one overrides the plain
    /// `width` x `height` box.
    pub bound_box: Option<Rect>,
    pub polygon: Option<Vec<Vec<Vec2>>>,
}

impl Dimensions {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            bound_box: None,
            polygon: None,
        }
    }

    /// Use `polygon`'s outlines for hit testing and its extents as bounds.
    pub fn set_polygon(&mut self, polygon: &Polygon) {
        self.bound_box = polygon.bounds();
        self.polygon = Some(polygon.vertices.clone());
    }

    /// Whether a local-space point lies on the item.
    pub fn hit(&self, x: f32, y: f32) -> bool {
        let point = Vec2::new(x, y);
        if let Some(outlines) = &self.polygon {
            return outlines.iter().any(|o| outline_contains(o, point));
        }
        if let Some(rect) = &self.bound_box {
            return x >= rect.min.x && x < rect.max.x && y >= rect.min.y && y < rect.max.y;
        }
        x >= 0.0 && x < self.width && y >= 0.0 && y < self.height
    }
}

/// Scene-space extents, refreshed by
/// [`bounding_box_system`](crate::ecs::hierarchy::bounding_box_system).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundingBox {
    pub corners: [Vec2; 4],
    pub rect: Rect,
}

impl BoundingBox {
    /// Untransformed box of `dimensions`. A zero-sized box stands in until
    /// geometry is known.
    pub fn from_dimensions(dimensions: &Dimensions) -> Self {
        let rect = dimensions
            .bound_box
            .unwrap_or_else(|| Rect::from_size(dimensions.width, dimensions.height));
        Self {
            corners: rect.corners(),
            rect,
        }
    }
}

/// Position, rotation (degrees, counter-clockwise) and scale relative to the
/// parent. Rotation and scale pivot on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub origin_x: f32,
    pub origin_y: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }
}

impl Transform {
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.origin_x, self.origin_y)
    }

    /// Local → parent matrix.
    pub fn local_matrix(&self) -> Affine2 {
        let origin = self.origin();
        Affine2::from_translation(Vec2::new(self.x, self.y) + origin)
            * Affine2::from_angle(self.rotation.to_radians())
            * Affine2::from_scale(Vec2::new(self.scale_x, self.scale_y))
            * Affine2::from_translation(-origin)
    }
}

/// Custom outline: one or more closed vertex loops in local space.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vec<Vec2>>,
}

impl Polygon {
    /// Copy the outlines of a shape sub-record.
    ///
    /// A shape with no outlines, or with an outline of fewer than three
    /// vertices, is rejected.
    pub fn from_shape(shape: &ShapeDescriptor) -> Result<Self> {
        if shape.polygons.is_empty() {
            return Err(Error::invalid("shape", "shape has no outlines"));
        }
        if let Some((i, outline)) = shape
            .polygons
            .iter()
            .enumerate()
            .find(|(_, outline)| outline.len() < 3)
        {
            return Err(Error::invalid(
                "shape",
                format!("outline {i} has {} vertices", outline.len()),
            ));
        }
        Ok(Self {
            vertices: shape.polygons.clone(),
        })
    }

    pub fn bounds(&self) -> Option<Rect> {
        Rect::from_points(self.vertices.iter().flatten().copied())
    }
}
