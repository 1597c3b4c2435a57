//! # Descriptors — Serialized Item Records
//!
//! Plain records describing entities to create. The composer reads them once
//! and never keeps a reference.
//!
//! ```text
//! SceneDescriptor
//! └── CompositeDescriptor (root)
//!     ├── item: ItemDescriptor          ← fields every entity shares
//!     ├── layers: [LayerDescriptor]
//!     └── composite: CompositeItems
//!         ├── images:     [ImageDescriptor]
//!         ├── primitives: [ColorPrimitiveDescriptor]
//!         └── composites: [CompositeDescriptor]  (recursive)
//! ```
//!
//! Optional sub-records are `Option`s: `None` means the matching component
//! is never attached. Every field has a serde default, so descriptors decode
//! from partial JSON. The common item fields are flattened into each variant.

use serde::{Deserialize, Serialize};

use crate::components::BodyType;
use crate::error::Result;
use crate::math::{Color, Vec2};

/// Fields shared by every item variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDescriptor {
    pub unique_id: u32,
    pub item_identifier: String,
    /// Name of the library item this was instanced from.
    pub library_link: String,
    pub tags: Vec<String>,
    /// `key:value;key2:value2`.
    pub custom_vars: String,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// `None` derives the origin from the entity's own dimensions.
    pub origin_x: Option<f32>,
    pub origin_y: Option<f32>,
    /// RGBA in [0, 1].
    pub tint: [f32; 4],
    /// Empty means the default layer.
    pub layer_name: String,
    pub z_index: i32,
    pub physics: Option<PhysicsDescriptor>,
    pub light: Option<LightDescriptor>,
    pub shape: Option<ShapeDescriptor>,
    pub shader_name: Option<String>,
}

impl Default for ItemDescriptor {
    fn default() -> Self {
        Self {
            unique_id: 0,
            item_identifier: String::new(),
            library_link: String::new(),
            tags: Vec::new(),
            custom_vars: String::new(),
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            origin_x: None,
            origin_y: None,
            tint: Color::WHITE.to_array(),
            layer_name: String::new(),
            z_index: 0,
            physics: None,
            light: None,
            shape: None,
            shader_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsDescriptor {
    pub body_type: BodyType,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
    pub damping: f32,
    pub angular_damping: f32,
    pub mass: f32,
    pub center_of_mass: Vec2,
    pub rotational_inertia: f32,
    pub gravity_scale: f32,
    pub allow_sleep: bool,
    pub sensor: bool,
    pub awake: bool,
    pub bullet: bool,
    pub fixed_rotation: bool,
}

impl Default for PhysicsDescriptor {
    fn default() -> Self {
        Self {
            body_type: BodyType::Static,
            density: 1.0,
            friction: 1.0,
            restitution: 0.0,
            damping: 0.0,
            angular_damping: 0.0,
            mass: 0.0,
            center_of_mass: Vec2::ZERO,
            rotational_inertia: 1.0,
            gravity_scale: 1.0,
            allow_sleep: true,
            sensor: false,
            awake: true,
            bullet: false,
            fixed_rotation: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightDescriptor {
    pub rays: u32,
    pub color: Color,
    pub distance: f32,
    pub ray_direction: i32,
    pub softness_length: f32,
    pub is_xray: bool,
    pub is_static: bool,
    pub is_soft: bool,
    pub is_active: bool,
}

impl Default for LightDescriptor {
    fn default() -> Self {
        Self {
            rays: 12,
            color: Color::WHITE,
            distance: 300.0,
            ray_direction: 1,
            softness_length: 2.5,
            is_xray: false,
            is_static: true,
            is_soft: true,
            is_active: true,
        }
    }
}

/// Custom outlines, one vertex loop per entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeDescriptor {
    pub polygons: Vec<Vec<Vec2>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageDescriptor {
    #[serde(flatten)]
    pub item: ItemDescriptor,
    /// Atlas region name.
    pub image_name: String,
    /// Use the shape outline for bounds and hit testing.
    pub is_polygon: bool,
}

impl ImageDescriptor {
    pub fn new(image_name: impl Into<String>) -> Self {
        Self {
            image_name: image_name.into(),
            ..Default::default()
        }
    }
}

/// A flat-colored shape. Geometry comes from `item.shape`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorPrimitiveDescriptor {
    #[serde(flatten)]
    pub item: ItemDescriptor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerDescriptor {
    pub name: String,
    pub is_visible: bool,
    pub is_locked: bool,
}

impl Default for LayerDescriptor {
    fn default() -> Self {
        Self {
            name: String::new(),
            is_visible: true,
            is_locked: false,
        }
    }
}

impl LayerDescriptor {
    pub fn new(name: impl Into<String>, is_visible: bool) -> Self {
        Self {
            name: name.into(),
            is_visible,
            is_locked: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeItems {
    pub images: Vec<ImageDescriptor>,
    pub primitives: Vec<ColorPrimitiveDescriptor>,
    pub composites: Vec<CompositeDescriptor>,
}

impl CompositeItems {
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.primitives.is_empty() && self.composites.is_empty()
    }
}

/// A group of items with its own layer list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeDescriptor {
    #[serde(flatten)]
    pub item: ItemDescriptor,
    pub width: f32,
    pub height: f32,
    pub layers: Vec<LayerDescriptor>,
    pub composite: CompositeItems,
}

impl CompositeDescriptor {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescriptor {
    pub scene_name: String,
    pub composite: CompositeDescriptor,
}

impl SceneDescriptor {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
