//! Convenience re-exports — `use vellum::prelude::*` for the common items.

// Store
pub use crate::ecs::hierarchy::{bounding_box_system, local_to_world, world_to_local};
pub use crate::ecs::{Entity, Node, ParentNode, Schedule, System, World};

// Components
pub use crate::components::{
    BodyType, BoundingBox, Button, ButtonState, CustomVariables, Dimensions, EntityType,
    LightBody, MainItem, NormalMapRendering, PhysicsBody, Polygon, Script, Shader, TextureRegion,
    Tint, Transform, ViewPort, ZIndex,
};

// Descriptors and resources
pub use crate::descriptor::{
    ColorPrimitiveDescriptor, CompositeDescriptor, CompositeItems, ImageDescriptor,
    ItemDescriptor, LayerDescriptor, LightDescriptor, PhysicsDescriptor, SceneDescriptor,
    ShapeDescriptor,
};
pub use crate::resource::{
    AtlasRegion, ProjectInfo, RegionHandle, Resolution, ResourceCache, ResourceRetriever,
    ShaderHandle,
};

// Composition and scene graph
pub use crate::compose::{Composition, DimensionsStrategy, compose};
pub use crate::factory::{EntityFactory, SceneLoad};
pub use crate::layer::{DEFAULT_LAYER, LayerItem, LayerMap, layer_system, refresh_layer_visibility};
pub use crate::link::link;
pub use crate::variant::{CompositeDimensions, ImageDimensions, PrimitiveDimensions};

// Buttons and input
pub use crate::button::{InputFocus, button_system, reconcile_buttons};
pub use crate::input::{CursorPosition, Input, MouseButton, PointerInput, PointerState};

// Errors and math
pub use crate::error::{Error, ResourceKind};
pub use crate::math::{Color, Rect, Vec2};
