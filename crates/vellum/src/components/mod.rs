//! # Scene Components
//!
//! Every component the composer, linker and reconciler attach, grouped by
//! concern. Each is a plain data record; behaviour lives in the systems.
//!
//! | Component          | Attached by           | Present when               |
//! |--------------------|-----------------------|----------------------------|
//! | [`Dimensions`]     | composer, step 1      | always                     |
//! | [`BoundingBox`]    | composer, step 2      | always                     |
//! | [`MainItem`]       | composer, step 3      | always                     |
//! | [`Transform`]      | composer, step 4      | always                     |
//! | [`Tint`]           | composer, step 5      | always                     |
//! | [`ZIndex`]         | composer, step 6      | always                     |
//! | [`Script`]         | composer, step 7      | always                     |
//! | [`Polygon`]        | composer, step 8      | descriptor has a shape     |
//! | [`PhysicsBody`]    | composer, step 9      | descriptor has physics     |
//! | [`LightBody`]      | composer, step 10     | descriptor has a light     |
//! | [`Shader`]         | composer, step 11     | shader name is non-empty   |
//! | [`TextureRegion`]  | image dimensions      | image entities             |
//! | [`ParentNode`]     | linker                | entity has a parent        |
//! | [`Node`]           | factory               | composites                 |
//! | [`LayerMap`]       | factory               | composites                 |
//! | [`Button`]         | factory               | composites tagged `button` |

pub mod geometry;
pub mod item;
pub mod light;
pub mod physics;
pub mod render;
pub mod ui;

pub use geometry::{BoundingBox, Dimensions, Polygon, Transform};
pub use item::{CustomVariables, EntityType, MainItem, Script, Tint, ZIndex};
pub use light::LightBody;
pub use physics::{BodyType, PhysicsBody};
pub use render::{NormalMapRendering, Shader, TextureRegion};
pub use ui::{Button, ButtonState, ViewPort};

pub use crate::ecs::hierarchy::{Node, ParentNode};
pub use crate::layer::{LayerItem, LayerMap};
