//! # Vellum — 2D Scene Entity Composition
//!
//! Turns serialized scene descriptors into live entities: it attaches the
//! right components in the right order, links them into a scene graph with
//! layer-visibility inheritance, and keeps press/toggle buttons in sync with
//! the pointer every frame.
//!
//! Rendering, physics, lights and asset loading stay outside. They appear
//! here only as component data and as the [`ResourceRetriever`](resource::ResourceRetriever)
//! and [`PointerInput`](input::PointerInput) capabilities.
//!
//! Start with `use vellum::prelude::*`, build an
//! [`EntityFactory`](factory::EntityFactory) and call
//! [`load_scene`](factory::EntityFactory::load_scene).

pub mod button;
pub mod components;
pub mod compose;
pub mod descriptor;
pub mod ecs;
pub mod error;
pub mod factory;
pub mod input;
pub mod layer;
pub mod link;
pub mod math;
pub mod prelude;
pub mod resource;
pub mod variant;
