//! # Component Store
//!
//! A small sparse-set ECS: generational entity handles, one type-erased
//! column per component type, singleton resources, and an ordered schedule.
//! The composer, linker and reconciler are all written against this store.
//!
//! ## Module Overview
//!
//! - [`entity`] — Generational entity IDs
//! - `component` — Type-erased sparse columns (`Box<dyn Any>`)
//! - [`world`] — Central container (entities + components + resources)
//! - [`hierarchy`] — Parent/child edges and coordinate mapping
//! - [`system`] — System trait and schedule runner

pub(crate) mod component;
pub mod entity;
pub mod hierarchy;
pub mod system;
pub mod world;

pub use entity::Entity;
pub use hierarchy::{Node, ParentNode};
pub use system::{Schedule, System};
pub use world::{Aspect, World};
