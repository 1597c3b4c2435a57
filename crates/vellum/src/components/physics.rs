//! Physics body parameters.
//!
//! The physics world itself is an external service. [`PhysicsBody`] only
//! records what the body should be created with; nothing here simulates.

use serde::{Deserialize, Serialize};

use crate::descriptor::PhysicsDescriptor;
use crate::math::Vec2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    #[default]
    Static,
    Kinematic,
    Dynamic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBody {
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

/// Field-for-field copy.
impl From<&PhysicsDescriptor> for PhysicsBody {
    fn from(d: &PhysicsDescriptor) -> Self {
        Self {
            body_type: d.body_type,
            density: d.density,
            friction: d.friction,
            restitution: d.restitution,
            damping: d.damping,
            angular_damping: d.angular_damping,
            mass: d.mass,
            center_of_mass: d.center_of_mass,
            rotational_inertia: d.rotational_inertia,
            gravity_scale: d.gravity_scale,
            allow_sleep: d.allow_sleep,
            sensor: d.sensor,
            awake: d.awake,
            bullet: d.bullet,
            fixed_rotation: d.fixed_rotation,
        }
    }
}
