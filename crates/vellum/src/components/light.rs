use crate::descriptor::LightDescriptor;
use crate::math::Color;

/// Light attached to a body. Rendering the light is the light engine's job.
#[derive(Debug, Clone, PartialEq)]
pub struct LightBody {
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

impl From<&LightDescriptor> for LightBody {
    fn from(d: &LightDescriptor) -> Self {
        Self {
            rays: d.rays,
            color: d.color,
            distance: d.distance,
            ray_direction: d.ray_direction,
            softness_length: d.softness_length,
            is_xray: d.is_xray,
            is_static: d.is_static,
            is_soft: d.is_soft,
            is_active: d.is_active,
        }
    }
}
