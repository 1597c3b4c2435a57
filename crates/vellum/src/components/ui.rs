//! Interactive and editor-facing components.

use crate::math::Vec2;

/// A press/toggle control. Its children on the `normal` and `pressed`
/// layers are swapped by the button reconciler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Button {
    /// Toggled on. Set by game code, read by the reconciler.
    pub is_checked: bool,
    /// Held by the pointer this frame. Written by the reconciler.
    pub is_touched: bool,
}

impl Button {
    pub fn toggle(&mut self) {
        self.is_checked = !self.is_checked;
    }

    /// Shows the pressed look when touched or checked.
    pub fn shows_pressed(&self) -> bool {
        self.is_touched || self.is_checked
    }
}

/// Reconciler state of one button, as last observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Idle,
    Pressed,
    CheckedIdle,
    /// The entity is an editor viewport or preview. Input is ignored and
    /// every child is shown.
    Editing,
}

/// A screen viewport looking into the scene.
///
/// On a scene root it defines how pointer coordinates map into scene space.
/// On a button it marks editor preview mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPort {
    /// Screen size in pixels.
    pub width: f32,
    pub height: f32,
    pub pixels_per_world_unit: f32,
    /// Scene point at the centre of the screen.
    pub camera_position: Vec2,
}

impl ViewPort {
    /// A viewport whose bottom-left screen corner is scene (0, 0).
    pub fn new(width: f32, height: f32, pixels_per_world_unit: f32) -> Self {
        Self {
            width,
            height,
            pixels_per_world_unit,
            camera_position: Vec2::new(width, height) / (2.0 * pixels_per_world_unit),
        }
    }

    /// Screen pixels (y down) → scene units (y up).
    pub fn unproject(&self, screen: Vec2) -> Vec2 {
        let centered = Vec2::new(
            screen.x - self.width * 0.5,
            self.height * 0.5 - screen.y,
        );
        self.camera_position + centered / self.pixels_per_world_unit
    }
}
