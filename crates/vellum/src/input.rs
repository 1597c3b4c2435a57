//! Pointer input state.
//!
//! The button reconciler only needs two facts per frame: is the primary
//! pointer held, and where is it. [`PointerInput`] is that capability.
//! [`PointerState`] is the stock implementation: a per-button [`Input`]
//! tracker keyed by [`MouseButton`] plus the last [`CursorPosition`], kept in
//! the [`World`](crate::ecs::World) as a resource and fed by the host's
//! window event handler.

use std::collections::HashSet;
use std::hash::Hash;

pub use winit::event::MouseButton;

use crate::math::Vec2;

/// What the reconciler reads from the input device.
pub trait PointerInput {
    fn is_pointer_down(&self) -> bool;

    /// Pointer position in screen space: pixels, origin at the top-left,
    /// y pointing down.
    fn pointer_position(&self) -> Vec2;
}

/// Tracks the state of a set of inputs (keys or mouse buttons).
///
/// - `pressed`: currently held down
/// - `just_pressed`: pressed this frame
/// - `just_released`: released this frame
#[derive(Debug, Clone)]
pub struct Input<T: Eq + Hash + Copy> {
    pressed: HashSet<T>,
    just_pressed: HashSet<T>,
    just_released: HashSet<T>,
}

impl<T: Eq + Hash + Copy> Input<T> {
    pub fn new() -> Self {
        Self {
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    pub fn pressed(&self, input: T) -> bool {
        self.pressed.contains(&input)
    }

    pub fn just_pressed(&self, input: T) -> bool {
        self.just_pressed.contains(&input)
    }

    pub fn just_released(&self, input: T) -> bool {
        self.just_released.contains(&input)
    }

    pub fn press(&mut self, input: T) {
        if self.pressed.insert(input) {
            self.just_pressed.insert(input);
        }
    }

    pub fn release(&mut self, input: T) {
        if self.pressed.remove(&input) {
            self.just_released.insert(input);
        }
    }

    /// Clear per-frame state. Call once at the end of each frame.
    pub fn clear_just(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

impl<T: Eq + Hash + Copy> Default for Input<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Mouse cursor position in window coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CursorPosition {
    pub x: f32,
    pub y: f32,
}

/// Mouse buttons plus cursor: the default [`PointerInput`].
///
/// The primary pointer is [`MouseButton::Left`].
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    pub buttons: Input<MouseButton>,
    pub cursor: CursorPosition,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.cursor = CursorPosition { x, y };
    }

    /// Move and press the primary button in one step (a touch).
    pub fn touch(&mut self, x: f32, y: f32) {
        self.move_to(x, y);
        self.buttons.press(MouseButton::Left);
    }

    pub fn lift(&mut self) {
        self.buttons.release(MouseButton::Left);
    }

    pub fn end_frame(&mut self) {
        self.buttons.clear_just();
    }
}

impl PointerInput for PointerState {
    fn is_pointer_down(&self) -> bool {
        self.buttons.pressed(MouseButton::Left)
    }

    fn pointer_position(&self) -> Vec2 {
        Vec2::new(self.cursor.x, self.cursor.y)
    }
}
