//! # Button Reconciler — Focus and Child Visibility
//!
//! Every frame, every entity carrying a [`Button`] and a [`Node`] is brought
//! in line with the pointer:
//!
//! ```text
//!             has ViewPort?
//!            ┌──── yes ──► Editing: show every child, leave focus alone
//!            │
//! button ────┤     another entity holds InputFocus?
//!            └──── no ───┬──── yes ──► skip this frame
//!                        │
//!                        └──── no ───► touched = pointer down && hit
//!                                      touched  → claim focus
//!                                      !touched → release focus if ours
//!                                      touched || checked → "pressed" look
//!                                      otherwise          → "normal" look
//! ```
//!
//! The "look" only touches direct children whose layer is [`NORMAL_LAYER`] or
//! [`PRESSED_LAYER`]; other children keep their visibility.
//!
//! ## Focus
//!
//! [`InputFocus`] is one world-wide slot, not a per-button lock. At most one
//! button reacts to the pointer at a time, which is all single-pointer input
//! needs. Buttons are visited in descending slot index, so when two
//! overlapping buttons are hit in the same frame the one in the higher slot
//! takes focus and the other is left untouched. Without recycled slots that is
//! the newer button, drawn on top.
//!
//! Nothing here returns an error: a button without `Node` or `Dimensions` is
//! skipped.

use crate::components::{Button, ButtonState, Dimensions, MainItem, ViewPort, ZIndex};
use crate::ecs::hierarchy::world_to_local;
use crate::ecs::{Entity, Node, World};
use crate::input::{PointerInput, PointerState};

/// Children on this layer show while the button is up.
pub const NORMAL_LAYER: &str = "normal";
/// Children on this layer show while the button is pressed or checked.
pub const PRESSED_LAYER: &str = "pressed";

/// The button currently owning the pointer, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFocus(pub Option<Entity>);

impl InputFocus {
    pub fn holder(&self) -> Option<Entity> {
        self.0
    }

    pub fn is_held_by(&self, entity: Entity) -> bool {
        self.0 == Some(entity)
    }
}

/// Run one reconciliation pass against `pointer`.
///
/// Inserts an empty [`InputFocus`] resource on first use.
pub fn reconcile_buttons<P: PointerInput + ?Sized>(world: &mut World, pointer: &P) {
    if !world.has_resource::<InputFocus>() {
        world.insert_resource(InputFocus::default());
    }
    release_stale_focus(world);

    let mut buttons = world.entities_with::<Button>();
    buttons.reverse();
    for entity in buttons {
        reconcile_button(world, pointer, entity);
    }
}

/// [`reconcile_buttons`] as a scheduled system, reading the world's
/// [`PointerState`] resource. Does nothing without one.
pub fn button_system(world: &mut World) {
    let Some(pointer) = world.resource_remove::<PointerState>() else {
        return;
    };
    reconcile_buttons(world, &pointer);
    world.insert_resource(pointer);
}

/// Where `entity` stands after the last pass. `None` if it is not a button.
pub fn button_state(world: &World, entity: Entity) -> Option<ButtonState> {
    let button = world.get::<Button>(entity)?;
    Some(if world.has::<ViewPort>(entity) {
        ButtonState::Editing
    } else if button.is_touched {
        ButtonState::Pressed
    } else if button.is_checked {
        ButtonState::CheckedIdle
    } else {
        ButtonState::Idle
    })
}

/// A holder that is no longer a button, or that went into editing, never
/// reaches the release branch and would block every button forever.
fn release_stale_focus(world: &mut World) {
    let focus = world.resource::<InputFocus>().0;
    if let Some(holder) = focus {
        if !world.has::<Button>(holder) || world.has::<ViewPort>(holder) {
            log::trace!("focus holder {holder:?} is gone or editing, releasing");
            world.resource_mut::<InputFocus>().0 = None;
        }
    }
}

fn reconcile_button<P: PointerInput + ?Sized>(world: &mut World, pointer: &P, entity: Entity) {
    let Some(children) = world.get::<Node>(entity).map(|n| n.children.clone()) else {
        return;
    };

    if world.has::<ViewPort>(entity) {
        for child in children {
            if let Some(item) = world.get_mut::<MainItem>(child) {
                item.visible = true;
            }
        }
        return;
    }

    let focus = world.resource::<InputFocus>().0;
    if focus.is_some_and(|holder| holder != entity) {
        return;
    }

    let Some(dimensions) = world.get::<Dimensions>(entity) else {
        return;
    };
    let touched = pointer.is_pointer_down() && {
        let local = world_to_local(world, entity, pointer.pointer_position());
        dimensions.hit(local.x, local.y)
    };

    if touched && focus.is_none() {
        log::trace!("{entity:?} takes input focus");
        world.resource_mut::<InputFocus>().0 = Some(entity);
    } else if !touched && focus == Some(entity) {
        log::trace!("{entity:?} releases input focus");
        world.resource_mut::<InputFocus>().0 = None;
    }

    let button = world.component_mut::<Button>(entity);
    button.is_touched = touched;
    let pressed = button.shows_pressed();

    for child in children {
        let visible = match world.get::<ZIndex>(child).map(|z| z.layer_name.as_str()) {
            Some(NORMAL_LAYER) => !pressed,
            Some(PRESSED_LAYER) => pressed,
            _ => continue,
        };
        if let Some(item) = world.get_mut::<MainItem>(child) {
            item.visible = visible;
        }
    }
}
