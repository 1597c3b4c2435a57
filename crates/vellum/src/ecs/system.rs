//! # Systems and the Frame Schedule
//!
//! A system is any `FnMut(&mut World)`. The [`Schedule`] runs its systems in
//! the order they were added, once per call to [`Schedule::run`]. There is no
//! parallelism and no suspension point: the layer pass, the bounding box pass
//! and the button reconciler all mutate the same world from one thread, and
//! their relative order is part of the frame's behaviour.

use super::world::World;

/// Something that can run against the [`World`] once per frame.
pub trait System {
    fn run(&mut self, world: &mut World);
}

impl<F: FnMut(&mut World)> System for F {
    fn run(&mut self, world: &mut World) {
        (self)(world);
    }
}

struct NamedSystem {
    name: &'static str,
    system: Box<dyn System>,
}

/// An ordered list of systems.
pub struct Schedule {
    systems: Vec<NamedSystem>,
}

impl Schedule {
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
        }
    }

    /// Append a system. It runs after every system added before it.
    pub fn add_system<S: System + 'static>(&mut self, system: S) -> &mut Self {
        self.systems.push(NamedSystem {
            name: short_system_name(std::any::type_name::<S>()),
            system: Box::new(system),
        });
        self
    }

    /// Run every system once, in insertion order.
    pub fn run(&mut self, world: &mut World) {
        for named in &mut self.systems {
            log::trace!("running system `{}`", named.name);
            named.system.run(world);
        }
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// System names in run order.
    pub fn names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|s| s.name).collect()
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new()
    }
}

/// `vellum::layer::layer_system` → `layer_system`; closures become
/// `<closure>`.
fn short_system_name(full: &'static str) -> &'static str {
    if full.contains("{{closure}}") {
        return "<closure>";
    }
    full.rsplit("::").next().unwrap_or(full)
}
