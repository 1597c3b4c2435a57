//! # Component Columns — Type-Erased Sparse Storage
//!
//! Every component type gets one [`ComponentColumn`]: a vector of optional
//! boxed values indexed by [`Entity::index`](super::Entity::index). An entity
//! has a component of type `T` exactly when its slot in `T`'s column is
//! `Some`.
//!
//! ```text
//! Column<Transform>:  [Some(t0), None, Some(t2), None]
//! Column<Dimensions>: [Some(d0), Some(d1), None]
//!                       e0        e1        e2
//! ```
//!
//! Attaching and detaching a single component is the hot path during scene
//! composition (components arrive one at a time in a fixed order), so a
//! sparse layout beats moving whole rows between archetype tables. Values are
//! `Box<dyn Any + Send + Sync>` and downcast on access, which keeps the store
//! free of `unsafe`.

use std::any::Any;

type Boxed = Box<dyn Any + Send + Sync>;

pub(crate) struct ComponentColumn {
    /// Full type name, for diagnostics and panic messages.
    type_name: &'static str,
    slots: Vec<Option<Boxed>>,
}

impl ComponentColumn {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            slots: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Store a value at `index`, returning the one it replaced.
    pub fn insert(&mut self, index: u32, value: Boxed) -> Option<Boxed> {
        let index = index as usize;
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        self.slots[index].replace(value)
    }

    pub fn remove(&mut self, index: u32) -> Option<Boxed> {
        self.slots.get_mut(index as usize)?.take()
    }

    pub fn contains(&self, index: u32) -> bool {
        matches!(self.slots.get(index as usize), Some(Some(_)))
    }

    /// # Panics
    ///
    /// Panics if the stored value is not a `T` (a store bug, never user error).
    pub fn get<T: 'static>(&self, index: u32) -> Option<&T> {
        let value = self.slots.get(index as usize)?.as_ref()?;
        Some(value.downcast_ref().unwrap_or_else(|| {
            panic!(
                "Component type mismatch: column `{}` read as `{}`",
                self.type_name,
                std::any::type_name::<T>()
            )
        }))
    }

    pub fn get_mut<T: 'static>(&mut self, index: u32) -> Option<&mut T> {
        let type_name = self.type_name;
        let value = self.slots.get_mut(index as usize)?.as_mut()?;
        Some(value.downcast_mut().unwrap_or_else(|| {
            panic!(
                "Component type mismatch: column `{}` read as `{}`",
                type_name,
                std::any::type_name::<T>()
            )
        }))
    }

    /// Occupied slot indices, ascending.
    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| index as u32)
    }
}
