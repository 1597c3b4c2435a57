//! # Entity — Opaque Identity Handles
//!
//! An [`Entity`] owns no data. It is a key the [`World`](super::world::World)
//! uses to find the components attached to it. The composer only ever fills
//! and links entities; allocating and freeing them is the host's job.
//!
//! ## Generations
//!
//! Slots are recycled after a despawn, so every handle also carries the
//! generation of its slot:
//!
//! ```text
//! spawn  → Entity { index: 3, generation: 0 }
//! despawn  (slot 3 generation bumped to 1)
//! spawn  → Entity { index: 3, generation: 1 }
//! ```
//!
//! A stale handle still says `generation: 0`, so every lookup through it
//! misses instead of reading the new occupant's components.

use std::fmt;

/// A handle to an entity in the [`World`](super::world::World).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl Entity {
    /// Slot index. Also the allocation order of live entities that never
    /// reused a slot.
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Hands out entity slots and recycles them.
///
/// ```text
/// generations: [0, 2, 0]   ← current generation per slot
/// free_list:   [1]         ← despawned slots waiting for reuse
/// ```
pub(crate) struct EntityAllocator {
    generations: Vec<u32>,
    free_list: Vec<u32>,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Reuse a freed slot if there is one, otherwise grow.
    pub fn allocate(&mut self) -> Entity {
        match self.free_list.pop() {
            Some(index) => Entity {
                index,
                generation: self.generations[index as usize],
            },
            None => {
                let index = self.generations.len() as u32;
                self.generations.push(0);
                Entity {
                    index,
                    generation: 0,
                }
            }
        }
    }

    /// Free a slot. Returns `false` for a handle that was already stale.
    pub fn deallocate(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        self.generations[entity.index as usize] += 1;
        self.free_list.push(entity.index);
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.generations
            .get(entity.index as usize)
            .is_some_and(|&generation| generation == entity.generation)
    }

    /// The handle currently occupying slot `index`, if the slot exists.
    pub fn current(&self, index: u32) -> Option<Entity> {
        let generation = *self.generations.get(index as usize)?;
        Some(Entity { index, generation })
    }

    pub fn alive_count(&self) -> usize {
        self.generations.len() - self.free_list.len()
    }

    /// Total number of slots ever handed out.
    #[cfg(test)]
    pub fn slot_count(&self) -> usize {
        self.generations.len()
    }
}
