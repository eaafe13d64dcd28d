//! Heap implementation for the interpreter
//!
//! The heap is an append-only sequence of scalar slots:
//! - Handles are assigned in strictly increasing order starting at 0
//! - A slot starts empty and holds a value once written
//! - Nothing is ever freed, compacted or reused
//!
//! Out-of-range handles and empty slots are reported as `None`/`false` and
//! turned into `RuntimeError`s by the engine, which knows the identifier involved.

use super::cell::{Handle, Word};

/// The heap
#[derive(Debug, Clone, Default)]
pub struct Heap {
    slots: Vec<Option<Word>>,
}

impl Heap {
    pub fn new() -> Self {
        Heap { slots: Vec::new() }
    }

    /// Append a new empty slot and return its handle
    pub fn allocate(&mut self) -> Handle {
        let handle = self.slots.len();
        self.slots.push(None);
        handle
    }

    /// Read a slot; `None` if the handle is out of range or the slot is empty
    pub fn read(&self, handle: Handle) -> Option<Word> {
        self.slots.get(handle).copied().flatten()
    }

    /// Write a slot; returns false if the handle is out of range
    pub fn write(&mut self, handle: Handle, value: Word) -> bool {
        match self.slots.get_mut(handle) {
            Some(slot) => {
                *slot = Some(value);
                true
            }
            None => false,
        }
    }

    /// Raw slot contents (for inspection)
    pub fn slot(&self, handle: Handle) -> Option<Option<Word>> {
        self.slots.get(handle).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
