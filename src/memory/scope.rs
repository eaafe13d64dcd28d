//! Lexical scopes
//!
//! A [`Scope`] maps identifiers to the [`Cell`]s declared in one block. The
//! global table uses the same structure with whole-program lifetime.

use super::cell::{Cell, CellKind, Word};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct Scope {
    cells: FxHashMap<String, Cell>,
}

/// Declarations made while no call frame is active
pub type GlobalTable = Scope;

impl Scope {
    pub fn new() -> Self {
        Scope {
            cells: FxHashMap::default(),
        }
    }

    /// Declare a fresh cell; a later declaration of the same name wins
    pub fn declare(&mut self, name: impl Into<String>, kind: CellKind) {
        self.bind(name, Cell::new(kind));
    }

    /// Insert an already-built cell (used for call parameters)
    pub fn bind(&mut self, name: impl Into<String>, cell: Cell) {
        self.cells.insert(name.into(), cell);
    }

    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.cells.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Cell> {
        self.cells.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cells.contains_key(name)
    }

    /// Raw values of every bound REF cell in this scope
    pub fn bound_refs(&self) -> impl Iterator<Item = Word> + '_ {
        self.cells.values().filter_map(Cell::bound_ref)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
