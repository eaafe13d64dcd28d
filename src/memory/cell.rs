//! Variable cells
//!
//! A [`Cell`] is the storage unit behind every declared identifier. Its
//! [`CellKind`] is fixed at creation:
//!
//! - [`CellKind::Int`]: `value` holds the scalar itself, starting at 0
//! - [`CellKind::Ref`]: `value` holds a heap [`Handle`], or `None` while unbound
//!
//! The raw `value` field is shared by both kinds so that handle aliasing and
//! parameter passing can copy it without looking at the kind.

use std::fmt;

/// Scalar type stored in INT cells and heap slots
pub type Word = i32;

/// Index into the heap
pub type Handle = usize;

/// Kind of a variable cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Int,
    Ref,
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellKind::Int => write!(f, "int"),
            CellKind::Ref => write!(f, "ref"),
        }
    }
}

/// A typed variable storage unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    kind: CellKind,
    pub value: Option<Word>,
}

impl Cell {
    pub fn new(kind: CellKind) -> Self {
        let value = match kind {
            CellKind::Int => Some(0),
            CellKind::Ref => None,
        };
        Cell { kind, value }
    }

    /// Build a REF cell carrying a raw value copied from another cell
    pub fn with_raw_ref(value: Option<Word>) -> Self {
        Cell {
            kind: CellKind::Ref,
            value,
        }
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn is_ref(&self) -> bool {
        self.kind == CellKind::Ref
    }

    /// Heap handle of a bound REF cell
    ///
    /// Returns `None` for INT cells, unbound REF cells and negative raw values
    /// (which can only appear after an INT was copied into a REF parameter).
    pub fn handle(&self) -> Option<Handle> {
        if !self.is_ref() {
            return None;
        }
        self.value.and_then(|v| Handle::try_from(v).ok())
    }

    /// Raw value of a REF cell that owns a liveness flag when it goes out of scope
    pub fn bound_ref(&self) -> Option<Word> {
        if self.is_ref() {
            self.value
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cells() {
        let int = Cell::new(CellKind::Int);
        assert_eq!(int.kind(), CellKind::Int);
        assert_eq!(int.value, Some(0));

        let r = Cell::new(CellKind::Ref);
        assert!(r.is_ref());
        assert_eq!(r.value, None);
        assert_eq!(r.handle(), None);
    }

    #[test]
    fn test_handle_only_for_refs() {
        let mut int = Cell::new(CellKind::Int);
        int.value = Some(3);
        assert_eq!(int.handle(), None);
        assert_eq!(int.bound_ref(), None);

        let r = Cell::with_raw_ref(Some(3));
        assert_eq!(r.handle(), Some(3));
        assert_eq!(r.bound_ref(), Some(3));

        let negative = Cell::with_raw_ref(Some(-1));
        assert_eq!(negative.handle(), None);
        assert_eq!(negative.bound_ref(), Some(-1));
    }
}
