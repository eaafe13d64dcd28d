//! Runtime error types for the interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can occur
//! while the execution state is being driven (as opposed to script or data parse errors).
//!
//! All runtime errors are fatal: they propagate with `?` to the driver, which
//! reports them and ends the run. Frames and scopes already mutated are left as-is.

use thiserror::Error;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Identifier not found in the current frame or the global table
    #[error("undefined identifier '{name}'")]
    UndefinedVariable { name: String },

    /// Read through an unbound ref, an out-of-range handle or an empty slot
    #[error("invalid heap read attempted through '{name}'")]
    InvalidHeapRead { name: String },

    /// Write through an unbound ref or an out-of-range handle
    #[error("invalid heap write attempted through '{name}'")]
    InvalidHeapWrite { name: String },

    /// `new` applied to a cell that is not a ref
    #[error("'{name}' is not of type ref, cannot perform new-assign")]
    NotARef { name: String },

    /// Call or lookup of a function that was never registered
    #[error("function call {name} has no target")]
    UndefinedFunction { name: String },

    /// Data source ran out of literals
    #[error("data file is out of values")]
    DataExhausted,

    /// Scope or frame operation with no active call frame
    #[error("no stack frame available for {operation}")]
    NoStackFrame { operation: &'static str },

    /// Attempt to pop the base scope of a frame
    #[error("scope stack underflow in frame '{function}'")]
    ScopeUnderflow { function: String },

    /// Formal and actual parameter lists differ in length
    #[error("function '{function}' expects {expected} argument(s), got {got}")]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        got: usize,
    },

    /// Heap grew past the largest handle a cell can hold
    #[error("heap is out of addressable handles")]
    HeapExhausted,

    /// Call stack grew past the configured limit
    #[error("call depth limit of {limit} exceeded")]
    CallDepthExceeded { limit: usize },
}
