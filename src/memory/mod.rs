//! Memory model for the interpreter
//!
//! This module provides the core storage abstractions:
//! - [`cell`]: Typed variable cells (`int` scalars and `ref` handles)
//! - [`heap`]: Append-only heap of scalar slots
//! - [`liveness`]: Per-handle liveness flags and the reachable count
//! - [`scope`]: Identifier bindings for one block, and the global table
//! - [`stack`]: Call stack with frames of nested scopes
//!
//! # Ownership
//!
//! Scopes own their cells, frames own their scopes and the call stack owns its
//! frames. The heap and liveness tracker are owned by the execution state and
//! live for the whole run; nothing is ever reclaimed.

pub mod cell;
pub mod heap;
pub mod liveness;
pub mod scope;
pub mod stack;
