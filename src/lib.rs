//! # Introduction
//!
//! refcore is the execution-state core of a small tree-walking interpreter for
//! an imperative language with `int` scalars, `ref` variables and heap
//! allocation. It owns all runtime storage: globals, per-call frames of nested
//! scopes, an append-only heap and a liveness tracker that reports an
//! approximate reachable count whenever it changes.
//!
//! ## Execution pipeline
//!
//! ```text
//! Script → Lexer → Parser → Commands → Interpreter → ExecState
//!                                                   ↑
//!                                      Data file → DataScanner
//! ```
//!
//! 1. [`memory`]: cells, heap, liveness flags, scopes and the call stack.
//! 2. [`interpreter`]: the [`interpreter::engine::ExecState`] façade that an
//!    evaluator calls, plus a script [`interpreter::statements::Interpreter`]
//!    that drives it.
//! 3. [`parser`]: operation-script and data-file parsing.
//!
//! ## Memory model
//!
//! - `int` cells hold their value directly; `ref` cells hold a heap handle.
//! - Handles are never reused; nothing is reclaimed.
//! - Lookups see the current frame's scopes, then the globals. Caller frames
//!   are invisible to callees.
//! - Liveness is a boolean per handle, cleared when any ref bound to it goes
//!   out of scope. Aliases are not counted.

pub mod interpreter;
pub mod memory;
pub mod parser;
