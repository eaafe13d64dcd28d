//! Execution state and script interpreter
//!
//! This module provides the runtime side of the crate:
//! - [`engine`]: [`engine::ExecState`], the façade every evaluator call goes through
//! - [`registry`]: Function definitions (formals and body) by name
//! - [`errors`]: Runtime error types, all fatal
//! - [`config`]: Run options
//! - [`report`]: Delivery of the reachable-count notification
//! - [`statements`]: Script interpreter built on the execution state
//!
//! # Execution Model
//!
//! Single-threaded and synchronous. Every operation runs to completion and
//! the first error ends the run without rolling back frames or scopes.

pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod registry;
pub mod report;
pub mod statements;
