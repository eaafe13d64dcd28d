//! Script and data parsing
//!
//! This module turns text into the inputs the execution state is driven by:
//! - [`lexer`]: Tokenization shared by scripts and data files
//! - [`parse`]: Parsing (tokens → [`ast::Script`])
//! - [`ast`]: Script command definitions
//! - [`data`]: The literal [`data::DataSource`] consumed by `input`
//!
//! # Script Format
//!
//! Operation scripts are a line-oriented stand-in for a full evaluator: each
//! command maps onto execution-state operations (`int`/`ref` declare, `new`
//! heap-allocates, `{`/`}` push and pop scopes, `begin`/`end` push and pop a
//! frame, `call` pushes a parameter frame and runs a registered body).

pub mod ast;
pub mod data;
pub mod lexer;
pub mod parse;
