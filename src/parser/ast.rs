// AST definitions for operation scripts

use crate::memory::cell::{CellKind, Word};

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// One script command; each maps onto one or more execution-state operations
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `int x` / `ref x`
    Declare {
        name: String,
        kind: CellKind,
        location: SourceLocation,
    },

    /// `new x`
    New {
        name: String,
        location: SourceLocation,
    },

    /// `set x 5`
    Set {
        name: String,
        value: Word,
        location: SourceLocation,
    },

    /// `copy dst src`
    Copy {
        dst: String,
        src: String,
        location: SourceLocation,
    },

    /// `input x`
    Input {
        name: String,
        location: SourceLocation,
    },

    /// `print x`
    Print {
        name: String,
        location: SourceLocation,
    },

    /// `{ ... }`
    Block {
        body: Vec<Command>,
        location: SourceLocation,
    },

    /// `begin ... end`
    Frame {
        body: Vec<Command>,
        location: SourceLocation,
    },

    /// `func name a b { ... }`
    FuncDecl {
        name: String,
        formals: Vec<String>,
        body: Vec<Command>,
        location: SourceLocation,
    },

    /// `call name x y`
    Call {
        name: String,
        actuals: Vec<String>,
        location: SourceLocation,
    },
}

impl Command {
    pub fn location(&self) -> SourceLocation {
        match self {
            Command::Declare { location, .. }
            | Command::New { location, .. }
            | Command::Set { location, .. }
            | Command::Copy { location, .. }
            | Command::Input { location, .. }
            | Command::Print { location, .. }
            | Command::Block { location, .. }
            | Command::Frame { location, .. }
            | Command::FuncDecl { location, .. }
            | Command::Call { location, .. } => *location,
        }
    }
}

/// A parsed script
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    pub commands: Vec<Command>,
}
