//! Statement execution for operation scripts
//!
//! This module drives an [`ExecState`] from a parsed [`Script`]:
//!
//! - Declarations, `new`, `set`, `copy`, `input` and `print`
//! - Blocks (`{ }`) as scope push/pop
//! - The program body (`begin ... end`) as a zero-argument frame
//! - Function declarations and calls
//!
//! # Calls
//!
//! Function declarations are registered in a pass over the top level before
//! anything executes. A call looks up the formals (failing if the function is
//! unknown), pushes a parameter frame built from the actuals, runs the body
//! and pops the frame.
//!
//! Any [`RuntimeError`] aborts the whole run; nothing is unwound.

use crate::interpreter::engine::ExecState;
use crate::interpreter::errors::RuntimeError;
use crate::memory::cell::Word;
use crate::parser::ast::{Command, Script};
use tracing::trace;

/// Script interpreter over one execution state
pub struct Interpreter {
    state: ExecState<Vec<Command>>,

    /// Lines produced by `print`
    output: Vec<String>,

    /// Also write printed lines to stdout as they are produced
    echo: bool,
}

impl Interpreter {
    pub fn new(state: ExecState<Vec<Command>>) -> Self {
        Interpreter {
            state,
            output: Vec::new(),
            echo: false,
        }
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Run a script from start to finish
    pub fn run(&mut self, script: &Script) -> Result<(), RuntimeError> {
        for command in &script.commands {
            if let Command::FuncDecl {
                name,
                formals,
                body,
                ..
            } = command
            {
                self.state.register(name, formals.clone(), body.clone());
            }
        }

        for command in &script.commands {
            if !matches!(command, Command::FuncDecl { .. }) {
                self.execute(command)?;
            }
        }
        Ok(())
    }

    fn execute(&mut self, command: &Command) -> Result<(), RuntimeError> {
        trace!(line = command.location().line, "execute");

        match command {
            Command::Declare { name, kind, .. } => {
                self.state.declare(name, *kind);
                Ok(())
            }
            Command::New { name, .. } => self.state.heap_allocate(name).map(|_| ()),
            Command::Set { name, value, .. } => self.state.write(name, *value),
            Command::Copy { dst, src, .. } => self.state.reference_copy(dst, src),
            Command::Input { name, .. } => {
                let value = self.state.next_data()?;
                self.state.write(name, value)
            }
            Command::Print { name, .. } => {
                let value = self.state.read(name)?;
                self.emit(value);
                Ok(())
            }
            Command::Block { body, .. } => {
                self.state.push_scope()?;
                self.execute_all(body)?;
                self.state.pop_scope()
            }
            Command::Frame { body, .. } => {
                self.state.push_frame()?;
                self.execute_all(body)?;
                self.state.pop_frame()
            }
            Command::FuncDecl {
                name,
                formals,
                body,
                ..
            } => {
                self.state.register(name, formals.clone(), body.clone());
                Ok(())
            }
            Command::Call { name, actuals, .. } => self.call_function(name, actuals),
        }
    }

    fn execute_all(&mut self, body: &[Command]) -> Result<(), RuntimeError> {
        for command in body {
            self.execute(command)?;
        }
        Ok(())
    }

    fn call_function(&mut self, name: &str, actuals: &[String]) -> Result<(), RuntimeError> {
        let formals = self.state.lookup_formals(name)?.to_vec();
        self.state.push_call_frame(name, formals.as_slice(), actuals)?;

        let body = self.state.lookup_body(name)?.clone();
        self.execute_all(&body)?;

        self.state.pop_frame()
    }

    fn emit(&mut self, value: Word) {
        let line = value.to_string();
        if self.echo {
            println!("{}", line);
        }
        self.output.push(line);
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn state(&self) -> &ExecState<Vec<Command>> {
        &self.state
    }
}
