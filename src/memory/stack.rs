//! Call stack implementation
//!
//! This module provides the call stack for function execution:
//! - [`CallStack`]: The stack of active function activations
//! - [`CallFrame`]: One activation, holding a stack of nested [`Scope`]s
//!
//! # Visibility
//!
//! Lookups through a frame only ever see that frame's own scopes. Caller
//! frames are never searched; the engine falls back to the global table.

use super::cell::Cell;
use super::scope::Scope;

/// Activation record for one function call
#[derive(Debug, Clone)]
pub struct CallFrame {
    pub function_name: String,
    scopes: Vec<Scope>,
}

impl CallFrame {
    /// Create a frame with one empty scope
    pub fn new(function_name: impl Into<String>) -> Self {
        Self::with_scope(function_name, Scope::new())
    }

    /// Create a frame whose initial scope is `scope`
    pub fn with_scope(function_name: impl Into<String>, scope: Scope) -> Self {
        CallFrame {
            function_name: function_name.into(),
            scopes: vec![scope],
        }
    }

    /// Enter a new block scope
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// Exit the innermost block scope
    ///
    /// The frame's base scope is never popped here; it goes away with the frame.
    pub fn pop_scope(&mut self) -> Option<Scope> {
        if self.scopes.len() > 1 {
            self.scopes.pop()
        } else {
            None
        }
    }

    /// Innermost scope, the target for new declarations
    pub fn innermost_mut(&mut self) -> &mut Scope {
        if self.scopes.is_empty() {
            self.scopes.push(Scope::new());
        }
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Find a variable, innermost scope first
    pub fn lookup(&self, name: &str) -> Option<&Cell> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Find a variable mutably, innermost scope first
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Cell> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(name))
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// Number of nested scopes in this frame
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }
}

/// The call stack
#[derive(Debug, Clone, Default)]
pub struct CallStack {
    frames: Vec<CallFrame>,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack { frames: Vec::new() }
    }

    /// Push a new stack frame
    pub fn push_frame(&mut self, frame: CallFrame) {
        self.frames.push(frame);
    }

    /// Pop the top stack frame
    pub fn pop_frame(&mut self) -> Option<CallFrame> {
        self.frames.pop()
    }

    /// Get the current (top) frame
    pub fn current_frame(&self) -> Option<&CallFrame> {
        self.frames.last()
    }

    /// Get a mutable reference to the current frame
    pub fn current_frame_mut(&mut self) -> Option<&mut CallFrame> {
        self.frames.last_mut()
    }

    pub fn frames(&self) -> &[CallFrame] {
        &self.frames
    }

    /// Get the depth of the call stack
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// True at top level, where declarations go to the global table
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::cell::CellKind;

    #[test]
    fn test_scope_push_pop_restores_depth() {
        let mut frame = CallFrame::new("main");
        assert_eq!(frame.scope_depth(), 1);
        frame.push_scope();
        frame.push_scope();
        assert_eq!(frame.scope_depth(), 3);
        assert!(frame.pop_scope().is_some());
        assert!(frame.pop_scope().is_some());
        assert_eq!(frame.scope_depth(), 1);
        assert!(frame.pop_scope().is_none());
        assert_eq!(frame.scope_depth(), 1);
    }

    #[test]
    fn test_innermost_shadows_outer() {
        let mut frame = CallFrame::new("f");
        frame.innermost_mut().declare("x", CellKind::Int);
        frame.lookup_mut("x").unwrap().value = Some(1);

        frame.push_scope();
        frame.innermost_mut().declare("x", CellKind::Int);
        frame.lookup_mut("x").unwrap().value = Some(2);
        assert_eq!(frame.lookup("x").unwrap().value, Some(2));

        frame.pop_scope();
        assert_eq!(frame.lookup("x").unwrap().value, Some(1));
    }

    #[test]
    fn test_stack_depth() {
        let mut stack = CallStack::new();
        assert!(stack.is_empty());
        stack.push_frame(CallFrame::new("main"));
        stack.push_frame(CallFrame::new("callee"));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.current_frame().unwrap().function_name, "callee");
        stack.pop_frame();
        assert_eq!(stack.current_frame().unwrap().function_name, "main");
        stack.pop_frame();
        assert!(stack.pop_frame().is_none());
    }
}
