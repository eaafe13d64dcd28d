// Execution state for the interpreter

use crate::interpreter::config::ExecConfig;
use crate::interpreter::constants::ANONYMOUS_FRAME;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::registry::FunctionRegistry;
use crate::interpreter::report::ReportHandler;
use crate::memory::cell::{Cell, CellKind, Handle, Word};
use crate::memory::heap::Heap;
use crate::memory::liveness::LivenessTracker;
use crate::memory::scope::{GlobalTable, Scope};
use crate::memory::stack::{CallFrame, CallStack};
use crate::parser::data::{DataScanner, DataSource};
use tracing::{debug, trace};

/// All runtime storage of one program run
///
/// The evaluator owns one `ExecState` and passes it to every statement and
/// expression it executes. `B` is the function body type stored in the registry.
pub struct ExecState<B> {
    /// Declarations made while no frame is active
    globals: GlobalTable,

    /// Append-only heap of scalar slots
    heap: Heap,

    /// One liveness flag per heap handle
    liveness: LivenessTracker,

    /// Active function activations
    stack: CallStack,

    /// Function definitions (name -> formals, body)
    functions: FunctionRegistry<B>,

    /// Where reachable-count changes are delivered
    reporter: ReportHandler,

    /// Literal input consumed by `next_data`
    data: Box<dyn DataSource>,

    config: ExecConfig,
}

impl<B> ExecState<B> {
    /// Create an empty execution state
    pub fn new(config: ExecConfig) -> Self {
        let reporter = if config.report_liveness {
            ReportHandler::Stdout
        } else {
            ReportHandler::Silent
        };
        Self::with_reporter(config, reporter)
    }

    /// Create an empty execution state delivering notifications to `reporter`
    pub fn with_reporter(config: ExecConfig, reporter: ReportHandler) -> Self {
        ExecState {
            globals: GlobalTable::new(),
            heap: Heap::new(),
            liveness: LivenessTracker::new(),
            stack: CallStack::new(),
            functions: FunctionRegistry::new(),
            reporter,
            data: Box::new(DataScanner::empty()),
            config,
        }
    }

    /// Replace the literal input source
    pub fn with_data(mut self, data: impl DataSource + 'static) -> Self {
        self.data = Box::new(data);
        self
    }

    // Declarations and lookup

    /// Declare a variable in the innermost scope, or globally at top level
    pub fn declare(&mut self, name: &str, kind: CellKind) {
        trace!(name, %kind, depth = self.stack.depth(), "declare");
        match self.stack.current_frame_mut() {
            Some(frame) => frame.innermost_mut().declare(name, kind),
            None => self.globals.declare(name, kind),
        }
    }

    /// Find the cell bound to `name` in the current frame, then the globals
    pub fn resolve(&self, name: &str) -> Result<&Cell, RuntimeError> {
        self.stack
            .current_frame()
            .and_then(|frame| frame.lookup(name))
            .or_else(|| self.globals.get(name))
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                name: name.to_string(),
            })
    }

    pub fn kind_of(&self, name: &str) -> Result<CellKind, RuntimeError> {
        self.resolve(name).map(Cell::kind)
    }

    // Value access

    /// Read a variable, dereferencing through the heap for refs
    pub fn read(&self, name: &str) -> Result<Word, RuntimeError> {
        let cell = self.resolve(name)?;
        match cell.kind() {
            CellKind::Int => Ok(cell.value.unwrap_or_default()),
            CellKind::Ref => cell
                .handle()
                .and_then(|handle| self.heap.read(handle))
                .ok_or_else(|| RuntimeError::InvalidHeapRead {
                    name: name.to_string(),
                }),
        }
    }

    /// Write a variable, storing through the heap for refs
    pub fn write(&mut self, name: &str, value: Word) -> Result<(), RuntimeError> {
        let cell = lookup_mut(&mut self.stack, &mut self.globals, name)?;
        match cell.kind() {
            CellKind::Int => {
                cell.value = Some(value);
                Ok(())
            }
            CellKind::Ref => {
                let written = cell
                    .handle()
                    .is_some_and(|handle| self.heap.write(handle, value));
                if written {
                    Ok(())
                } else {
                    Err(RuntimeError::InvalidHeapWrite {
                        name: name.to_string(),
                    })
                }
            }
        }
    }

    /// Bind a ref variable to a fresh heap slot (`x = new`)
    pub fn heap_allocate(&mut self, name: &str) -> Result<Handle, RuntimeError> {
        let cell = lookup_mut(&mut self.stack, &mut self.globals, name)?;
        if !cell.is_ref() {
            return Err(RuntimeError::NotARef {
                name: name.to_string(),
            });
        }

        let word = handle_to_word(self.heap.len()).ok_or(RuntimeError::HeapExhausted)?;
        let handle = self.heap.allocate();
        cell.value = Some(word);
        self.liveness.track_live(handle);
        debug!(name, handle, heap_len = self.heap.len(), "heap allocate");

        self.recompute();
        Ok(handle)
    }

    /// Copy the raw value of `src` into `dst` (`dst = share src`)
    ///
    /// Liveness flags are left untouched: aliasing does not count.
    pub fn reference_copy(&mut self, dst: &str, src: &str) -> Result<(), RuntimeError> {
        let value = self.resolve(src)?.value;
        let cell = lookup_mut(&mut self.stack, &mut self.globals, dst)?;
        cell.value = value;
        trace!(dst, src, ?value, "reference copy");
        Ok(())
    }

    /// Pull the next literal from the data source
    pub fn next_data(&mut self) -> Result<Word, RuntimeError> {
        if self.data.is_at_end() {
            return Err(RuntimeError::DataExhausted);
        }
        let value = self.data.current();
        self.data.advance();
        Ok(value)
    }

    // Scopes and frames

    /// Enter a block in the current frame
    pub fn push_scope(&mut self) -> Result<(), RuntimeError> {
        let frame = self
            .stack
            .current_frame_mut()
            .ok_or(RuntimeError::NoStackFrame {
                operation: "push_scope",
            })?;
        frame.push_scope();
        trace!(scope_depth = frame.scope_depth(), "push scope");
        Ok(())
    }

    /// Leave a block, clearing the flags of refs declared in it
    pub fn pop_scope(&mut self) -> Result<(), RuntimeError> {
        let frame = self
            .stack
            .current_frame_mut()
            .ok_or(RuntimeError::NoStackFrame {
                operation: "pop_scope",
            })?;
        let scope = match frame.pop_scope() {
            Some(scope) => scope,
            None => {
                return Err(RuntimeError::ScopeUnderflow {
                    function: frame.function_name.clone(),
                })
            }
        };
        trace!(scope_depth = frame.scope_depth(), "pop scope");

        self.release(&scope);
        self.recompute();
        Ok(())
    }

    /// Push a frame with one empty scope (program body, scopeless calls)
    pub fn push_frame(&mut self) -> Result<(), RuntimeError> {
        self.check_call_depth()?;
        self.stack.push_frame(CallFrame::new(ANONYMOUS_FRAME));
        debug!(depth = self.stack.depth(), "push frame");
        Ok(())
    }

    /// Push a frame for a call to `function`
    ///
    /// Each formal becomes a new ref cell holding the raw value of the
    /// matching actual, resolved in the caller's context. The raw value is
    /// copied whatever the actual's kind is.
    ///
    /// The frame gets two scopes: the parameters, then an empty body scope,
    /// so a body local shadows a formal instead of replacing it.
    pub fn push_call_frame<S: AsRef<str>>(
        &mut self,
        function: &str,
        formals: &[S],
        actuals: &[S],
    ) -> Result<(), RuntimeError> {
        if formals.len() != actuals.len() {
            return Err(RuntimeError::ArgumentCountMismatch {
                function: function.to_string(),
                expected: formals.len(),
                got: actuals.len(),
            });
        }
        self.check_call_depth()?;

        let mut params = Scope::new();
        for (formal, actual) in formals.iter().zip(actuals) {
            let value = self.resolve(actual.as_ref())?.value;
            params.bind(formal.as_ref(), Cell::with_raw_ref(value));
        }

        let mut frame = CallFrame::with_scope(function, params);
        frame.push_scope();
        self.stack.push_frame(frame);
        debug!(function, depth = self.stack.depth(), "push call frame");
        Ok(())
    }

    /// Pop the current frame, clearing the flags of every ref it owned
    pub fn pop_frame(&mut self) -> Result<(), RuntimeError> {
        let frame = self.stack.pop_frame().ok_or(RuntimeError::NoStackFrame {
            operation: "pop_frame",
        })?;
        debug!(
            function = %frame.function_name,
            depth = self.stack.depth(),
            "pop frame"
        );

        for scope in frame.scopes() {
            self.release(scope);
        }
        self.recompute();
        Ok(())
    }

    // Function registry

    pub fn register(&mut self, name: &str, formals: Vec<String>, body: B) {
        debug!(name, arity = formals.len(), "register function");
        self.functions.register(name, formals, body);
    }

    pub fn lookup_formals(&self, name: &str) -> Result<&[String], RuntimeError> {
        self.functions.formals(name)
    }

    pub fn lookup_body(&self, name: &str) -> Result<&B, RuntimeError> {
        self.functions.body(name)
    }

    // Liveness

    /// Recount live handles and notify if the count changed
    pub fn recompute(&mut self) {
        if let Some(reachable) = self.liveness.recompute() {
            debug!(reachable, "reachable count changed");
            self.reporter.notify(reachable);
        }
    }

    fn release(&mut self, scope: &Scope) {
        for raw in scope.bound_refs() {
            self.liveness.mark_dead(raw);
        }
    }

    fn check_call_depth(&self) -> Result<(), RuntimeError> {
        if self.stack.depth() >= self.config.max_call_depth {
            return Err(RuntimeError::CallDepthExceeded {
                limit: self.config.max_call_depth,
            });
        }
        Ok(())
    }

    // Inspection

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn liveness(&self) -> &LivenessTracker {
        &self.liveness
    }

    pub fn stack(&self) -> &CallStack {
        &self.stack
    }

    pub fn globals(&self) -> &GlobalTable {
        &self.globals
    }

    pub fn functions(&self) -> &FunctionRegistry<B> {
        &self.functions
    }

    pub fn reporter(&self) -> &ReportHandler {
        &self.reporter
    }

    pub fn config(&self) -> &ExecConfig {
        &self.config
    }

    /// Last reported reachable count
    pub fn reachable_count(&self) -> usize {
        self.liveness.reachable()
    }

    pub fn call_depth(&self) -> usize {
        self.stack.depth()
    }

    /// Scope depth of the current frame, `None` at top level
    pub fn scope_depth(&self) -> Option<usize> {
        self.stack.current_frame().map(CallFrame::scope_depth)
    }
}

/// Mutable lookup over disjoint fields so the heap stays borrowable
fn lookup_mut<'a>(
    stack: &'a mut CallStack,
    globals: &'a mut GlobalTable,
    name: &str,
) -> Result<&'a mut Cell, RuntimeError> {
    let local = match stack.current_frame_mut() {
        Some(frame) => frame.lookup_mut(name),
        None => None,
    };
    local
        .or_else(|| globals.get_mut(name))
        .ok_or_else(|| RuntimeError::UndefinedVariable {
            name: name.to_string(),
        })
}

/// Handles must fit in a cell's `Word`; `None` once the heap outgrows it
fn handle_to_word(handle: Handle) -> Option<Word> {
    Word::try_from(handle).ok()
}
