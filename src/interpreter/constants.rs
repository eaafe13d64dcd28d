// Constants for the interpreter

/// Prefix of the liveness-change notification line (`gc:<count>`)
pub const GC_REPORT_PREFIX: &str = "gc:";

/// Default limit on the number of simultaneously active call frames
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1_000;

/// Host stack reserved per script call level when running on a dedicated thread
pub const STACK_BYTES_PER_CALL: usize = 32 * 1024;

/// Smallest stack given to the interpreter thread
pub const MIN_INTERPRETER_STACK: usize = 32 * 1024 * 1024;

/// Frame name used for the zero-argument frame push (program body, scopeless calls)
pub const ANONYMOUS_FRAME: &str = "<block>";
