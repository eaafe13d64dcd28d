//! Execution configuration

use super::constants::DEFAULT_MAX_CALL_DEPTH;

/// Options for an [`ExecState`](super::engine::ExecState) run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecConfig {
    /// Write a `gc:<count>` line whenever the reachable count changes.
    /// The count is tracked either way.
    pub report_liveness: bool,
    /// Maximum number of active call frames before the run is aborted.
    pub max_call_depth: usize,
}

impl ExecConfig {
    pub fn quiet(mut self) -> Self {
        self.report_liveness = false;
        self
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}

impl Default for ExecConfig {
    fn default() -> Self {
        ExecConfig {
            report_liveness: true,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}
