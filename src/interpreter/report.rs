//! Liveness notification sink
//!
//! The reachable-count notification can be directed to different destinations:
//! - Stdout: one `gc:<count>` line per change (default)
//! - Buffer: counts captured in order, for tests and tooling
//! - Silent: dropped
//!
//! The engine decides *when* to notify; the handler only delivers.

use super::constants::GC_REPORT_PREFIX;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReportHandler {
    #[default]
    Stdout,
    Buffer(Vec<usize>),
    Silent,
}

impl ReportHandler {
    /// Handler that captures counts instead of printing them
    pub fn buffer() -> Self {
        ReportHandler::Buffer(Vec::new())
    }

    /// Deliver one reachable-count change
    pub fn notify(&mut self, reachable: usize) {
        match self {
            ReportHandler::Stdout => println!("{}", format_report(reachable)),
            ReportHandler::Buffer(counts) => counts.push(reachable),
            ReportHandler::Silent => {}
        }
    }

    /// Counts captured so far (always empty for stdout and silent handlers)
    pub fn captured(&self) -> &[usize] {
        match self {
            ReportHandler::Buffer(counts) => counts,
            _ => &[],
        }
    }

    /// Captured counts rendered as the lines stdout would have shown
    pub fn captured_lines(&self) -> Vec<String> {
        self.captured().iter().map(|&n| format_report(n)).collect()
    }
}

pub fn format_report(reachable: usize) -> String {
    format!("{GC_REPORT_PREFIX}{reachable}")
}
