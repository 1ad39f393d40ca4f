//! Run log - owned diagnostic log for one extraction run
//!
//! The log is threaded explicitly through the orchestrator and returned with
//! the run report; it is never shared process state. Content is advisory and
//! human-readable, not machine-parsed. Notable events are mirrored to
//! `tracing` for operators who have a subscriber installed.

use chrono::{DateTime, Utc};
use std::fmt;

/// Severity of a run log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Normal progress message
    Info,
    /// Recoverable problem (a skipped chunk, a salvaged response)
    Warn,
}

/// One timestamped diagnostic message
#[derive(Debug, Clone, PartialEq)]
pub struct RunLogEntry {
    /// When the message was recorded
    pub timestamp: DateTime<Utc>,

    /// Severity
    pub level: LogLevel,

    /// The message
    pub message: String,
}

/// Diagnostic log for one extraction run
#[derive(Debug, Clone, Default)]
pub struct RunLog {
    entries: Vec<RunLogEntry>,
}

impl RunLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a progress message
    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.entries.push(RunLogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Info,
            message,
        });
    }

    /// Record a recoverable problem
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.entries.push(RunLogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Warn,
            message,
        });
    }

    /// All entries, in recording order
    pub fn entries(&self) -> &[RunLogEntry] {
        &self.entries
    }

    /// Render the log as one line per entry
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RunLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            let level = match entry.level {
                LogLevel::Info => "INFO",
                LogLevel::Warn => "WARN",
            };
            writeln!(
                f,
                "{} {} {}",
                entry.timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
                level,
                entry.message
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_records_in_order() {
        let mut log = RunLog::new();
        log.info("started");
        log.warn("chunk 2 skipped");
        log.info("finished");

        let entries = log.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "started");
        assert_eq!(entries[1].level, LogLevel::Warn);
    }

    #[test]
    fn test_render_one_line_per_entry() {
        let mut log = RunLog::new();
        log.info("alpha");
        log.warn("beta");

        let rendered = log.render();
        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.contains("INFO alpha"));
        assert!(rendered.contains("WARN beta"));
    }

    #[test]
    fn test_empty_log_renders_empty() {
        assert_eq!(RunLog::new().render(), "");
    }
}
