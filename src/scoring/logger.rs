//! Match event logger
//!
//! Every scoring transition goes through one `MatchLogger`. Messages are
//! filtered by verbosity, printed as text or JSON lines, and can be
//! captured in memory instead of (or as well as) going to stdout.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::ops::Deref;

/// Verbosity level for match output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output during the match
    Silent = 0,
    /// Minimal - sets and the match result
    Minimal = 1,
    /// Normal - games as well (default)
    #[default]
    Normal = 2,
    /// Verbose - every point
    Verbose = 3,
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A captured log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    /// Optional category (e.g. "point", "game", "set", "match")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Read-only access to captured entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> LogGuard<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.guard.iter()
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

pub struct MatchLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl MatchLogger {
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        MatchLogger {
            verbosity,
            output_format: OutputFormat::default(),
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Capture to memory only, suppressing stdout
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    pub fn clear_logs(&mut self) {
        self.log_buffer.borrow_mut().clear();
    }

    /// Captured entries the verbosity lets through, keeping only the last `tail_lines`
    ///
    /// Returns the entries and how many earlier visible ones were dropped.
    pub fn tail(&self, tail_lines: usize) -> (Vec<LogEntry>, usize) {
        let visible: Vec<LogEntry> = self
            .log_buffer
            .borrow()
            .iter()
            .filter(|entry| entry.level <= self.verbosity)
            .cloned()
            .collect();
        let elided = visible.len().saturating_sub(tail_lines);
        (visible.into_iter().skip(elided).collect(), elided)
    }

    /// Print the last `tail_lines` visible captured entries, then clear
    pub fn flush_tail(&mut self, tail_lines: usize) {
        let (entries, elided) = self.tail(tail_lines);
        if elided > 0 && self.output_format == OutputFormat::Text {
            println!("... {elided} earlier events not shown ...");
        }
        for entry in &entries {
            self.write_stdout(entry);
        }
        self.clear_logs();
    }

    fn write_stdout(&self, entry: &LogEntry) {
        match self.output_format {
            OutputFormat::Text => {
                if entry.level == VerbosityLevel::Minimal {
                    println!("{}", entry.message);
                } else {
                    println!("  {}", entry.message);
                }
            }
            OutputFormat::Json => match serde_json::to_string(entry) {
                Ok(line) => println!("{line}"),
                Err(e) => eprintln!("failed to encode log entry: {e}"),
            },
        }
    }

    fn log(&self, level: VerbosityLevel, category: &str, message: &str) {
        if level == VerbosityLevel::Silent {
            return;
        }
        let should_capture = self.is_capturing();
        let should_output = matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both)
            && level <= self.verbosity;

        if !should_capture && !should_output {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            category: Some(category.to_string()),
        };
        if should_output {
            self.write_stdout(&entry);
        }
        if should_capture {
            self.log_buffer.borrow_mut().push(entry);
        }
    }

    /// Log a scoring event with a category tag
    #[inline]
    pub fn event(&self, level: VerbosityLevel, category: &str, message: &str) {
        self.log(level, category, message);
    }
}

impl Default for MatchLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MatchLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let logger = MatchLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert!(!logger.is_capturing());
    }

    #[test]
    fn test_log_capture() {
        let mut logger = MatchLogger::new();
        logger.enable_capture();

        logger.event(VerbosityLevel::Normal, "game", "game won");
        logger.event(VerbosityLevel::Minimal, "set", "set won");
        logger.event(VerbosityLevel::Verbose, "point", "15-0");

        let logs = logger.logs();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].message, "game won");
        assert_eq!(logs[1].level, VerbosityLevel::Minimal);
        assert_eq!(logs[2].category.as_deref(), Some("point"));
    }

    #[test]
    fn test_silent_messages_are_dropped() {
        let mut logger = MatchLogger::with_verbosity(VerbosityLevel::Verbose);
        logger.enable_capture();
        logger.event(VerbosityLevel::Silent, "point", "never seen");
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_tail_skips_hidden_levels() {
        let mut logger = MatchLogger::with_verbosity(VerbosityLevel::Normal);
        logger.enable_capture();
        for i in 0..5 {
            logger.event(VerbosityLevel::Normal, "game", &format!("game {i}"));
            logger.event(VerbosityLevel::Verbose, "point", &format!("point {i}"));
        }
        logger.event(VerbosityLevel::Minimal, "match", "match over");

        let (entries, elided) = logger.tail(2);
        assert_eq!(elided, 4);
        let messages: Vec<_> = entries.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["game 4", "match over"]);

        let (all, none_elided) = logger.tail(50);
        assert_eq!(all.len(), 6);
        assert_eq!(none_elided, 0);
    }

    #[test]
    fn test_flush_tail_clears() {
        let mut logger = MatchLogger::with_verbosity(VerbosityLevel::Silent);
        logger.enable_capture();
        for i in 0..10 {
            logger.event(VerbosityLevel::Normal, "game", &format!("line {i}"));
        }
        assert_eq!(logger.logs().len(), 10);
        logger.flush_tail(3);
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_log_entry_json() {
        let entry = LogEntry {
            level: VerbosityLevel::Minimal,
            message: "Set 1 to Alice 6-4".to_string(),
            category: Some("set".to_string()),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"level":"Minimal","message":"Set 1 to Alice 6-4","category":"set"}"#
        );
    }
}
