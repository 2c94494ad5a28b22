// ─── Reporting ───
// User-facing progress output. The driver talks to a `Reporter`; whether
// lines are coloured is decided once, when the console reporter is built.

use std::sync::Mutex;

use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Start of an entry or a phase.
    Heading,
    Info,
    Success,
    Warning,
    Error,
}

pub trait Reporter: Send + Sync {
    fn emit(&self, level: Level, message: &str);

    fn heading(&self, message: &str) {
        self.emit(Level::Heading, message);
    }

    fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    fn success(&self, message: &str) {
        self.emit(Level::Success, message);
    }

    fn warning(&self, message: &str) {
        self.emit(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }
}

/// Writes to stdout, optionally with ANSI colours.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    color: bool,
}

impl ConsoleReporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, level: Level, message: &str) -> String {
        if !self.color {
            return message.to_string();
        }
        match level {
            Level::Heading => message.cyan().to_string(),
            Level::Info => message.to_string(),
            Level::Success => message.green().to_string(),
            Level::Warning => message.yellow().to_string(),
            Level::Error => message.red().to_string(),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn emit(&self, level: Level, message: &str) {
        println!("{}", self.paint(level, message));
    }
}

/// Keeps every message in memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    messages: Mutex<Vec<(Level, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Messages emitted at `level`, in order.
    pub fn at(&self, level: Level) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn emit(&self, level: Level, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((level, message.to_string()));
        }
    }
}
