//! User-facing success and error messages
//!
//! Diagnostics go through [`Reporter`] so that a verification failure is
//! rendered once, where it is detected, and callers only decide pass/fail.

use std::cell::RefCell;
use std::rc::Rc;

use colored::Colorize;

/// Sink for messages addressed to the user rather than the log.
pub trait Reporter {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Writes successes to stdout and errors to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn success(&self, message: &str) {
        println!("{} {}", "OK".green().bold(), message);
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "error".red().bold(), message);
    }
}

/// A message captured by [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Success(String),
    Error(String),
}

/// Keeps messages in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    messages: Rc<RefCell<Vec<Message>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter_map(|m| match m {
                Message::Error(text) => Some(text.clone()),
                Message::Success(_) => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn success(&self, message: &str) {
        self.messages
            .borrow_mut()
            .push(Message::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.messages
            .borrow_mut()
            .push(Message::Error(message.to_string()));
    }
}
