//! Line-oriented output sinks.
//!
//! Banners, help text and verbose traces are written one line at a time to
//! a [`LineSink`]. [`ConsoleSink`] writes to standard output,
//! [`StderrSink`] to standard error, and [`MemorySink`] keeps the lines for
//! later inspection.

use std::{cell::RefCell, rc::Rc};

/// Something that accepts lines of text.
pub trait LineSink {
    /// Write a single line. The sink adds the line terminator.
    fn write_line(&mut self, line: &str);
}

impl LineSink for Vec<String> {
    fn write_line(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// Writes lines to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl LineSink for ConsoleSink {
    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Writes lines to standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl LineSink for StderrSink {
    fn write_line(&mut self, line: &str) {
        eprintln!("{line}");
    }
}

/// Collects lines in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Rc<RefCell<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Everything written so far, joined with newlines.
    pub fn contents(&self) -> String {
        self.lines.borrow().join("\n")
    }
}

impl LineSink for MemorySink {
    fn write_line(&mut self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_clones_share_buffer() {
        let sink = MemorySink::new();
        let mut writer = sink.clone();

        writer.write_line("first");
        writer.write_line("second");

        assert_eq!(sink.lines(), ["first", "second"]);
        assert_eq!(sink.contents(), "first\nsecond");
    }

    #[test]
    fn test_vec_sink() {
        let mut lines: Vec<String> = Vec::new();
        lines.write_line("hello");
        assert_eq!(lines, ["hello"]);
    }
}
