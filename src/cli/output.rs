//! Handles all user-facing output for the CLI.
//!
//! Library code never prints directly; it emits lines through an
//! [`OutputSink`]. The binaries hand in a [`StdoutSink`], tests hand in an
//! [`OutputBuffer`] and assert on what was captured.

// ============================================================================
// OUTPUT SINKS: OutputBuffer and StdoutSink implementations
// ============================================================================

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Destination for operator-facing status lines.
pub trait OutputSink {
    fn emit(&mut self, text: &str);
}

/// OutputBuffer: collects output into a String for testing or programmatic capture.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    pub buffer: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn lines(&self) -> Vec<&str> {
        self.buffer.lines().collect()
    }
}

impl OutputSink for OutputBuffer {
    fn emit(&mut self, text: &str) {
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer.push_str(text);
    }
}

/// StdoutSink: writes output to stdout, uncolored.
///
/// Harness logs scrape these lines, so they stay plain text.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, text: &str) {
        println!("{}", text);
    }
}

// ============================================================================
// CORE OUTPUT FUNCTIONS: User-facing CLI output utilities
// ============================================================================

/// Color policy for stdout: colored only when attached to a terminal.
pub fn stdout_color_choice() -> ColorChoice {
    if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// StatusSink: writes to one stdout stream, the leading word in bold green.
///
/// `Wrote plots/a.svg` prints `Wrote` highlighted when stdout is a terminal.
pub struct StatusSink {
    stream: StandardStream,
}

impl StatusSink {
    pub fn stdout() -> Self {
        Self {
            stream: StandardStream::stdout(stdout_color_choice()),
        }
    }
}

impl OutputSink for StatusSink {
    fn emit(&mut self, text: &str) {
        let (label, detail) = split_label(text);
        let _ = self
            .stream
            .set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
        let _ = write!(self.stream, "{}", label);
        let _ = self.stream.reset();
        let _ = writeln!(self.stream, "{}", detail);
    }
}

fn split_label(text: &str) -> (&str, &str) {
    match text.find(' ') {
        Some(at) => text.split_at(at),
        None => (text, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_joins_lines_with_newlines() {
        let mut out = OutputBuffer::new();
        out.emit("first");
        out.emit("second");
        assert_eq!(out.as_str(), "first\nsecond");
        assert_eq!(out.lines(), vec!["first", "second"]);
    }

    #[test]
    fn status_label_is_the_leading_word() {
        assert_eq!(split_label("Wrote plots/a.svg"), ("Wrote", " plots/a.svg"));
        assert_eq!(split_label("Done"), ("Done", ""));
    }

    #[test]
    fn empty_buffer_has_no_lines() {
        let out = OutputBuffer::new();
        assert!(out.as_str().is_empty());
        assert!(out.lines().is_empty());
    }
}
