//! Output buffer with indentation and line tracking.
//!
//! Indentation is written lazily: `write_line` only records that the next
//! non-empty write starts a new line, so trailing whitespace never appears.

use memchr::memchr_iter;
use usefront_common::limits::INDENT_WIDTH;

#[derive(Debug)]
pub struct SourceWriter {
    output: String,
    indent_level: usize,
    /// Zero-based line the next write lands on
    line: u32,
    at_line_start: bool,
}

impl Default for SourceWriter {
    fn default() -> Self {
        SourceWriter::new()
    }
}

impl SourceWriter {
    pub fn new() -> Self {
        SourceWriter {
            output: String::new(),
            indent_level: 0,
            line: 0,
            at_line_start: true,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        SourceWriter {
            output: String::with_capacity(capacity),
            ..SourceWriter::new()
        }
    }

    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            self.write_indent();
            self.at_line_start = false;
        }
        self.line += memchr_iter(b'\n', text.as_bytes()).count() as u32;
        self.output.push_str(text);
    }

    pub fn write_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.write(ch.encode_utf8(&mut buf));
    }

    pub fn write_space(&mut self) {
        self.write(" ");
    }

    pub fn write_line(&mut self) {
        self.output.push('\n');
        self.line += 1;
        self.at_line_start = true;
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level * INDENT_WIDTH {
            self.output.push(' ');
        }
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn current_line(&self) -> u32 {
        self.line
    }

    pub fn is_at_line_start(&self) -> bool {
        self.at_line_start
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn get_output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indentation_is_written_lazily() {
        let mut writer = SourceWriter::new();
        writer.write("{");
        writer.increase_indent();
        writer.write_line();
        writer.write("a;");
        writer.decrease_indent();
        writer.write_line();
        writer.write("}");
        assert_eq!(writer.get_output(), "{\n  a;\n}");
        assert_eq!(writer.current_line(), 2);
    }

    #[test]
    fn blank_lines_have_no_trailing_whitespace() {
        let mut writer = SourceWriter::new();
        writer.increase_indent();
        writer.write_line();
        writer.write_line();
        writer.write("x");
        assert_eq!(writer.into_output(), "\n\n  x");
    }

    #[test]
    fn embedded_newlines_advance_line() {
        let mut writer = SourceWriter::new();
        writer.write("'a\\\nb'");
        assert_eq!(writer.current_line(), 1);
        assert!(!writer.is_at_line_start());
    }
}
