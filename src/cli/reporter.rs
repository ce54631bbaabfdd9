use colored::Colorize;
use usefront_common::LineMap;

use crate::{ParseError, SkippedNode};

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// `file(line,col) - error TS1005: ';' expected.` followed by the
    /// offending source line with the error span underlined.
    pub fn format_parse_error(&self, error: &ParseError, source: &str) -> String {
        let mut output = format!(
            "{}({},{}) - {} {}: {}",
            error.file_name,
            error.line,
            error.column,
            self.paint_error("error"),
            self.paint_code(error.code()),
            error.diagnostic.message_text
        );
        output.push_str(&self.format_snippet(
            source,
            error.line,
            error.column,
            error.diagnostic.length,
        ));
        output
    }

    /// `file(line,col) - skipped: reason`
    pub fn format_skipped(
        &self,
        file: &str,
        source: &str,
        line_map: &LineMap,
        skipped: &SkippedNode,
    ) -> String {
        let position = line_map.offset_to_position(skipped.pos, source);
        let label = if self.color {
            "skipped".yellow().bold().to_string()
        } else {
            "skipped".to_string()
        };
        format!(
            "{}({},{}) - {}: {}",
            file,
            position.line + 1,
            position.character + 1,
            label,
            skipped.reason
        )
    }

    pub fn format_summary(
        &self,
        files: usize,
        declarations: usize,
        calls: usize,
        failures: usize,
    ) -> String {
        let noun = if files == 1 { "file" } else { "files" };
        let mut summary = format!(
            "{files} {noun}: {declarations} declarations and {calls} setter calls rewritten"
        );
        if failures > 0 {
            let failed = format!("{failures} failed to parse");
            summary.push_str(", ");
            if self.color {
                summary.push_str(&failed.red().to_string());
            } else {
                summary.push_str(&failed);
            }
        }
        summary
    }

    /// Source line (1-based `line`) with a `~` underline from `column`.
    fn format_snippet(&self, source: &str, line: u32, column: u32, length: u32) -> String {
        let line_map = LineMap::build(source);
        let line_text = line_map.line_text(line.saturating_sub(1), source);
        if line_text.is_empty() {
            return String::new();
        }

        let start = column.saturating_sub(1) as usize;
        let mut underline = String::new();
        for ch in line_text.chars().take(start) {
            underline.push_str(if ch == '\t' { "    " } else { " " });
        }
        let available = line_text.chars().count().saturating_sub(start);
        let width = (length as usize).clamp(1, available.max(1));
        underline.push_str(&"~".repeat(width));

        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        let line_text = line_text.replace('\t', "    ");
        format!("\n  {line:>3}   {line_text}\n        {underline}")
    }

    fn paint_error(&self, label: &str) -> String {
        if self.color {
            label.red().bold().to_string()
        } else {
            label.to_string()
        }
    }

    fn paint_code(&self, code: u32) -> String {
        let label = format!("TS{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}
