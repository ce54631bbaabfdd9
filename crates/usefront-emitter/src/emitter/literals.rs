use super::Printer;
use usefront_parser::parser::node::{LiteralData, TemplateExprData};

impl<'a> Printer<'a> {
    // =========================================================================
    // Literals
    // =========================================================================

    /// Numbers keep their source spelling (`0x1F`, `1_000`, `10n`).
    pub(super) fn emit_numeric_literal(&mut self, lit: &LiteralData) {
        if lit.raw_text.is_empty() {
            self.write(&lit.text);
        } else {
            self.write(&lit.raw_text);
        }
    }

    /// Parsed strings are written exactly as they appeared, quotes and
    /// escapes included. Synthesized strings get double quotes.
    pub(super) fn emit_string_literal(&mut self, lit: &LiteralData) {
        if !lit.raw_text.is_empty() {
            self.write(&lit.raw_text);
            return;
        }
        self.write_char('"');
        self.emit_escaped_string(&lit.text, '"');
        self.write_char('"');
    }

    /// Literal pieces are raw text; only the substitutions are reprinted.
    pub(super) fn emit_template_expression(&mut self, template: &TemplateExprData) {
        self.write_char('`');
        self.write(&template.head);
        for span in &template.spans {
            self.write("${");
            self.emit_expression(span.expression);
            self.write_char('}');
            self.write(&span.literal);
        }
        self.write_char('`');
    }

    pub(super) fn emit_escaped_string(&mut self, s: &str, quote_char: char) {
        for ch in s.chars() {
            match ch {
                '\n' => self.write("\\n"),
                '\r' => self.write("\\r"),
                '\t' => self.write("\\t"),
                '\\' => self.write("\\\\"),
                '\0' => self.write("\\0"),
                c if c == quote_char => {
                    self.write_char('\\');
                    self.write_char(c);
                }
                c if (c as u32) < 0x20 || c == '\x7F' => {
                    self.write(&format!("\\u{:04X}", c as u32));
                }
                c => self.write_char(c),
            }
        }
    }
}
