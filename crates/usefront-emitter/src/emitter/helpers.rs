use super::Printer;
use usefront_parser::{NodeIndex, NodeList};

impl<'a> Printer<'a> {
    // =========================================================================
    // Output Helpers (delegate to SourceWriter)
    // =========================================================================

    /// Write text to output.
    pub(super) fn write(&mut self, text: &str) {
        self.writer.write(text);
    }

    pub(super) fn write_char(&mut self, ch: char) {
        self.writer.write_char(ch);
    }

    /// Write a newline.
    pub(super) fn write_line(&mut self) {
        self.writer.write_line();
    }

    /// Write a space.
    pub(super) fn write_space(&mut self) {
        self.writer.write_space();
    }

    pub(super) fn write_semicolon(&mut self) {
        self.write(";");
    }

    /// Increase indentation.
    pub(super) fn increase_indent(&mut self) {
        self.writer.increase_indent();
    }

    /// Decrease indentation.
    pub(super) fn decrease_indent(&mut self) {
        self.writer.decrease_indent();
    }

    // =========================================================================
    // Identifier Helpers
    // =========================================================================

    pub(super) fn write_identifier_text(&mut self, index: NodeIndex) {
        let arena = self.arena;
        if let Some(text) = arena.identifier_text(index) {
            self.write(text);
        }
    }

    // =========================================================================
    // Lists
    // =========================================================================

    /// Emit `nodes` separated by `", "` using `emit` for each element.
    pub(super) fn emit_comma_list(&mut self, list: &NodeList, emit: fn(&mut Self, NodeIndex)) {
        for (i, &node) in list.nodes.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            emit(self, node);
        }
    }

    // =========================================================================
    // Line retention
    // =========================================================================

    /// Zero-based source line of a node's start, `None` for synthesized
    /// nodes or when lines are not retained.
    pub(super) fn source_line_of(&self, index: NodeIndex) -> Option<u32> {
        let line_map = self.line_map.as_ref()?;
        let range = self.arena.range(index);
        (!range.is_synthesized()).then(|| line_map.line_of(range.pos))
    }

    /// Zero-based source line of a node's last character.
    pub(super) fn source_end_line_of(&self, index: NodeIndex) -> Option<u32> {
        let line_map = self.line_map.as_ref()?;
        let range = self.arena.range(index);
        (!range.is_synthesized()).then(|| line_map.line_of(range.end.saturating_sub(1)))
    }

    /// Move the output to `line`: pad with newlines when it lies ahead,
    /// otherwise separate from what is already on the current line.
    pub(super) fn move_to_line(&mut self, line: Option<u32>) {
        let current = self.writer.current_line();
        match line {
            Some(target) if target > current => {
                for _ in current..target {
                    self.write_line();
                }
            }
            _ => {
                if !self.writer.is_at_line_start() {
                    self.write_space();
                }
            }
        }
    }
}
