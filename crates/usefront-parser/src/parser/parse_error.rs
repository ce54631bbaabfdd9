use usefront_common::{Diagnostic, LineMap};

/// Fatal parse failure. Parsing stops at the first error.
///
/// `line` and `column` are 1-based, as printed by editors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "{}({},{}): error TS{}: {}",
    .file_name,
    .line,
    .column,
    .diagnostic.code,
    .diagnostic.message_text
)]
pub struct ParseError {
    pub file_name: String,
    pub diagnostic: Diagnostic,
    pub line: u32,
    pub column: u32,
}

impl ParseError {
    pub fn new(diagnostic: Diagnostic, source_text: &str) -> Self {
        let line_map = LineMap::build(source_text);
        let position = line_map.offset_to_position(diagnostic.start, source_text);
        ParseError {
            file_name: diagnostic.file.clone(),
            line: position.line + 1,
            column: position.character + 1,
            diagnostic,
        }
    }

    pub fn code(&self) -> u32 {
        self.diagnostic.code
    }
}
