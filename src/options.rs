use usefront_emitter::transforms::use_state::{RewriteReport, StateSymbolTable, VisitorSet};

/// Name used in parse errors when the caller doesn't give one.
pub const DEFAULT_FILE_NAME: &str = "input.js";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransformOptions {
    /// File name reported in parse errors
    pub file_name: String,
    pub visitors: VisitorSet,
    /// Keep statements on their original lines
    pub retain_lines: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        TransformOptions {
            file_name: DEFAULT_FILE_NAME.to_string(),
            visitors: VisitorSet::default(),
            retain_lines: false,
        }
    }
}

impl TransformOptions {
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }
}

#[derive(Debug)]
pub struct TransformOutput {
    pub code: String,
    pub report: RewriteReport,
    /// Setters registered during the run
    pub symbols: StateSymbolTable,
}
