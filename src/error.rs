use usefront_parser::ParseError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// The input is not valid JavaScript (or uses unsupported syntax).
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl TransformError {
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            TransformError::Parse(error) => Some(error),
        }
    }
}
