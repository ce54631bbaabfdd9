//! Diagnostics reported by the scanner and parser.
//!
//! Codes and message templates follow the TypeScript numbering so that
//! messages look familiar to anyone who has read `tsc` output.

use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

impl DiagnosticCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Message => "message",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const TOKEN_EXPECTED: u32 = 1005;
    pub const ASTERISK_SLASH_EXPECTED: u32 = 1010;
    pub const EXPRESSION_EXPECTED: u32 = 1109;
    pub const HEXADECIMAL_DIGIT_EXPECTED: u32 = 1125;
    pub const INVALID_CHARACTER: u32 = 1127;
    pub const DECLARATION_OR_STATEMENT_EXPECTED: u32 = 1128;
    pub const UNTERMINATED_TEMPLATE_LITERAL: u32 = 1160;
    pub const BINARY_DIGIT_EXPECTED: u32 = 1177;
    pub const OCTAL_DIGIT_EXPECTED: u32 = 1178;
    pub const UNSUPPORTED_SYNTAX: u32 = 18_004;
    pub const MAXIMUM_NESTING_DEPTH_EXCEEDED: u32 = 18_005;
}

pub mod diagnostic_messages {
    use super::{DiagnosticCategory, DiagnosticMessage, diagnostic_codes};

    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        category: DiagnosticCategory::Error,
        message: "Unterminated string literal.",
    };
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::IDENTIFIER_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "Identifier expected.",
    };
    pub const TOKEN_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::TOKEN_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "'{0}' expected.",
    };
    pub const ASTERISK_SLASH_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::ASTERISK_SLASH_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "'*/' expected.",
    };
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::EXPRESSION_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "Expression expected.",
    };
    pub const HEXADECIMAL_DIGIT_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::HEXADECIMAL_DIGIT_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "Hexadecimal digit expected.",
    };
    pub const INVALID_CHARACTER: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::INVALID_CHARACTER,
        category: DiagnosticCategory::Error,
        message: "Invalid character.",
    };
    pub const DECLARATION_OR_STATEMENT_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "Declaration or statement expected.",
    };
    pub const UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL,
        category: DiagnosticCategory::Error,
        message: "Unterminated template literal.",
    };
    pub const BINARY_DIGIT_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::BINARY_DIGIT_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "Binary digit expected.",
    };
    pub const OCTAL_DIGIT_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::OCTAL_DIGIT_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "Octal digit expected.",
    };
    pub const UNSUPPORTED_SYNTAX: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::UNSUPPORTED_SYNTAX,
        category: DiagnosticCategory::Error,
        message: "'{0}' is not supported by this parser.",
    };
    pub const MAXIMUM_NESTING_DEPTH_EXCEEDED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::MAXIMUM_NESTING_DEPTH_EXCEEDED,
        category: DiagnosticCategory::Error,
        message: "Maximum nesting depth exceeded.",
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
}

impl Diagnostic {
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            message_text: message.into(),
            code,
            file: file.into(),
            start,
            length,
        }
    }

    /// Build a diagnostic from a message template, substituting `{0}`, `{1}`...
    pub fn from_message(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            category: message.category,
            code: message.code,
            file: file.into(),
            start,
            length,
            message_text: format_message(message.message, args),
        }
    }
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
