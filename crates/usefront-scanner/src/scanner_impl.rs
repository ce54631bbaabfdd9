//! Scanner implementation.
//!
//! `ScannerState` walks the source text one token at a time. The parser
//! drives it with `scan()` and reads the token's kind, position and value
//! back out; `save_state`/`restore_state` support speculative look-ahead
//! (arrow function detection).

use crate::syntax_kind::{SyntaxKind, string_to_token};
use std::sync::Arc;
use usefront_common::diagnostics::{DiagnosticMessage, diagnostic_messages};

/// Diagnostic produced while scanning (reported by the parser).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: usize,
    pub length: usize,
    pub message: &'static str,
    pub code: u32,
}

/// Snapshot of the scanner position for look-ahead.
#[derive(Debug, Clone)]
pub struct ScannerSnapshot {
    pos: usize,
    full_start_pos: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    preceding_line_break: bool,
    diagnostics_len: usize,
}

pub struct ScannerState {
    source: Arc<str>,
    skip_trivia: bool,
    /// Current position (byte offset)
    pos: usize,
    /// Start of the current token including leading trivia
    full_start_pos: usize,
    /// Start of the current token excluding trivia
    token_start: usize,
    token: SyntaxKind,
    /// Cooked value for string literals, raw text otherwise
    token_value: String,
    preceding_line_break: bool,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    pub fn new(text: String, skip_trivia: bool) -> ScannerState {
        ScannerState {
            source: Arc::from(text),
            skip_trivia,
            pos: 0,
            full_start_pos: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            preceding_line_break: false,
            diagnostics: Vec::new(),
        }
    }

    pub fn source_text(&self) -> &str {
        &self.source
    }

    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.source)
    }

    pub fn get_token(&self) -> SyntaxKind {
        self.token
    }

    pub fn get_token_value(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    pub fn get_token_text(&self) -> &str {
        self.source.get(self.token_start..self.pos).unwrap_or("")
    }

    pub fn get_token_full_start(&self) -> usize {
        self.full_start_pos
    }

    pub fn get_token_start(&self) -> usize {
        self.token_start
    }

    pub fn get_token_end(&self) -> usize {
        self.pos
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.preceding_line_break
    }

    pub fn get_scanner_diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            full_start_pos: self.full_start_pos,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            preceding_line_break: self.preceding_line_break,
            diagnostics_len: self.diagnostics.len(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.full_start_pos = snapshot.full_start_pos;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.preceding_line_break = snapshot.preceding_line_break;
        self.diagnostics.truncate(snapshot.diagnostics_len);
    }

    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.source.as_bytes().get(pos).copied()
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.source.get(pos..).and_then(|rest| rest.chars().next())
    }

    fn error(&mut self, message: &DiagnosticMessage, pos: usize, length: usize) {
        self.diagnostics.push(ScannerDiagnostic {
            pos,
            length,
            message: message.message,
            code: message.code,
        });
    }

    fn finish(&mut self, kind: SyntaxKind, len: usize) -> SyntaxKind {
        self.pos += len;
        self.token = kind;
        self.token_value = self.get_token_text().to_string();
        kind
    }

    /// Scan the next token.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start_pos = self.pos;
        self.preceding_line_break = false;

        loop {
            self.token_start = self.pos;
            let Some(ch) = self.byte_at(self.pos) else {
                self.token = SyntaxKind::EndOfFileToken;
                self.token_value.clear();
                return self.token;
            };

            match ch {
                b'\n' | b'\r' => {
                    self.preceding_line_break = true;
                    if self.skip_trivia {
                        self.pos += 1;
                        continue;
                    }
                    let len = if ch == b'\r' && self.byte_at(self.pos + 1) == Some(b'\n') {
                        2
                    } else {
                        1
                    };
                    return self.finish(SyntaxKind::NewLineTrivia, len);
                }
                b' ' | b'\t' | 0x0b | 0x0c => {
                    let mut end = self.pos + 1;
                    while matches!(self.byte_at(end), Some(b' ' | b'\t' | 0x0b | 0x0c)) {
                        end += 1;
                    }
                    if self.skip_trivia {
                        self.pos = end;
                        continue;
                    }
                    return self.finish(SyntaxKind::WhitespaceTrivia, end - self.pos);
                }
                b'/' if self.byte_at(self.pos + 1) == Some(b'/') => {
                    let rest = &self.source[self.pos..];
                    let len = rest.find(['\n', '\r']).unwrap_or(rest.len());
                    if self.skip_trivia {
                        self.pos += len;
                        continue;
                    }
                    return self.finish(SyntaxKind::SingleLineCommentTrivia, len);
                }
                b'/' if self.byte_at(self.pos + 1) == Some(b'*') => {
                    let start = self.pos;
                    let len = match self.source[start + 2..].find("*/") {
                        Some(close) => close + 4,
                        None => {
                            let end = self.source.len();
                            self.error(&diagnostic_messages::ASTERISK_SLASH_EXPECTED, end, 0);
                            end - start
                        }
                    };
                    if self.source[start..start + len].contains(['\n', '\r']) {
                        self.preceding_line_break = true;
                    }
                    if self.skip_trivia {
                        self.pos += len;
                        continue;
                    }
                    return self.finish(SyntaxKind::MultiLineCommentTrivia, len);
                }
                _ => {}
            }

            // Non-ASCII whitespace and line terminators
            if ch >= 0x80
                && let Some(c) = self.char_at(self.pos)
                && (c.is_whitespace() || c == '\u{feff}')
            {
                if c == '\u{2028}' || c == '\u{2029}' {
                    self.preceding_line_break = true;
                }
                self.pos += c.len_utf8();
                if self.skip_trivia {
                    continue;
                }
                self.token = SyntaxKind::WhitespaceTrivia;
                self.token_value = c.to_string();
                return self.token;
            }

            return self.scan_token(ch);
        }
    }

    fn scan_token(&mut self, ch: u8) -> SyntaxKind {
        use SyntaxKind::*;
        let next = self.byte_at(self.pos + 1);
        let next2 = self.byte_at(self.pos + 2);
        let next3 = self.byte_at(self.pos + 3);
        match ch {
            b'{' => self.finish(OpenBraceToken, 1),
            b'}' => self.finish(CloseBraceToken, 1),
            b'(' => self.finish(OpenParenToken, 1),
            b')' => self.finish(CloseParenToken, 1),
            b'[' => self.finish(OpenBracketToken, 1),
            b']' => self.finish(CloseBracketToken, 1),
            b';' => self.finish(SemicolonToken, 1),
            b',' => self.finish(CommaToken, 1),
            b':' => self.finish(ColonToken, 1),
            b'~' => self.finish(TildeToken, 1),
            b'@' => self.finish(AtToken, 1),
            b'#' => self.finish(HashToken, 1),
            b'`' => self.scan_template(false),
            b'.' => match (next, next2) {
                (Some(b'.'), Some(b'.')) => self.finish(DotDotDotToken, 3),
                (Some(b'0'..=b'9'), _) => self.scan_number(),
                _ => self.finish(DotToken, 1),
            },
            b'?' => match (next, next2) {
                (Some(b'?'), Some(b'=')) => self.finish(QuestionQuestionEqualsToken, 3),
                (Some(b'?'), _) => self.finish(QuestionQuestionToken, 2),
                // `a?.5:b` is a conditional, not optional chaining
                (Some(b'.'), Some(b'0'..=b'9')) => self.finish(QuestionToken, 1),
                (Some(b'.'), _) => self.finish(QuestionDotToken, 2),
                _ => self.finish(QuestionToken, 1),
            },
            b'=' => match (next, next2) {
                (Some(b'='), Some(b'=')) => self.finish(EqualsEqualsEqualsToken, 3),
                (Some(b'='), _) => self.finish(EqualsEqualsToken, 2),
                (Some(b'>'), _) => self.finish(EqualsGreaterThanToken, 2),
                _ => self.finish(EqualsToken, 1),
            },
            b'!' => match (next, next2) {
                (Some(b'='), Some(b'=')) => self.finish(ExclamationEqualsEqualsToken, 3),
                (Some(b'='), _) => self.finish(ExclamationEqualsToken, 2),
                _ => self.finish(ExclamationToken, 1),
            },
            b'+' => match next {
                Some(b'+') => self.finish(PlusPlusToken, 2),
                Some(b'=') => self.finish(PlusEqualsToken, 2),
                _ => self.finish(PlusToken, 1),
            },
            b'-' => match next {
                Some(b'-') => self.finish(MinusMinusToken, 2),
                Some(b'=') => self.finish(MinusEqualsToken, 2),
                _ => self.finish(MinusToken, 1),
            },
            b'*' => match (next, next2) {
                (Some(b'*'), Some(b'=')) => self.finish(AsteriskAsteriskEqualsToken, 3),
                (Some(b'*'), _) => self.finish(AsteriskAsteriskToken, 2),
                (Some(b'='), _) => self.finish(AsteriskEqualsToken, 2),
                _ => self.finish(AsteriskToken, 1),
            },
            b'/' => match next {
                Some(b'=') => self.finish(SlashEqualsToken, 2),
                _ => self.finish(SlashToken, 1),
            },
            b'%' => match next {
                Some(b'=') => self.finish(PercentEqualsToken, 2),
                _ => self.finish(PercentToken, 1),
            },
            b'<' => match (next, next2) {
                (Some(b'<'), Some(b'=')) => self.finish(LessThanLessThanEqualsToken, 3),
                (Some(b'<'), _) => self.finish(LessThanLessThanToken, 2),
                (Some(b'='), _) => self.finish(LessThanEqualsToken, 2),
                _ => self.finish(LessThanToken, 1),
            },
            b'>' => match (next, next2, next3) {
                (Some(b'>'), Some(b'>'), Some(b'=')) => {
                    self.finish(GreaterThanGreaterThanGreaterThanEqualsToken, 4)
                }
                (Some(b'>'), Some(b'>'), _) => {
                    self.finish(GreaterThanGreaterThanGreaterThanToken, 3)
                }
                (Some(b'>'), Some(b'='), _) => self.finish(GreaterThanGreaterThanEqualsToken, 3),
                (Some(b'>'), _, _) => self.finish(GreaterThanGreaterThanToken, 2),
                (Some(b'='), _, _) => self.finish(GreaterThanEqualsToken, 2),
                _ => self.finish(GreaterThanToken, 1),
            },
            b'&' => match (next, next2) {
                (Some(b'&'), Some(b'=')) => self.finish(AmpersandAmpersandEqualsToken, 3),
                (Some(b'&'), _) => self.finish(AmpersandAmpersandToken, 2),
                (Some(b'='), _) => self.finish(AmpersandEqualsToken, 2),
                _ => self.finish(AmpersandToken, 1),
            },
            b'|' => match (next, next2) {
                (Some(b'|'), Some(b'=')) => self.finish(BarBarEqualsToken, 3),
                (Some(b'|'), _) => self.finish(BarBarToken, 2),
                (Some(b'='), _) => self.finish(BarEqualsToken, 2),
                _ => self.finish(BarToken, 1),
            },
            b'^' => match next {
                Some(b'=') => self.finish(CaretEqualsToken, 2),
                _ => self.finish(CaretToken, 1),
            },
            b'"' | b'\'' => self.scan_string(ch),
            b'0'..=b'9' => self.scan_number(),
            _ => {
                let c = self.char_at(self.pos).unwrap_or('\u{fffd}');
                if is_identifier_start(c) {
                    self.scan_identifier()
                } else {
                    let len = c.len_utf8();
                    self.error(&diagnostic_messages::INVALID_CHARACTER, self.pos, len);
                    self.finish(Unknown, len)
                }
            }
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        let mut end = start;
        for c in self.source[start..].chars() {
            if (end == start && is_identifier_start(c)) || (end > start && is_identifier_part(c)) {
                end += c.len_utf8();
            } else {
                break;
            }
        }
        self.pos = end;
        self.token_value = self.source[start..end].to_string();
        self.token = string_to_token(&self.token_value);
        self.token
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let source = Arc::clone(&self.source);
        let bytes = source.as_bytes();
        let mut end = start;

        let radix = match (bytes.get(start), bytes.get(start + 1)) {
            (Some(b'0'), Some(b'x' | b'X')) => Some(16),
            (Some(b'0'), Some(b'o' | b'O')) => Some(8),
            (Some(b'0'), Some(b'b' | b'B')) => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            end += 2;
            let digits_start = end;
            while let Some(&b) = bytes.get(end) {
                if char::from(b).is_digit(radix) || (b == b'_' && end > digits_start) {
                    end += 1;
                } else {
                    break;
                }
            }
            if end == digits_start {
                let message = match radix {
                    16 => &diagnostic_messages::HEXADECIMAL_DIGIT_EXPECTED,
                    8 => &diagnostic_messages::OCTAL_DIGIT_EXPECTED,
                    _ => &diagnostic_messages::BINARY_DIGIT_EXPECTED,
                };
                self.error(message, end, 0);
            }
        } else {
            let digits = |mut at: usize| {
                while let Some(&b) = bytes.get(at) {
                    if b.is_ascii_digit() || b == b'_' {
                        at += 1;
                    } else {
                        break;
                    }
                }
                at
            };
            end = digits(end);
            if bytes.get(end) == Some(&b'.') {
                end = digits(end + 1);
            }
            if matches!(bytes.get(end), Some(b'e' | b'E')) {
                let mut exp = end + 1;
                if matches!(bytes.get(exp), Some(b'+' | b'-')) {
                    exp += 1;
                }
                if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
                    end = digits(exp);
                }
            }
        }

        let kind = if bytes.get(end) == Some(&b'n') {
            end += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };
        self.pos = end;
        self.token = kind;
        self.token_value = self.source[start..end].to_string();
        kind
    }

    fn scan_string(&mut self, quote: u8) -> SyntaxKind {
        let start = self.pos;
        let mut pos = start + 1;
        let mut value = String::new();
        let mut terminated = false;

        while let Some(c) = self.char_at(pos) {
            match c {
                _ if c as u32 == quote as u32 => {
                    pos += 1;
                    terminated = true;
                    break;
                }
                '\n' | '\r' => break,
                '\\' => {
                    pos += 1;
                    let Some(escaped) = self.char_at(pos) else {
                        break;
                    };
                    pos += escaped.len_utf8();
                    match escaped {
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        'r' => value.push('\r'),
                        'b' => value.push('\u{8}'),
                        'f' => value.push('\u{c}'),
                        'v' => value.push('\u{b}'),
                        '0' => value.push('\0'),
                        '\r' => {
                            // line continuation, `\r\n` counts as one
                            if self.byte_at(pos) == Some(b'\n') {
                                pos += 1;
                            }
                        }
                        '\n' | '\u{2028}' | '\u{2029}' => {}
                        'x' => {
                            let (decoded, used) = self.scan_hex_escape(pos, 2);
                            value.push(decoded.unwrap_or('x'));
                            pos += used;
                        }
                        'u' => {
                            if self.byte_at(pos) == Some(b'{') {
                                let rest = &self.source[pos + 1..];
                                let close = rest.find('}').unwrap_or(0);
                                let decoded = u32::from_str_radix(&rest[..close], 16)
                                    .ok()
                                    .and_then(char::from_u32);
                                value.push(decoded.unwrap_or('u'));
                                pos += close + 2;
                            } else {
                                let (decoded, used) = self.scan_hex_escape(pos, 4);
                                value.push(decoded.unwrap_or('u'));
                                pos += used;
                            }
                        }
                        other => value.push(other),
                    }
                }
                _ => {
                    value.push(c);
                    pos += c.len_utf8();
                }
            }
        }

        if !terminated {
            self.error(
                &diagnostic_messages::UNTERMINATED_STRING_LITERAL,
                start,
                pos - start,
            );
        }
        self.pos = pos;
        self.token = SyntaxKind::StringLiteral;
        self.token_value = value;
        self.token
    }

    /// Rescan the current `}` token as the continuation of a template,
    /// giving `TemplateMiddle` or `TemplateTail`.
    pub fn re_scan_template_token(&mut self) -> SyntaxKind {
        self.pos = self.token_start;
        self.scan_template(true)
    }

    /// Scan from a backtick (or a `}` when `continuation`) up to and
    /// including the next backtick or `${`. The token value is the raw text
    /// between the delimiters, escapes kept as written.
    fn scan_template(&mut self, continuation: bool) -> SyntaxKind {
        let start = self.pos;
        let mut pos = start + 1;
        let closed = if continuation {
            SyntaxKind::TemplateTail
        } else {
            SyntaxKind::NoSubstitutionTemplateLiteral
        };
        let (kind, body_end) = loop {
            let Some(c) = self.char_at(pos) else {
                self.error(
                    &diagnostic_messages::UNTERMINATED_TEMPLATE_LITERAL,
                    start,
                    pos - start,
                );
                break (closed, pos);
            };
            match c {
                '`' => {
                    pos += 1;
                    break (closed, pos - 1);
                }
                '$' if self.byte_at(pos + 1) == Some(b'{') => {
                    pos += 2;
                    let open = if continuation {
                        SyntaxKind::TemplateMiddle
                    } else {
                        SyntaxKind::TemplateHead
                    };
                    break (open, pos - 2);
                }
                '\\' => {
                    pos += 1;
                    if let Some(escaped) = self.char_at(pos) {
                        pos += escaped.len_utf8();
                    }
                }
                _ => pos += c.len_utf8(),
            }
        };
        self.pos = pos;
        self.token = kind;
        self.token_value = self.source[start + 1..body_end].to_string();
        kind
    }

    fn scan_hex_escape(&self, pos: usize, count: usize) -> (Option<char>, usize) {
        let Some(digits) = self.source.get(pos..pos + count) else {
            return (None, 0);
        };
        match u32::from_str_radix(digits, 16).ok().and_then(char::from_u32) {
            Some(c) => (Some(c), count),
            None => (None, 0),
        }
    }
}

pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$' || (!c.is_ascii() && c.is_alphabetic())
}

pub fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c)
        || c.is_ascii_digit()
        || c == '\u{200c}'
        || c == '\u{200d}'
        || (!c.is_ascii() && c.is_alphanumeric())
}
