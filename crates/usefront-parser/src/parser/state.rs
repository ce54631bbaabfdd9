//! Parser state: token management, error construction and look-ahead.
//!
//! Statement parsing lives in `state_statements.rs` and expression parsing in
//! `state_expressions.rs`; both extend `ParserState` with further `impl`
//! blocks. Parsing stops at the first error, so every `parse_*` method
//! returns `ParseResult`.

use super::base::NodeIndex;
use super::node::{IdentifierData, Node, NodeArena};
use super::parse_error::ParseError;
use tracing::trace;
use usefront_common::Diagnostic;
use usefront_common::diagnostics::{DiagnosticMessage, diagnostic_messages};
use usefront_common::limits::MAX_PARSER_RECURSION_DEPTH;
use usefront_scanner::{
    ScannerState, SyntaxKind, token_is_contextual_keyword, token_is_identifier_or_keyword,
    token_to_text,
};

pub(crate) type ParseResult<T> = Result<T, ParseError>;

/// `in` is not a binary operator inside a `for (...)` head initializer.
pub(crate) const CONTEXT_FLAG_DISALLOW_IN: u8 = 1 << 0;

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) current_token: SyntaxKind,
    /// End offset of the previously consumed token
    pub(crate) prev_token_end: u32,
    pub(crate) context_flags: u8,
    recursion_depth: u32,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> ParserState {
        let capacity = source_text.len() / 4;
        ParserState {
            scanner: ScannerState::new(source_text, true),
            arena: NodeArena::with_capacity(capacity),
            file_name,
            current_token: SyntaxKind::Unknown,
            prev_token_end: 0,
            context_flags: 0,
            recursion_depth: 0,
        }
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    // =========================================================================
    // Tokens
    // =========================================================================

    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.get_token_start() as u32
    }

    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.get_token_end() as u32
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.get_token_end() as u32;
        self.current_token = self.scanner.scan();
        self.current_token
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> ParseResult<()> {
        if self.parse_optional(kind) {
            Ok(())
        } else {
            let text = token_to_text(kind).unwrap_or("token");
            Err(self.error_at_current(&diagnostic_messages::TOKEN_EXPECTED, &[text]))
        }
    }

    /// Whether a statement may end here under automatic semicolon insertion.
    pub(crate) fn can_parse_semicolon(&self) -> bool {
        self.is_token(SyntaxKind::SemicolonToken)
            || self.is_token(SyntaxKind::CloseBraceToken)
            || self.is_token(SyntaxKind::EndOfFileToken)
            || self.scanner.has_preceding_line_break()
    }

    pub(crate) fn parse_semicolon(&mut self) -> ParseResult<()> {
        if self.parse_optional(SyntaxKind::SemicolonToken) || self.can_parse_semicolon() {
            Ok(())
        } else {
            Err(self.error_at_current(&diagnostic_messages::TOKEN_EXPECTED, &[";"]))
        }
    }

    /// Identifiers, plus contextual keywords (`of`, `async`...) used as names.
    pub(crate) fn is_identifier(&self) -> bool {
        self.is_token(SyntaxKind::Identifier) || token_is_contextual_keyword(self.current_token)
    }

    pub(crate) fn is_identifier_or_keyword(&self) -> bool {
        token_is_identifier_or_keyword(self.current_token)
    }

    pub(crate) fn parse_identifier(&mut self) -> ParseResult<NodeIndex> {
        if !self.is_identifier() {
            return Err(self.error_at_current(&diagnostic_messages::IDENTIFIER_EXPECTED, &[]));
        }
        Ok(self.consume_identifier())
    }

    /// Property names accept reserved words (`a.default`, `{ if: 1 }`).
    pub(crate) fn parse_identifier_name(&mut self) -> ParseResult<NodeIndex> {
        if !self.is_identifier_or_keyword() {
            return Err(self.error_at_current(&diagnostic_messages::IDENTIFIER_EXPECTED, &[]));
        }
        Ok(self.consume_identifier())
    }

    fn consume_identifier(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let end = self.token_end();
        let escaped_text = self.scanner.get_token_value().to_string();
        self.next_token();
        self.arena
            .add(Node::Identifier(IdentifierData { escaped_text }), pos, end)
    }

    /// Add a node spanning from `pos` to the end of the last consumed token.
    pub(crate) fn finish_node(&mut self, node: Node, pos: u32) -> NodeIndex {
        let end = self.prev_token_end.max(pos);
        self.arena.add(node, pos, end)
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    pub(crate) fn enter_recursion(&mut self) -> ParseResult<()> {
        if self.recursion_depth >= MAX_PARSER_RECURSION_DEPTH {
            return Err(self.error_at_current(
                &diagnostic_messages::MAXIMUM_NESTING_DEPTH_EXCEEDED,
                &[],
            ));
        }
        self.recursion_depth += 1;
        Ok(())
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Errors
    // =========================================================================

    /// Build the error for the current token. A pending scanner diagnostic
    /// always precedes the current token, so it takes priority.
    pub(crate) fn error_at_current(
        &self,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> ParseError {
        if let Some(err) = self.pending_scanner_error() {
            return err;
        }
        let pos = self.token_pos();
        let length = self.token_end().saturating_sub(pos);
        let diagnostic = Diagnostic::from_message(&self.file_name, pos, length, message, args);
        trace!(code = diagnostic.code, pos, "parse error");
        ParseError::new(diagnostic, self.scanner.source_text())
    }

    /// Reject a construct outside the supported subset.
    pub(crate) fn unsupported(&self, what: &str) -> ParseError {
        self.error_at_current(&diagnostic_messages::UNSUPPORTED_SYNTAX, &[what])
    }

    pub(crate) fn pending_scanner_error(&self) -> Option<ParseError> {
        let first = self.scanner.get_scanner_diagnostics().first()?;
        let diagnostic = Diagnostic::error(
            &self.file_name,
            first.pos as u32,
            first.length as u32,
            first.message,
            first.code,
        );
        Some(ParseError::new(diagnostic, self.scanner.source_text()))
    }

    // =========================================================================
    // Look-ahead
    // =========================================================================

    /// Run `f` against the scanner and rewind it afterwards.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.scanner.save_state();
        let current = self.current_token;
        let prev_end = self.prev_token_end;
        let result = f(self);
        self.scanner.restore_state(snapshot);
        self.current_token = current;
        self.prev_token_end = prev_end;
        result
    }

    /// The token after the current one, and whether a line break precedes it.
    pub(crate) fn peek_token(&mut self) -> (SyntaxKind, bool) {
        self.look_ahead(|p| {
            let token = p.next_token();
            (token, p.scanner.has_preceding_line_break())
        })
    }

    /// Starting at `(`, skip to the matching `)` and report whether `=>`
    /// follows on the same line.
    pub(crate) fn look_ahead_is_arrow_function(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            let mut depth = 1u32;
            // Open braces inside each enclosing template substitution
            let mut template_braces: Vec<u32> = Vec::new();
            while depth > 0 && !p.is_token(SyntaxKind::EndOfFileToken) {
                match p.token() {
                    SyntaxKind::OpenParenToken => depth += 1,
                    SyntaxKind::CloseParenToken => depth -= 1,
                    SyntaxKind::TemplateHead => template_braces.push(0),
                    SyntaxKind::OpenBraceToken => {
                        if let Some(braces) = template_braces.last_mut() {
                            *braces += 1;
                        }
                    }
                    SyntaxKind::CloseBraceToken => match template_braces.last().copied() {
                        Some(0) => {
                            if p.scanner.re_scan_template_token() == SyntaxKind::TemplateTail {
                                template_braces.pop();
                            }
                        }
                        Some(_) => {
                            if let Some(braces) = template_braces.last_mut() {
                                *braces -= 1;
                            }
                        }
                        None => {}
                    },
                    _ => {}
                }
                p.next_token();
            }
            depth == 0
                && p.is_token(SyntaxKind::EqualsGreaterThanToken)
                && !p.scanner.has_preceding_line_break()
        })
    }

    /// Identifier immediately followed by `=>` (`x => ...`).
    pub(crate) fn look_ahead_is_simple_arrow_function(&mut self) -> bool {
        let (next, line_break) = self.peek_token();
        next == SyntaxKind::EqualsGreaterThanToken && !line_break
    }

    /// `async x => ...` or `async (...) => ...`
    pub(crate) fn look_ahead_is_async_arrow_function(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if p.scanner.has_preceding_line_break() {
                return false;
            }
            if p.is_token(SyntaxKind::OpenParenToken) {
                p.look_ahead_is_arrow_function()
            } else if p.is_identifier() {
                p.look_ahead_is_simple_arrow_function()
            } else {
                false
            }
        })
    }

    /// `async function` with no line break in between.
    pub(crate) fn look_ahead_is_async_function(&mut self) -> bool {
        let (next, line_break) = self.peek_token();
        next == SyntaxKind::FunctionKeyword && !line_break
    }
}
