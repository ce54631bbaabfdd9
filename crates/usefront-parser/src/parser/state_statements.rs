//! Statement, declaration and binding-pattern parsing.

use super::base::{NodeIndex, NodeList};
use super::node::{
    BindingElementData, BindingPatternData, BlockData, ExportAssignmentData, ExportDeclData,
    ExpressionStatementData, ForData, ForInOfData, FunctionData, IfStatementData, ImportDeclData,
    JumpData, LoopData, Node, ParameterData, ReturnData, SourceFileData, SpecifierData, ThrowData,
    VariableDeclarationData, VariableDeclarationListData, VariableKind,
};
use super::state::{CONTEXT_FLAG_DISALLOW_IN, ParseResult, ParserState};
use tracing::debug;
use usefront_common::diagnostics::diagnostic_messages;
use usefront_scanner::SyntaxKind;

impl ParserState {
    /// Parse the whole file and return the `SourceFile` node.
    pub fn parse_source_file(&mut self) -> ParseResult<NodeIndex> {
        self.next_token();
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            statements.push(self.parse_statement()?);
        }
        if let Some(err) = self.pending_scanner_error() {
            return Err(err);
        }

        let end = self.scanner.source_text().len() as u32;
        let text = self.scanner.source_text_arc();
        let root = self.arena.add(
            Node::SourceFile(SourceFileData {
                statements: NodeList::new(statements),
                file_name: self.file_name.clone(),
                text,
            }),
            0,
            end,
        );
        debug!(
            file = %self.file_name,
            nodes = self.arena.len(),
            "parsed source file"
        );
        Ok(root)
    }

    pub(crate) fn parse_statement(&mut self) -> ParseResult<NodeIndex> {
        self.enter_recursion()?;
        let result = self.parse_statement_worker();
        self.exit_recursion();
        result
    }

    fn parse_statement_worker(&mut self) -> ParseResult<NodeIndex> {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => {
                let pos = self.token_pos();
                self.next_token();
                Ok(self.finish_node(Node::EmptyStatement, pos))
            }
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => self.parse_variable_statement(),
            SyntaxKind::LetKeyword if self.look_ahead_is_let_declaration() => {
                self.parse_variable_statement()
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(false),
            SyntaxKind::AsyncKeyword if self.look_ahead_is_async_function() => {
                self.parse_function_declaration(false)
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::BreakKeyword | SyntaxKind::ContinueKeyword => self.parse_jump_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::ImportKeyword => {
                let (next, _) = self.peek_token();
                if matches!(next, SyntaxKind::OpenParenToken | SyntaxKind::DotToken) {
                    Err(self.unsupported("import()"))
                } else {
                    self.parse_import_declaration()
                }
            }
            SyntaxKind::ExportKeyword => self.parse_export_declaration(),
            SyntaxKind::ClassKeyword => Err(self.unsupported("class")),
            SyntaxKind::SwitchKeyword => Err(self.unsupported("switch")),
            SyntaxKind::TryKeyword => Err(self.unsupported("try")),
            SyntaxKind::WithKeyword => Err(self.unsupported("with")),
            SyntaxKind::DebuggerKeyword => Err(self.unsupported("debugger")),
            SyntaxKind::EnumKeyword => Err(self.unsupported("enum")),
            SyntaxKind::AtToken => Err(self.unsupported("@")),
            SyntaxKind::CloseBraceToken
            | SyntaxKind::CaseKeyword
            | SyntaxKind::DefaultKeyword
            | SyntaxKind::CatchKeyword
            | SyntaxKind::FinallyKeyword
            | SyntaxKind::ElseKeyword => Err(self.error_at_current(
                &diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                &[],
            )),
            _ => self.parse_expression_statement(),
        }
    }

    /// `let` starts a declaration when followed by a binding name.
    fn look_ahead_is_let_declaration(&mut self) -> bool {
        let (next, _) = self.peek_token();
        next == SyntaxKind::Identifier
            || next == SyntaxKind::OpenBracketToken
            || next == SyntaxKind::OpenBraceToken
            || usefront_scanner::token_is_contextual_keyword(next)
    }

    pub(crate) fn parse_block(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            if self.is_token(SyntaxKind::EndOfFileToken) {
                return Err(self.error_at_current(&diagnostic_messages::TOKEN_EXPECTED, &["}"]));
            }
            statements.push(self.parse_statement()?);
        }
        self.next_token();
        Ok(self.finish_node(
            Node::Block(BlockData {
                statements: NodeList::new(statements),
            }),
            pos,
        ))
    }

    fn parse_expression_statement(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        if self.is_identifier() {
            let (next, _) = self.peek_token();
            if next == SyntaxKind::ColonToken {
                return Err(self.unsupported("label"));
            }
        }
        let expression = self.parse_expression()?;
        self.parse_semicolon()?;
        Ok(self.finish_node(
            Node::ExpressionStatement(ExpressionStatementData { expression }),
            pos,
        ))
    }

    // =========================================================================
    // Variables
    // =========================================================================

    fn parse_variable_statement(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        let data = self.parse_variable_declaration_list_data()?;
        self.parse_semicolon()?;
        Ok(self.finish_node(Node::VariableStatement(data), pos))
    }

    fn parse_variable_declaration_list_data(
        &mut self,
    ) -> ParseResult<VariableDeclarationListData> {
        let kind = match self.token() {
            SyntaxKind::VarKeyword => VariableKind::Var,
            SyntaxKind::LetKeyword => VariableKind::Let,
            _ => VariableKind::Const,
        };
        self.next_token();

        let mut declarations = vec![self.parse_variable_declaration()?];
        while self.parse_optional(SyntaxKind::CommaToken) {
            declarations.push(self.parse_variable_declaration()?);
        }
        Ok(VariableDeclarationListData {
            kind,
            declarations: NodeList::new(declarations),
        })
    }

    fn parse_variable_declaration(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        let name = self.parse_binding_name()?;
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression()?
        } else {
            NodeIndex::NONE
        };
        Ok(self.finish_node(
            Node::VariableDeclaration(VariableDeclarationData { name, initializer }),
            pos,
        ))
    }

    /// Identifier, `[...]` or `{...}` binding target.
    pub(crate) fn parse_binding_name(&mut self) -> ParseResult<NodeIndex> {
        match self.token() {
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            _ => self.parse_identifier(),
        }
    }

    fn parse_array_binding_pattern(&mut self) -> ParseResult<NodeIndex> {
        self.enter_recursion()?;
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken) {
            if self.is_token(SyntaxKind::CommaToken) {
                let hole = self.token_pos();
                elements.push(self.arena.add(Node::OmittedExpression, hole, hole));
                self.next_token();
                continue;
            }
            let element_pos = self.token_pos();
            let dot_dot_dot = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name()?;
            let initializer = self.parse_initializer()?;
            elements.push(self.finish_node(
                Node::BindingElement(BindingElementData {
                    dot_dot_dot,
                    property_name: NodeIndex::NONE,
                    name,
                    initializer,
                }),
                element_pos,
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        self.exit_recursion();
        Ok(self.finish_node(
            Node::ArrayBindingPattern(BindingPatternData {
                elements: NodeList::new(elements),
            }),
            pos,
        ))
    }

    fn parse_object_binding_pattern(&mut self) -> ParseResult<NodeIndex> {
        self.enter_recursion()?;
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            let element_pos = self.token_pos();
            let element = if self.parse_optional(SyntaxKind::DotDotDotToken) {
                let name = self.parse_identifier()?;
                BindingElementData {
                    dot_dot_dot: true,
                    property_name: NodeIndex::NONE,
                    name,
                    initializer: NodeIndex::NONE,
                }
            } else {
                let key = self.parse_property_name()?;
                if self.parse_optional(SyntaxKind::ColonToken) {
                    let name = self.parse_binding_name()?;
                    let initializer = self.parse_initializer()?;
                    BindingElementData {
                        dot_dot_dot: false,
                        property_name: key,
                        name,
                        initializer,
                    }
                } else {
                    let initializer = self.parse_initializer()?;
                    BindingElementData {
                        dot_dot_dot: false,
                        property_name: NodeIndex::NONE,
                        name: key,
                        initializer,
                    }
                }
            };
            elements.push(self.finish_node(Node::BindingElement(element), element_pos));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        self.exit_recursion();
        Ok(self.finish_node(
            Node::ObjectBindingPattern(BindingPatternData {
                elements: NodeList::new(elements),
            }),
            pos,
        ))
    }

    /// `= expr` after a binding name or parameter, if present.
    fn parse_initializer(&mut self) -> ParseResult<NodeIndex> {
        if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression()
        } else {
            Ok(NodeIndex::NONE)
        }
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// `[async] function name(params) { body }`. With `name_optional` the
    /// name may be omitted (`export default function () {}`).
    pub(crate) fn parse_function_declaration(
        &mut self,
        name_optional: bool,
    ) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        let is_async = self.parse_optional(SyntaxKind::AsyncKeyword);
        self.parse_expected(SyntaxKind::FunctionKeyword)?;
        if self.is_token(SyntaxKind::AsteriskToken) {
            return Err(self.unsupported("function*"));
        }
        let name = if name_optional && self.is_token(SyntaxKind::OpenParenToken) {
            NodeIndex::NONE
        } else {
            self.parse_identifier()?
        };
        let parameters = self.parse_parameter_list()?;
        let body = self.parse_block()?;
        Ok(self.finish_node(
            Node::FunctionDeclaration(FunctionData {
                name,
                parameters,
                body,
                is_async,
            }),
            pos,
        ))
    }

    /// `( [...]binding [= init], ... )`
    pub(crate) fn parse_parameter_list(&mut self) -> ParseResult<NodeList> {
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let mut parameters = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken) {
            let pos = self.token_pos();
            let dot_dot_dot = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name()?;
            let initializer = self.parse_initializer()?;
            parameters.push(self.finish_node(
                Node::Parameter(ParameterData {
                    dot_dot_dot,
                    name,
                    initializer,
                }),
                pos,
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(NodeList::new(parameters))
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    fn parse_if_statement(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let expression = self.parse_expression()?;
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        let then_statement = self.parse_statement()?;
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_statement()?
        } else {
            NodeIndex::NONE
        };
        Ok(self.finish_node(
            Node::IfStatement(IfStatementData {
                expression,
                then_statement,
                else_statement,
            }),
            pos,
        ))
    }

    fn parse_while_statement(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let condition = self.parse_expression()?;
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        let statement = self.parse_statement()?;
        Ok(self.finish_node(
            Node::WhileStatement(LoopData {
                condition,
                statement,
            }),
            pos,
        ))
    }

    fn parse_do_statement(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        self.next_token();
        let statement = self.parse_statement()?;
        self.parse_expected(SyntaxKind::WhileKeyword)?;
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let condition = self.parse_expression()?;
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        // The semicolon after do-while is always optional.
        self.parse_optional(SyntaxKind::SemicolonToken);
        Ok(self.finish_node(
            Node::DoStatement(LoopData {
                condition,
                statement,
            }),
            pos,
        ))
    }

    fn parse_for_statement(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        self.next_token();
        if self.is_token(SyntaxKind::AwaitKeyword) {
            return Err(self.unsupported("for await"));
        }
        self.parse_expected(SyntaxKind::OpenParenToken)?;

        let saved_flags = self.context_flags;
        self.context_flags |= CONTEXT_FLAG_DISALLOW_IN;
        let initializer = match self.token() {
            SyntaxKind::SemicolonToken => Ok(NodeIndex::NONE),
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_declaration_list()
            }
            SyntaxKind::LetKeyword if self.look_ahead_is_let_declaration() => {
                self.parse_variable_declaration_list()
            }
            _ => self.parse_expression(),
        };
        self.context_flags = saved_flags;
        let initializer = initializer?;

        if self.parse_optional(SyntaxKind::OfKeyword) {
            let expression = self.parse_assignment_expression()?;
            self.parse_expected(SyntaxKind::CloseParenToken)?;
            let statement = self.parse_statement()?;
            return Ok(self.finish_node(
                Node::ForOfStatement(ForInOfData {
                    initializer,
                    expression,
                    statement,
                }),
                pos,
            ));
        }
        if self.parse_optional(SyntaxKind::InKeyword) {
            let expression = self.parse_expression()?;
            self.parse_expected(SyntaxKind::CloseParenToken)?;
            let statement = self.parse_statement()?;
            return Ok(self.finish_node(
                Node::ForInStatement(ForInOfData {
                    initializer,
                    expression,
                    statement,
                }),
                pos,
            ));
        }

        self.parse_expected(SyntaxKind::SemicolonToken)?;
        let condition = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()?
        };
        self.parse_expected(SyntaxKind::SemicolonToken)?;
        let incrementor = if self.is_token(SyntaxKind::CloseParenToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()?
        };
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        let statement = self.parse_statement()?;
        Ok(self.finish_node(
            Node::ForStatement(ForData {
                initializer,
                condition,
                incrementor,
                statement,
            }),
            pos,
        ))
    }

    fn parse_variable_declaration_list(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        let data = self.parse_variable_declaration_list_data()?;
        Ok(self.finish_node(Node::VariableDeclarationList(data), pos))
    }

    fn parse_return_statement(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        self.next_token();
        let expression = if self.can_parse_semicolon() {
            NodeIndex::NONE
        } else {
            self.parse_expression()?
        };
        self.parse_semicolon()?;
        Ok(self.finish_node(Node::ReturnStatement(ReturnData { expression }), pos))
    }

    fn parse_jump_statement(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        let is_break = self.is_token(SyntaxKind::BreakKeyword);
        self.next_token();
        let label = if !self.can_parse_semicolon() && self.is_identifier() {
            self.parse_identifier()?
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon()?;
        let data = JumpData { label };
        let node = if is_break {
            Node::BreakStatement(data)
        } else {
            Node::ContinueStatement(data)
        };
        Ok(self.finish_node(node, pos))
    }

    fn parse_throw_statement(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        self.next_token();
        if self.scanner.has_preceding_line_break() {
            return Err(self.error_at_current(&diagnostic_messages::EXPRESSION_EXPECTED, &[]));
        }
        let expression = self.parse_expression()?;
        self.parse_semicolon()?;
        Ok(self.finish_node(Node::ThrowStatement(ThrowData { expression }), pos))
    }

    // =========================================================================
    // Modules
    // =========================================================================

    fn parse_import_declaration(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::ImportKeyword)?;

        let mut data = ImportDeclData {
            default_binding: NodeIndex::NONE,
            namespace_binding: NodeIndex::NONE,
            named_bindings: None,
            module_specifier: NodeIndex::NONE,
        };

        if !self.is_token(SyntaxKind::StringLiteral) {
            if self.is_identifier() {
                data.default_binding = self.parse_identifier()?;
            }
            if data.default_binding.is_none() || self.parse_optional(SyntaxKind::CommaToken) {
                if self.parse_optional(SyntaxKind::AsteriskToken) {
                    self.parse_expected(SyntaxKind::AsKeyword)?;
                    data.namespace_binding = self.parse_identifier()?;
                } else {
                    data.named_bindings = Some(self.parse_specifiers(true)?);
                }
            }
            self.parse_expected(SyntaxKind::FromKeyword)?;
        }
        data.module_specifier = self.parse_module_specifier()?;
        self.parse_semicolon()?;
        Ok(self.finish_node(Node::ImportDeclaration(data), pos))
    }

    fn parse_module_specifier(&mut self) -> ParseResult<NodeIndex> {
        if !self.is_token(SyntaxKind::StringLiteral) {
            return Err(self.error_at_current(&diagnostic_messages::TOKEN_EXPECTED, &["string"]));
        }
        self.parse_literal()
    }

    /// `{ a, b as c, default as d }`
    fn parse_specifiers(&mut self, is_import: bool) -> ParseResult<NodeList> {
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut specifiers = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            let pos = self.token_pos();
            let first = self.parse_identifier_name()?;
            let (property_name, name) = if self.parse_optional(SyntaxKind::AsKeyword) {
                (first, self.parse_identifier_name()?)
            } else {
                (NodeIndex::NONE, first)
            };
            let data = SpecifierData {
                property_name,
                name,
            };
            let node = if is_import {
                Node::ImportSpecifier(data)
            } else {
                Node::ExportSpecifier(data)
            };
            specifiers.push(self.finish_node(node, pos));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(NodeList::new(specifiers))
    }

    fn parse_export_declaration(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::ExportKeyword)?;

        let mut data = ExportDeclData {
            is_default: false,
            declaration: NodeIndex::NONE,
            named_exports: None,
            module_specifier: NodeIndex::NONE,
        };

        match self.token() {
            SyntaxKind::DefaultKeyword => {
                self.next_token();
                let is_function = self.is_token(SyntaxKind::FunctionKeyword)
                    || (self.is_token(SyntaxKind::AsyncKeyword)
                        && self.look_ahead_is_async_function());
                if !is_function {
                    let expression = self.parse_assignment_expression()?;
                    self.parse_semicolon()?;
                    return Ok(self.finish_node(
                        Node::ExportAssignment(ExportAssignmentData { expression }),
                        pos,
                    ));
                }
                data.is_default = true;
                data.declaration = self.parse_function_declaration(true)?;
            }
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                data.declaration = self.parse_variable_statement()?;
            }
            SyntaxKind::FunctionKeyword | SyntaxKind::AsyncKeyword => {
                data.declaration = self.parse_function_declaration(false)?;
            }
            SyntaxKind::OpenBraceToken => {
                data.named_exports = Some(self.parse_specifiers(false)?);
                if self.parse_optional(SyntaxKind::FromKeyword) {
                    data.module_specifier = self.parse_module_specifier()?;
                }
                self.parse_semicolon()?;
            }
            SyntaxKind::AsteriskToken => {
                self.next_token();
                if self.is_token(SyntaxKind::AsKeyword) {
                    return Err(self.unsupported("export * as"));
                }
                self.parse_expected(SyntaxKind::FromKeyword)?;
                data.module_specifier = self.parse_module_specifier()?;
                self.parse_semicolon()?;
            }
            SyntaxKind::ClassKeyword => return Err(self.unsupported("class")),
            _ => {
                return Err(self.error_at_current(
                    &diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                    &[],
                ));
            }
        }
        Ok(self.finish_node(Node::ExportDeclaration(data), pos))
    }
}
