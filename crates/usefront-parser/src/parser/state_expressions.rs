//! Expression parsing: precedence climbing over binary operators, unary and
//! postfix forms, member/call chains, literals and arrow functions.

use super::base::{NodeIndex, NodeList};
use super::node::{
    AccessExprData, ArrayLiteralData, AwaitData, BinaryExprData, CallExprData,
    ComputedPropertyData, ConditionalExprData, FunctionData, LiteralData, MethodData,
    NewExprData, Node, ObjectLiteralData, ParameterData, ParenthesizedData,
    PropertyAssignmentData, ShorthandPropertyData, SpreadData, TemplateExprData, TemplateSpan,
    UnaryExprData,
};
use super::state::{CONTEXT_FLAG_DISALLOW_IN, ParseResult, ParserState};
use usefront_common::diagnostics::diagnostic_messages;
use usefront_scanner::{
    OperatorPrecedence, SyntaxKind, binary_operator_precedence, token_is_assignment_operator,
};

impl ParserState {
    /// Expression including the comma operator.
    pub(crate) fn parse_expression(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        let mut left = self.parse_assignment_expression()?;
        while self.is_token(SyntaxKind::CommaToken) {
            self.next_token();
            let right = self.parse_assignment_expression()?;
            left = self.finish_node(
                Node::BinaryExpression(BinaryExprData {
                    left,
                    operator_token: SyntaxKind::CommaToken,
                    right,
                }),
                pos,
            );
        }
        Ok(left)
    }

    /// Parse with `in` re-enabled (inside brackets nested in a `for` head).
    fn parse_expression_allow_in(&mut self) -> ParseResult<NodeIndex> {
        let saved = self.context_flags;
        self.context_flags &= !CONTEXT_FLAG_DISALLOW_IN;
        let result = self.parse_expression();
        self.context_flags = saved;
        result
    }

    fn parse_assignment_expression_allow_in(&mut self) -> ParseResult<NodeIndex> {
        let saved = self.context_flags;
        self.context_flags &= !CONTEXT_FLAG_DISALLOW_IN;
        let result = self.parse_assignment_expression();
        self.context_flags = saved;
        result
    }

    pub(crate) fn parse_assignment_expression(&mut self) -> ParseResult<NodeIndex> {
        self.enter_recursion()?;
        let result = self.parse_assignment_expression_worker();
        self.exit_recursion();
        result
    }

    fn parse_assignment_expression_worker(&mut self) -> ParseResult<NodeIndex> {
        if let Some(is_async) = self.arrow_function_start() {
            return self.parse_arrow_function(is_async);
        }
        if self.is_token(SyntaxKind::YieldKeyword) {
            return Err(self.unsupported("yield"));
        }

        let pos = self.token_pos();
        let left = self.parse_conditional_expression()?;
        if token_is_assignment_operator(self.token()) {
            let operator_token = self.token();
            self.next_token();
            let right = self.parse_assignment_expression()?;
            return Ok(self.finish_node(
                Node::BinaryExpression(BinaryExprData {
                    left,
                    operator_token,
                    right,
                }),
                pos,
            ));
        }
        Ok(left)
    }

    /// `Some(is_async)` if the current token starts an arrow function.
    fn arrow_function_start(&mut self) -> Option<bool> {
        if self.is_token(SyntaxKind::AsyncKeyword) && self.look_ahead_is_async_arrow_function() {
            return Some(true);
        }
        if self.is_token(SyntaxKind::OpenParenToken) && self.look_ahead_is_arrow_function() {
            return Some(false);
        }
        if self.is_identifier() && self.look_ahead_is_simple_arrow_function() {
            return Some(false);
        }
        None
    }

    fn parse_arrow_function(&mut self, is_async: bool) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        if is_async {
            self.next_token();
        }
        let parameters = if self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_parameter_list()?
        } else {
            let param_pos = self.token_pos();
            let name = self.parse_identifier()?;
            let param = self.finish_node(
                Node::Parameter(ParameterData {
                    dot_dot_dot: false,
                    name,
                    initializer: NodeIndex::NONE,
                }),
                param_pos,
            );
            NodeList::new(vec![param])
        };
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken)?;
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_function_body()?
        } else {
            self.parse_assignment_expression()?
        };
        Ok(self.finish_node(
            Node::ArrowFunction(FunctionData {
                name: NodeIndex::NONE,
                parameters,
                body,
                is_async,
            }),
            pos,
        ))
    }

    fn parse_function_body(&mut self) -> ParseResult<NodeIndex> {
        let saved = self.context_flags;
        self.context_flags &= !CONTEXT_FLAG_DISALLOW_IN;
        let result = self.parse_block();
        self.context_flags = saved;
        result
    }

    fn parse_conditional_expression(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        let condition = self.parse_binary_expression(OperatorPrecedence::Comma)?;
        if !self.parse_optional(SyntaxKind::QuestionToken) {
            return Ok(condition);
        }
        let when_true = self.parse_assignment_expression_allow_in()?;
        self.parse_expected(SyntaxKind::ColonToken)?;
        let when_false = self.parse_assignment_expression()?;
        Ok(self.finish_node(
            Node::ConditionalExpression(ConditionalExprData {
                condition,
                when_true,
                when_false,
            }),
            pos,
        ))
    }

    /// Precedence climbing: operands bind to operators tighter than
    /// `precedence`; `**` is right-associative.
    fn parse_binary_expression(
        &mut self,
        precedence: OperatorPrecedence,
    ) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        let mut left = self.parse_unary_expression()?;
        loop {
            let operator_token = self.token();
            let Some(new_precedence) = binary_operator_precedence(operator_token) else {
                break;
            };
            let consume = if operator_token == SyntaxKind::AsteriskAsteriskToken {
                new_precedence >= precedence
            } else {
                new_precedence > precedence
            };
            if !consume {
                break;
            }
            if operator_token == SyntaxKind::InKeyword
                && self.context_flags & CONTEXT_FLAG_DISALLOW_IN != 0
            {
                break;
            }
            self.next_token();
            self.enter_recursion()?;
            let right = self.parse_binary_expression(new_precedence);
            self.exit_recursion();
            let right = right?;
            left = self.finish_node(
                Node::BinaryExpression(BinaryExprData {
                    left,
                    operator_token,
                    right,
                }),
                pos,
            );
        }
        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> ParseResult<NodeIndex> {
        self.enter_recursion()?;
        let result = self.parse_unary_expression_worker();
        self.exit_recursion();
        result
    }

    fn parse_unary_expression_worker(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword => {
                let operator = self.token();
                self.next_token();
                let operand = self.parse_unary_expression()?;
                Ok(self.finish_node(
                    Node::PrefixUnaryExpression(UnaryExprData { operator, operand }),
                    pos,
                ))
            }
            SyntaxKind::AwaitKeyword => {
                self.next_token();
                let expression = self.parse_unary_expression()?;
                Ok(self.finish_node(Node::AwaitExpression(AwaitData { expression }), pos))
            }
            SyntaxKind::LessThanToken => Err(self.unsupported("JSX")),
            _ => {
                let operand = self.parse_left_hand_side_expression()?;
                let is_update = matches!(
                    self.token(),
                    SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken
                );
                if is_update && !self.scanner.has_preceding_line_break() {
                    let operator = self.token();
                    self.next_token();
                    return Ok(self.finish_node(
                        Node::PostfixUnaryExpression(UnaryExprData { operator, operand }),
                        pos,
                    ));
                }
                Ok(operand)
            }
        }
    }

    fn parse_left_hand_side_expression(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        let expression = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };
        self.parse_member_and_call_rest(pos, expression, true)
    }

    /// `new Callee(args)`; the argument list is optional.
    fn parse_new_expression(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::NewKeyword)?;
        if self.is_token(SyntaxKind::DotToken) {
            return Err(self.unsupported("new.target"));
        }
        let callee_pos = self.token_pos();
        let callee = if self.is_token(SyntaxKind::NewKeyword) {
            self.enter_recursion()?;
            let callee = self.parse_new_expression();
            self.exit_recursion();
            callee?
        } else {
            self.parse_primary_expression()?
        };
        let expression = self.parse_member_and_call_rest(callee_pos, callee, false)?;
        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            Some(self.parse_arguments()?)
        } else {
            None
        };
        Ok(self.finish_node(
            Node::NewExpression(NewExprData {
                expression,
                arguments,
            }),
            pos,
        ))
    }

    /// Member accesses, and calls when `allow_calls`, chained onto
    /// `expression`.
    fn parse_member_and_call_rest(
        &mut self,
        pos: u32,
        mut expression: NodeIndex,
        allow_calls: bool,
    ) -> ParseResult<NodeIndex> {
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    if self.is_token(SyntaxKind::HashToken) {
                        return Err(self.unsupported("#private"));
                    }
                    let name = self.parse_identifier_name()?;
                    expression = self.finish_node(
                        Node::PropertyAccessExpression(AccessExprData {
                            expression,
                            name_or_argument: name,
                            question_dot: false,
                        }),
                        pos,
                    );
                }
                SyntaxKind::QuestionDotToken if allow_calls => {
                    self.next_token();
                    expression = match self.token() {
                        SyntaxKind::OpenParenToken => {
                            let arguments = self.parse_arguments()?;
                            self.finish_node(
                                Node::CallExpression(CallExprData {
                                    expression,
                                    arguments,
                                    question_dot: true,
                                }),
                                pos,
                            )
                        }
                        SyntaxKind::OpenBracketToken => {
                            let argument = self.parse_element_access_argument()?;
                            self.finish_node(
                                Node::ElementAccessExpression(AccessExprData {
                                    expression,
                                    name_or_argument: argument,
                                    question_dot: true,
                                }),
                                pos,
                            )
                        }
                        _ => {
                            let name = self.parse_identifier_name()?;
                            self.finish_node(
                                Node::PropertyAccessExpression(AccessExprData {
                                    expression,
                                    name_or_argument: name,
                                    question_dot: true,
                                }),
                                pos,
                            )
                        }
                    };
                }
                SyntaxKind::OpenBracketToken => {
                    let argument = self.parse_element_access_argument()?;
                    expression = self.finish_node(
                        Node::ElementAccessExpression(AccessExprData {
                            expression,
                            name_or_argument: argument,
                            question_dot: false,
                        }),
                        pos,
                    );
                }
                SyntaxKind::OpenParenToken if allow_calls => {
                    let arguments = self.parse_arguments()?;
                    expression = self.finish_node(
                        Node::CallExpression(CallExprData {
                            expression,
                            arguments,
                            question_dot: false,
                        }),
                        pos,
                    );
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    return Err(self.unsupported("tagged template"));
                }
                _ => return Ok(expression),
            }
        }
    }

    fn parse_element_access_argument(&mut self) -> ParseResult<NodeIndex> {
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let argument = self.parse_expression_allow_in()?;
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        Ok(argument)
    }

    /// `( arg, ...spread, )`
    fn parse_arguments(&mut self) -> ParseResult<NodeList> {
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let mut arguments = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken) {
            arguments.push(self.parse_spread_or_assignment(false)?);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(NodeList::new(arguments))
    }

    fn parse_spread_or_assignment(&mut self, in_object: bool) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let expression = self.parse_assignment_expression_allow_in()?;
            let data = SpreadData { expression };
            let node = if in_object {
                Node::SpreadAssignment(data)
            } else {
                Node::SpreadElement(data)
            };
            return Ok(self.finish_node(node, pos));
        }
        self.parse_assignment_expression_allow_in()
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral => self.parse_literal(),
            SyntaxKind::TemplateHead => self.parse_template_expression(),
            SyntaxKind::TrueKeyword => Ok(self.parse_keyword_node(Node::TrueKeyword, pos)),
            SyntaxKind::FalseKeyword => Ok(self.parse_keyword_node(Node::FalseKeyword, pos)),
            SyntaxKind::NullKeyword => Ok(self.parse_keyword_node(Node::NullKeyword, pos)),
            SyntaxKind::ThisKeyword => Ok(self.parse_keyword_node(Node::ThisKeyword, pos)),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let expression = self.parse_expression_allow_in()?;
                self.parse_expected(SyntaxKind::CloseParenToken)?;
                Ok(self.finish_node(
                    Node::ParenthesizedExpression(ParenthesizedData { expression }),
                    pos,
                ))
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(false),
            SyntaxKind::AsyncKeyword if self.look_ahead_is_async_function() => {
                self.parse_function_expression(true)
            }
            SyntaxKind::ClassKeyword => Err(self.unsupported("class")),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                Err(self.unsupported("regular expression literal"))
            }
            SyntaxKind::LessThanToken => Err(self.unsupported("JSX")),
            SyntaxKind::SuperKeyword => Err(self.unsupported("super")),
            SyntaxKind::ImportKeyword => Err(self.unsupported("import()")),
            SyntaxKind::HashToken => Err(self.unsupported("#private")),
            SyntaxKind::AtToken => Err(self.unsupported("@")),
            _ if self.is_identifier() => self.parse_identifier(),
            _ => Err(self.error_at_current(&diagnostic_messages::EXPRESSION_EXPECTED, &[])),
        }
    }

    fn parse_keyword_node(&mut self, node: Node, pos: u32) -> NodeIndex {
        self.next_token();
        self.finish_node(node, pos)
    }

    /// Numeric, bigint, string or no-substitution template literal at the
    /// current token.
    pub(crate) fn parse_literal(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        let data = LiteralData {
            text: self.scanner.get_token_value().to_string(),
            raw_text: self.scanner.get_token_text().to_string(),
        };
        let node = match self.token() {
            SyntaxKind::NumericLiteral => Node::NumericLiteral(data),
            SyntaxKind::BigIntLiteral => Node::BigIntLiteral(data),
            SyntaxKind::StringLiteral => Node::StringLiteral(data),
            SyntaxKind::NoSubstitutionTemplateLiteral => Node::NoSubstitutionTemplateLiteral(data),
            _ => return Err(self.error_at_current(&diagnostic_messages::EXPRESSION_EXPECTED, &[])),
        };
        self.next_token();
        Ok(self.finish_node(node, pos))
    }

    /// `` `head${expression}middle${expression}tail` ``
    fn parse_template_expression(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        let head = self.scanner.get_token_value().to_string();
        self.next_token();

        let mut spans = Vec::new();
        loop {
            self.enter_recursion()?;
            let expression = self.parse_expression_allow_in();
            self.exit_recursion();
            let expression = expression?;
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                return Err(self.error_at_current(&diagnostic_messages::TOKEN_EXPECTED, &["}"]));
            }
            self.current_token = self.scanner.re_scan_template_token();
            let literal = self.scanner.get_token_value().to_string();
            let is_tail = self.is_token(SyntaxKind::TemplateTail);
            self.next_token();
            spans.push(TemplateSpan {
                expression,
                literal,
            });
            if is_tail {
                break;
            }
        }
        Ok(self.finish_node(
            Node::TemplateExpression(TemplateExprData { head, spans }),
            pos,
        ))
    }

    fn parse_array_literal(&mut self) -> ParseResult<NodeIndex> {
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
            elements.push(self.parse_spread_or_assignment(false)?);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        Ok(self.finish_node(
            Node::ArrayLiteralExpression(ArrayLiteralData {
                elements: NodeList::new(elements),
            }),
            pos,
        ))
    }

    fn parse_object_literal(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut properties = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            properties.push(self.parse_object_literal_element()?);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(self.finish_node(
            Node::ObjectLiteralExpression(ObjectLiteralData {
                properties: NodeList::new(properties),
            }),
            pos,
        ))
    }

    fn parse_object_literal_element(&mut self) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        if self.is_token(SyntaxKind::DotDotDotToken) {
            return self.parse_spread_or_assignment(true);
        }
        if self.is_token(SyntaxKind::AsteriskToken) {
            return Err(self.unsupported("generator method"));
        }
        if matches!(self.scanner.get_token_text(), "get" | "set") && self.is_identifier() {
            let (next, _) = self.peek_token();
            if !matches!(
                next,
                SyntaxKind::ColonToken
                    | SyntaxKind::OpenParenToken
                    | SyntaxKind::CommaToken
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::EqualsToken
            ) {
                return Err(self.unsupported("accessor"));
            }
        }

        let is_async = self.is_token(SyntaxKind::AsyncKeyword) && {
            let (next, line_break) = self.peek_token();
            !line_break
                && !matches!(
                    next,
                    SyntaxKind::ColonToken
                        | SyntaxKind::OpenParenToken
                        | SyntaxKind::CommaToken
                        | SyntaxKind::CloseBraceToken
                )
        };
        if is_async {
            self.next_token();
        }

        let is_shorthand_candidate = self.is_identifier();
        let name = self.parse_property_name()?;

        if is_async || self.is_token(SyntaxKind::OpenParenToken) {
            let parameters = self.parse_parameter_list()?;
            let body = self.parse_function_body()?;
            return Ok(self.finish_node(
                Node::MethodDeclaration(MethodData {
                    name,
                    parameters,
                    body,
                    is_async,
                }),
                pos,
            ));
        }
        if self.parse_optional(SyntaxKind::ColonToken) {
            let initializer = self.parse_assignment_expression_allow_in()?;
            return Ok(self.finish_node(
                Node::PropertyAssignment(PropertyAssignmentData { name, initializer }),
                pos,
            ));
        }
        if is_shorthand_candidate
            && matches!(
                self.token(),
                SyntaxKind::CommaToken | SyntaxKind::CloseBraceToken
            )
        {
            return Ok(self.finish_node(
                Node::ShorthandPropertyAssignment(ShorthandPropertyData { name }),
                pos,
            ));
        }
        Err(self.error_at_current(&diagnostic_messages::TOKEN_EXPECTED, &[":"]))
    }

    /// Identifier or keyword, string, number or `[computed]` key.
    pub(crate) fn parse_property_name(&mut self) -> ParseResult<NodeIndex> {
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                self.parse_literal()
            }
            SyntaxKind::OpenBracketToken => {
                let pos = self.token_pos();
                self.next_token();
                let expression = self.parse_assignment_expression_allow_in()?;
                self.parse_expected(SyntaxKind::CloseBracketToken)?;
                Ok(self.finish_node(
                    Node::ComputedPropertyName(ComputedPropertyData { expression }),
                    pos,
                ))
            }
            SyntaxKind::HashToken => Err(self.unsupported("#private")),
            _ => self.parse_identifier_name(),
        }
    }

    fn parse_function_expression(&mut self, is_async: bool) -> ParseResult<NodeIndex> {
        let pos = self.token_pos();
        if is_async {
            self.next_token();
        }
        self.parse_expected(SyntaxKind::FunctionKeyword)?;
        if self.is_token(SyntaxKind::AsteriskToken) {
            return Err(self.unsupported("function*"));
        }
        let name = if self.is_identifier() {
            self.parse_identifier()?
        } else {
            NodeIndex::NONE
        };
        let parameters = self.parse_parameter_list()?;
        let body = self.parse_function_body()?;
        Ok(self.finish_node(
            Node::FunctionExpression(FunctionData {
                name,
                parameters,
                body,
                is_async,
            }),
            pos,
        ))
    }
}

