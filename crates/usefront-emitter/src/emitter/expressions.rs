//! Expression emission with precedence-driven parenthesization.

use super::Printer;
use usefront_parser::NodeIndex;
use usefront_parser::parser::node::{FunctionData, Node};
use usefront_scanner::{
    OperatorPrecedence, SyntaxKind, operator_token_precedence, token_is_keyword, token_to_text,
};

impl<'a> Printer<'a> {
    pub(super) fn emit_expression(&mut self, index: NodeIndex) {
        let arena = self.arena;
        let Some(node) = arena.get(index) else {
            return;
        };
        match node {
            Node::Identifier(ident) => self.write(&ident.escaped_text),
            Node::NumericLiteral(lit) | Node::BigIntLiteral(lit) => self.emit_numeric_literal(lit),
            Node::StringLiteral(lit) => self.emit_string_literal(lit),
            Node::NoSubstitutionTemplateLiteral(lit) => {
                self.write_char('`');
                self.write(&lit.text);
                self.write_char('`');
            }
            Node::TemplateExpression(template) => self.emit_template_expression(template),
            Node::TrueKeyword => self.write("true"),
            Node::FalseKeyword => self.write("false"),
            Node::NullKeyword => self.write("null"),
            Node::ThisKeyword => self.write("this"),
            Node::OmittedExpression => {}
            Node::ArrayLiteralExpression(array) => {
                self.write("[");
                self.emit_comma_list(&array.elements, Self::emit_argument);
                let ends_with_hole = array
                    .elements
                    .nodes
                    .last()
                    .is_some_and(|&last| matches!(arena.get(last), Some(Node::OmittedExpression)));
                if ends_with_hole {
                    self.write(",");
                }
                self.write("]");
            }
            Node::ObjectLiteralExpression(object) => {
                self.write("{");
                self.emit_comma_list(&object.properties, Self::emit_object_member);
                self.write("}");
            }
            Node::PropertyAssignment(_)
            | Node::ShorthandPropertyAssignment(_)
            | Node::MethodDeclaration(_)
            | Node::SpreadAssignment(_) => self.emit_object_member(index),
            Node::ComputedPropertyName(_) => self.emit_property_name(index),
            Node::SpreadElement(spread) => {
                self.write("...");
                self.emit_expression_in(spread.expression, OperatorPrecedence::Assignment);
            }
            Node::ParenthesizedExpression(paren) => {
                self.write("(");
                self.emit_expression(paren.expression);
                self.write(")");
            }
            Node::ArrowFunction(func) => self.emit_arrow_function(func),
            Node::FunctionExpression(func) => self.emit_function(func, "function"),
            Node::CallExpression(_)
            | Node::PropertyAccessExpression(_)
            | Node::ElementAccessExpression(_)
            | Node::BinaryExpression(_) => self.emit_left_spine(index),
            Node::NewExpression(new_expr) => {
                self.write("new ");
                if self.member_chain_has_call(new_expr.expression) {
                    self.write("(");
                    self.emit_expression(new_expr.expression);
                    self.write(")");
                } else {
                    self.emit_expression_in(new_expr.expression, OperatorPrecedence::Member);
                }
                if let Some(arguments) = &new_expr.arguments {
                    self.write("(");
                    self.emit_comma_list(arguments, Self::emit_argument);
                    self.write(")");
                }
            }
            Node::PrefixUnaryExpression(unary) => {
                self.write(token_to_text(unary.operator).unwrap_or(""));
                let operand_starts_with_same_sign = matches!(
                    arena.get(unary.operand),
                    Some(Node::PrefixUnaryExpression(inner))
                        if same_sign(unary.operator, inner.operator)
                );
                if token_is_keyword(unary.operator) || operand_starts_with_same_sign {
                    self.write_space();
                }
                self.emit_expression_in(unary.operand, OperatorPrecedence::Unary);
            }
            Node::PostfixUnaryExpression(unary) => {
                self.emit_expression_in(unary.operand, OperatorPrecedence::LeftHandSide);
                self.write(token_to_text(unary.operator).unwrap_or(""));
            }
            Node::AwaitExpression(await_expr) => {
                self.write("await ");
                self.emit_expression_in(await_expr.expression, OperatorPrecedence::Unary);
            }
            Node::ConditionalExpression(cond) => {
                self.emit_expression_in(cond.condition, OperatorPrecedence::Coalesce);
                self.write(" ? ");
                self.emit_expression_in(cond.when_true, OperatorPrecedence::Assignment);
                self.write(" : ");
                self.emit_expression_in(cond.when_false, OperatorPrecedence::Assignment);
            }
            Node::VariableDeclaration(_) => self.emit_variable_declaration(index),
            Node::VariableDeclarationList(_) => self.emit_for_initializer(index),
            Node::Parameter(_) => self.emit_parameter(index),
            Node::ArrayBindingPattern(_) | Node::ObjectBindingPattern(_) => {
                self.emit_binding_name(index)
            }
            Node::BindingElement(_) => self.emit_binding_element(index),
            Node::ImportSpecifier(_) | Node::ExportSpecifier(_) => self.emit_specifier(index),
            Node::SourceFile(_)
            | Node::VariableStatement(_)
            | Node::FunctionDeclaration(_)
            | Node::Block(_)
            | Node::ExpressionStatement(_)
            | Node::ReturnStatement(_)
            | Node::IfStatement(_)
            | Node::WhileStatement(_)
            | Node::DoStatement(_)
            | Node::ForStatement(_)
            | Node::ForInStatement(_)
            | Node::ForOfStatement(_)
            | Node::BreakStatement(_)
            | Node::ContinueStatement(_)
            | Node::ThrowStatement(_)
            | Node::EmptyStatement
            | Node::ImportDeclaration(_)
            | Node::ExportDeclaration(_)
            | Node::ExportAssignment(_) => self.emit_statement(index),
        }
    }

    /// Emit `index`, parenthesized when it binds looser than `min`.
    pub(super) fn emit_expression_in(&mut self, index: NodeIndex, min: OperatorPrecedence) {
        if self.expression_precedence(index) < min {
            self.write("(");
            self.emit_expression(index);
            self.write(")");
        } else {
            self.emit_expression(index);
        }
    }

    /// Binary expressions, calls and member accesses all print their left
    /// operand first. Chains of them (`a + b + c`, `a.b.c()`) are parsed
    /// iteratively and can be arbitrarily long, so the left spine is walked
    /// with a loop: the innermost operand is printed, then each node's
    /// remainder from the inside out.
    fn emit_left_spine(&mut self, root: NodeIndex) {
        let mut spine = vec![root];
        let mut current = root;
        let (leftmost, leftmost_min) = loop {
            let Some((left, min)) = self.left_operand(current) else {
                return;
            };
            let continues = self.left_operand(left).is_some()
                && self.expression_precedence(left) >= min;
            if !continues {
                break (left, min);
            }
            spine.push(left);
            current = left;
        };

        self.emit_expression_in(leftmost, leftmost_min);
        for &node in spine.iter().rev() {
            self.emit_after_left_operand(node);
        }
    }

    /// `new (f())()` and `new (a.b().c)` keep their parentheses; without
    /// them the call's argument list would be taken by `new`.
    fn member_chain_has_call(&self, mut index: NodeIndex) -> bool {
        loop {
            match self.arena.get(index) {
                Some(Node::CallExpression(_)) => return true,
                Some(
                    Node::PropertyAccessExpression(access)
                    | Node::ElementAccessExpression(access),
                ) => {
                    index = access.expression;
                }
                _ => return false,
            }
        }
    }

    /// Left operand of a spine node and the precedence it must bind with.
    fn left_operand(&self, index: NodeIndex) -> Option<(NodeIndex, OperatorPrecedence)> {
        match self.arena.get(index)? {
            Node::BinaryExpression(binary) => Some((
                binary.left,
                binary_operand_requirements(binary.operator_token).0,
            )),
            Node::CallExpression(call) => Some((call.expression, OperatorPrecedence::Member)),
            Node::PropertyAccessExpression(access) | Node::ElementAccessExpression(access) => {
                Some((access.expression, OperatorPrecedence::Member))
            }
            _ => None,
        }
    }

    fn emit_after_left_operand(&mut self, index: NodeIndex) {
        let arena = self.arena;
        match arena.get(index) {
            Some(Node::BinaryExpression(binary)) => {
                if binary.operator_token == SyntaxKind::CommaToken {
                    self.write(", ");
                } else {
                    self.write_space();
                    self.write(token_to_text(binary.operator_token).unwrap_or(""));
                    self.write_space();
                }
                let right_min = binary_operand_requirements(binary.operator_token).1;
                self.emit_expression_in(binary.right, right_min);
            }
            Some(Node::CallExpression(call)) => {
                if call.question_dot {
                    self.write("?.");
                }
                self.write("(");
                self.emit_comma_list(&call.arguments, Self::emit_argument);
                self.write(")");
            }
            Some(Node::PropertyAccessExpression(access)) => {
                self.write(if access.question_dot { "?." } else { "." });
                self.write_identifier_text(access.name_or_argument);
            }
            Some(Node::ElementAccessExpression(access)) => {
                if access.question_dot {
                    self.write("?.");
                }
                self.write("[");
                self.emit_expression(access.name_or_argument);
                self.write("]");
            }
            _ => {}
        }
    }

    /// Call arguments and array elements: anything but a bare comma
    /// expression.
    fn emit_argument(&mut self, index: NodeIndex) {
        self.emit_expression_in(index, OperatorPrecedence::Assignment);
    }

    fn emit_arrow_function(&mut self, func: &FunctionData) {
        let arena = self.arena;
        if func.is_async {
            self.write("async ");
        }
        let bare_parameter = match func.parameters.nodes.as_slice() {
            [only] => matches!(
                arena.get(*only),
                Some(Node::Parameter(param))
                    if !param.dot_dot_dot
                        && param.initializer.is_none()
                        && arena.identifier_text(param.name).is_some()
            ),
            _ => false,
        };
        if bare_parameter {
            self.emit_comma_list(&func.parameters, Self::emit_parameter);
        } else {
            self.write("(");
            self.emit_comma_list(&func.parameters, Self::emit_parameter);
            self.write(")");
        }
        self.write(" => ");
        match arena.get(func.body) {
            Some(Node::Block(_)) => self.emit_block(func.body),
            Some(Node::ObjectLiteralExpression(_)) => {
                self.write("(");
                self.emit_expression(func.body);
                self.write(")");
            }
            _ => self.emit_expression_in(func.body, OperatorPrecedence::Assignment),
        }
    }

    fn emit_object_member(&mut self, index: NodeIndex) {
        let arena = self.arena;
        match arena.get(index) {
            Some(Node::PropertyAssignment(prop)) => {
                self.emit_property_name(prop.name);
                self.write(": ");
                self.emit_expression_in(prop.initializer, OperatorPrecedence::Assignment);
            }
            Some(Node::ShorthandPropertyAssignment(prop)) => self.write_identifier_text(prop.name),
            Some(Node::SpreadAssignment(spread)) => {
                self.write("...");
                self.emit_expression_in(spread.expression, OperatorPrecedence::Assignment);
            }
            Some(Node::MethodDeclaration(method)) => {
                if method.is_async {
                    self.write("async ");
                }
                self.emit_property_name(method.name);
                self.write("(");
                self.emit_comma_list(&method.parameters, Self::emit_parameter);
                self.write(") ");
                self.emit_block(method.body);
            }
            Some(_) => self.emit_expression(index),
            None => {}
        }
    }

    pub(super) fn emit_property_name(&mut self, index: NodeIndex) {
        let arena = self.arena;
        match arena.get(index) {
            Some(Node::ComputedPropertyName(computed)) => {
                self.write("[");
                self.emit_expression_in(computed.expression, OperatorPrecedence::Assignment);
                self.write("]");
            }
            Some(_) => self.emit_expression(index),
            None => {}
        }
    }

    /// How tightly the expression at `index` binds.
    pub(super) fn expression_precedence(&self, index: NodeIndex) -> OperatorPrecedence {
        let Some(node) = self.arena.get(index) else {
            return OperatorPrecedence::Primary;
        };
        match node {
            Node::BinaryExpression(binary) => operator_token_precedence(binary.operator_token),
            Node::ConditionalExpression(_) => OperatorPrecedence::Conditional,
            Node::ArrowFunction(_) => OperatorPrecedence::Assignment,
            Node::PrefixUnaryExpression(_) | Node::AwaitExpression(_) => OperatorPrecedence::Unary,
            Node::PostfixUnaryExpression(_) => OperatorPrecedence::Update,
            Node::NewExpression(new_expr) if new_expr.arguments.is_none() => {
                OperatorPrecedence::LeftHandSide
            }
            Node::CallExpression(_)
            | Node::NewExpression(_)
            | Node::PropertyAccessExpression(_)
            | Node::ElementAccessExpression(_) => OperatorPrecedence::Member,
            _ => OperatorPrecedence::Primary,
        }
    }
}

/// Minimum operand precedence on each side of a binary-shaped operator.
/// Left-associative operators accept an equal-precedence left operand,
/// `**` and assignments accept one on the right instead.
fn binary_operand_requirements(operator: SyntaxKind) -> (OperatorPrecedence, OperatorPrecedence) {
    let precedence = operator_token_precedence(operator);
    match precedence {
        OperatorPrecedence::Comma => (OperatorPrecedence::Comma, OperatorPrecedence::Assignment),
        OperatorPrecedence::Assignment => {
            (OperatorPrecedence::LeftHandSide, OperatorPrecedence::Assignment)
        }
        OperatorPrecedence::Exponentiation => (
            OperatorPrecedence::Update,
            OperatorPrecedence::Exponentiation,
        ),
        _ => (precedence, next_tighter(precedence)),
    }
}

fn next_tighter(precedence: OperatorPrecedence) -> OperatorPrecedence {
    use OperatorPrecedence::*;
    match precedence {
        Comma => Assignment,
        Assignment => Conditional,
        Conditional => Coalesce,
        Coalesce => LogicalOr,
        LogicalOr => LogicalAnd,
        LogicalAnd => BitwiseOr,
        BitwiseOr => BitwiseXor,
        BitwiseXor => BitwiseAnd,
        BitwiseAnd => Equality,
        Equality => Relational,
        Relational => Shift,
        Shift => Additive,
        Additive => Multiplicative,
        Multiplicative => Exponentiation,
        Exponentiation => Unary,
        Unary => Update,
        Update => LeftHandSide,
        LeftHandSide => Member,
        Member => Primary,
        Primary | Invalid => Invalid,
    }
}

/// `- -x` and `+ +x` need a space so they don't print as `--x`/`++x`.
fn same_sign(outer: SyntaxKind, inner: SyntaxKind) -> bool {
    matches!(
        (outer, inner),
        (
            SyntaxKind::MinusToken,
            SyntaxKind::MinusToken | SyntaxKind::MinusMinusToken
        ) | (
            SyntaxKind::PlusToken,
            SyntaxKind::PlusToken | SyntaxKind::PlusPlusToken
        )
    )
}
