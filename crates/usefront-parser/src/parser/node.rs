//! AST node definitions.
//!
//! `Node` is a closed sum type: every kind the parser can produce has its own
//! variant, so matchers and the printer are checked for exhaustiveness by the
//! compiler. Children are referenced by `NodeIndex` into the owning
//! `NodeArena`.

use super::base::{NodeIndex, NodeList, TextRange};
use serde::Serialize;
use std::sync::Arc;
use usefront_scanner::SyntaxKind;

#[derive(Clone, Debug, Serialize)]
pub enum Node {
    SourceFile(SourceFileData),

    // Statements
    VariableStatement(VariableDeclarationListData),
    VariableDeclarationList(VariableDeclarationListData),
    VariableDeclaration(VariableDeclarationData),
    FunctionDeclaration(FunctionData),
    Block(BlockData),
    ExpressionStatement(ExpressionStatementData),
    ReturnStatement(ReturnData),
    IfStatement(IfStatementData),
    WhileStatement(LoopData),
    DoStatement(LoopData),
    ForStatement(ForData),
    ForInStatement(ForInOfData),
    ForOfStatement(ForInOfData),
    BreakStatement(JumpData),
    ContinueStatement(JumpData),
    ThrowStatement(ThrowData),
    EmptyStatement,
    ImportDeclaration(ImportDeclData),
    ImportSpecifier(SpecifierData),
    ExportDeclaration(ExportDeclData),
    ExportSpecifier(SpecifierData),
    ExportAssignment(ExportAssignmentData),

    // Bindings
    ArrayBindingPattern(BindingPatternData),
    ObjectBindingPattern(BindingPatternData),
    BindingElement(BindingElementData),
    Parameter(ParameterData),
    OmittedExpression,

    // Primary expressions
    Identifier(IdentifierData),
    NumericLiteral(LiteralData),
    BigIntLiteral(LiteralData),
    StringLiteral(LiteralData),
    NoSubstitutionTemplateLiteral(LiteralData),
    TemplateExpression(TemplateExprData),
    TrueKeyword,
    FalseKeyword,
    NullKeyword,
    ThisKeyword,
    ArrayLiteralExpression(ArrayLiteralData),
    ObjectLiteralExpression(ObjectLiteralData),
    PropertyAssignment(PropertyAssignmentData),
    ShorthandPropertyAssignment(ShorthandPropertyData),
    MethodDeclaration(MethodData),
    SpreadElement(SpreadData),
    SpreadAssignment(SpreadData),
    ComputedPropertyName(ComputedPropertyData),
    ArrowFunction(FunctionData),
    FunctionExpression(FunctionData),
    ParenthesizedExpression(ParenthesizedData),

    // Compound expressions
    CallExpression(CallExprData),
    NewExpression(NewExprData),
    PropertyAccessExpression(AccessExprData),
    ElementAccessExpression(AccessExprData),
    PrefixUnaryExpression(UnaryExprData),
    PostfixUnaryExpression(UnaryExprData),
    AwaitExpression(AwaitData),
    BinaryExpression(BinaryExprData),
    ConditionalExpression(ConditionalExprData),
}

/// Fieldless mirror of `Node` variants, for dispatch and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    SourceFile,
    VariableStatement,
    VariableDeclarationList,
    VariableDeclaration,
    FunctionDeclaration,
    Block,
    ExpressionStatement,
    ReturnStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    BreakStatement,
    ContinueStatement,
    ThrowStatement,
    EmptyStatement,
    ImportDeclaration,
    ImportSpecifier,
    ExportDeclaration,
    ExportSpecifier,
    ExportAssignment,
    ArrayBindingPattern,
    ObjectBindingPattern,
    BindingElement,
    Parameter,
    OmittedExpression,
    Identifier,
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    NoSubstitutionTemplateLiteral,
    TemplateExpression,
    TrueKeyword,
    FalseKeyword,
    NullKeyword,
    ThisKeyword,
    ArrayLiteralExpression,
    ObjectLiteralExpression,
    PropertyAssignment,
    ShorthandPropertyAssignment,
    MethodDeclaration,
    SpreadElement,
    SpreadAssignment,
    ComputedPropertyName,
    ArrowFunction,
    FunctionExpression,
    ParenthesizedExpression,
    CallExpression,
    NewExpression,
    PropertyAccessExpression,
    ElementAccessExpression,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    AwaitExpression,
    BinaryExpression,
    ConditionalExpression,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::SourceFile(_) => NodeKind::SourceFile,
            Node::VariableStatement(_) => NodeKind::VariableStatement,
            Node::VariableDeclarationList(_) => NodeKind::VariableDeclarationList,
            Node::VariableDeclaration(_) => NodeKind::VariableDeclaration,
            Node::FunctionDeclaration(_) => NodeKind::FunctionDeclaration,
            Node::Block(_) => NodeKind::Block,
            Node::ExpressionStatement(_) => NodeKind::ExpressionStatement,
            Node::ReturnStatement(_) => NodeKind::ReturnStatement,
            Node::IfStatement(_) => NodeKind::IfStatement,
            Node::WhileStatement(_) => NodeKind::WhileStatement,
            Node::DoStatement(_) => NodeKind::DoStatement,
            Node::ForStatement(_) => NodeKind::ForStatement,
            Node::ForInStatement(_) => NodeKind::ForInStatement,
            Node::ForOfStatement(_) => NodeKind::ForOfStatement,
            Node::BreakStatement(_) => NodeKind::BreakStatement,
            Node::ContinueStatement(_) => NodeKind::ContinueStatement,
            Node::ThrowStatement(_) => NodeKind::ThrowStatement,
            Node::EmptyStatement => NodeKind::EmptyStatement,
            Node::ImportDeclaration(_) => NodeKind::ImportDeclaration,
            Node::ImportSpecifier(_) => NodeKind::ImportSpecifier,
            Node::ExportDeclaration(_) => NodeKind::ExportDeclaration,
            Node::ExportSpecifier(_) => NodeKind::ExportSpecifier,
            Node::ExportAssignment(_) => NodeKind::ExportAssignment,
            Node::ArrayBindingPattern(_) => NodeKind::ArrayBindingPattern,
            Node::ObjectBindingPattern(_) => NodeKind::ObjectBindingPattern,
            Node::BindingElement(_) => NodeKind::BindingElement,
            Node::Parameter(_) => NodeKind::Parameter,
            Node::OmittedExpression => NodeKind::OmittedExpression,
            Node::Identifier(_) => NodeKind::Identifier,
            Node::NumericLiteral(_) => NodeKind::NumericLiteral,
            Node::BigIntLiteral(_) => NodeKind::BigIntLiteral,
            Node::StringLiteral(_) => NodeKind::StringLiteral,
            Node::NoSubstitutionTemplateLiteral(_) => NodeKind::NoSubstitutionTemplateLiteral,
            Node::TemplateExpression(_) => NodeKind::TemplateExpression,
            Node::TrueKeyword => NodeKind::TrueKeyword,
            Node::FalseKeyword => NodeKind::FalseKeyword,
            Node::NullKeyword => NodeKind::NullKeyword,
            Node::ThisKeyword => NodeKind::ThisKeyword,
            Node::ArrayLiteralExpression(_) => NodeKind::ArrayLiteralExpression,
            Node::ObjectLiteralExpression(_) => NodeKind::ObjectLiteralExpression,
            Node::PropertyAssignment(_) => NodeKind::PropertyAssignment,
            Node::ShorthandPropertyAssignment(_) => NodeKind::ShorthandPropertyAssignment,
            Node::MethodDeclaration(_) => NodeKind::MethodDeclaration,
            Node::SpreadElement(_) => NodeKind::SpreadElement,
            Node::SpreadAssignment(_) => NodeKind::SpreadAssignment,
            Node::ComputedPropertyName(_) => NodeKind::ComputedPropertyName,
            Node::ArrowFunction(_) => NodeKind::ArrowFunction,
            Node::FunctionExpression(_) => NodeKind::FunctionExpression,
            Node::ParenthesizedExpression(_) => NodeKind::ParenthesizedExpression,
            Node::CallExpression(_) => NodeKind::CallExpression,
            Node::NewExpression(_) => NodeKind::NewExpression,
            Node::PropertyAccessExpression(_) => NodeKind::PropertyAccessExpression,
            Node::ElementAccessExpression(_) => NodeKind::ElementAccessExpression,
            Node::PrefixUnaryExpression(_) => NodeKind::PrefixUnaryExpression,
            Node::PostfixUnaryExpression(_) => NodeKind::PostfixUnaryExpression,
            Node::AwaitExpression(_) => NodeKind::AwaitExpression,
            Node::BinaryExpression(_) => NodeKind::BinaryExpression,
            Node::ConditionalExpression(_) => NodeKind::ConditionalExpression,
        }
    }

    /// Numeric, string, boolean or null literal.
    pub fn is_primitive_literal(&self) -> bool {
        matches!(
            self,
            Node::NumericLiteral(_)
                | Node::StringLiteral(_)
                | Node::TrueKeyword
                | Node::FalseKeyword
                | Node::NullKeyword
        )
    }
}

/// Arena-based storage for AST nodes.
/// Nodes are stored contiguously and referenced by index; `ranges` runs
/// parallel to `nodes`.
#[derive(Debug, Default, Serialize)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    pub ranges: Vec<TextRange>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SourceFileData {
    pub statements: NodeList,
    pub file_name: String,
    pub text: Arc<str>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct VariableDeclarationListData {
    pub kind: VariableKind,
    pub declarations: NodeList,
}

/// A single declarator: `name = initializer`.
#[derive(Clone, Debug, Serialize)]
pub struct VariableDeclarationData {
    /// Identifier or binding pattern
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Shared by function declarations, function expressions and arrows.
#[derive(Clone, Debug, Serialize)]
pub struct FunctionData {
    pub name: NodeIndex,
    pub parameters: NodeList,
    /// Block, or an expression for concise arrow bodies
    pub body: NodeIndex,
    pub is_async: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParameterData {
    pub dot_dot_dot: bool,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct BlockData {
    pub statements: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExpressionStatementData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReturnData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct IfStatementData {
    pub expression: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

/// `while (condition) statement` and `do statement while (condition)`.
#[derive(Clone, Debug, Serialize)]
pub struct LoopData {
    pub condition: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ForData {
    pub initializer: NodeIndex,
    pub condition: NodeIndex,
    pub incrementor: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ForInOfData {
    pub initializer: NodeIndex,
    pub expression: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct JumpData {
    pub label: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ThrowData {
    pub expression: NodeIndex,
}

/// `import d, * as ns from "m"`, `import d, { a as b } from "m"`, `import "m"`.
#[derive(Clone, Debug, Serialize)]
pub struct ImportDeclData {
    pub default_binding: NodeIndex,
    pub namespace_binding: NodeIndex,
    pub named_bindings: Option<NodeList>,
    pub module_specifier: NodeIndex,
}

/// `property_name as name` inside import/export braces.
#[derive(Clone, Debug, Serialize)]
pub struct SpecifierData {
    pub property_name: NodeIndex,
    pub name: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExportDeclData {
    pub is_default: bool,
    /// Exported variable statement or function declaration
    pub declaration: NodeIndex,
    pub named_exports: Option<NodeList>,
    pub module_specifier: NodeIndex,
}

/// `export default expression;`
#[derive(Clone, Debug, Serialize)]
pub struct ExportAssignmentData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct BindingPatternData {
    pub elements: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct BindingElementData {
    pub dot_dot_dot: bool,
    /// Property key for `{ key: name }` object patterns
    pub property_name: NodeIndex,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct IdentifierData {
    pub escaped_text: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct LiteralData {
    /// Cooked value (`a"b` for `'a"b'`)
    pub text: String,
    /// Source spelling including quotes; empty for synthesized literals
    pub raw_text: String,
}

/// `` `head${a}middle${b}tail` ``. Literal pieces hold raw source text
/// without their delimiters.
#[derive(Clone, Debug, Serialize)]
pub struct TemplateExprData {
    pub head: String,
    pub spans: Vec<TemplateSpan>,
}

/// An embedded expression and the literal text after it.
#[derive(Clone, Debug, Serialize)]
pub struct TemplateSpan {
    pub expression: NodeIndex,
    pub literal: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ArrayLiteralData {
    pub elements: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct ObjectLiteralData {
    pub properties: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct PropertyAssignmentData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ShorthandPropertyData {
    pub name: NodeIndex,
}

/// Object literal method shorthand: `name(params) { body }`.
#[derive(Clone, Debug, Serialize)]
pub struct MethodData {
    pub name: NodeIndex,
    pub parameters: NodeList,
    pub body: NodeIndex,
    pub is_async: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct SpreadData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ComputedPropertyData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParenthesizedData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub arguments: NodeList,
    /// `callee?.(args)`
    pub question_dot: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct NewExprData {
    pub expression: NodeIndex,
    /// `None` for `new Foo` without an argument list
    pub arguments: Option<NodeList>,
}

/// Property access (`a.b`) or element access (`a[b]`).
#[derive(Clone, Debug, Serialize)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name_or_argument: NodeIndex,
    pub question_dot: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct UnaryExprData {
    pub operator: SyntaxKind,
    pub operand: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct AwaitData {
    pub expression: NodeIndex,
}

/// Binary operators, logical operators, assignments and the comma operator.
#[derive(Clone, Debug, Serialize)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: SyntaxKind,
    pub right: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ConditionalExprData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}
