//! `NodeArena` storage, typed accessors and child enumeration.

use super::base::{NodeIndex, NodeList, TextRange};
use super::node::{
    AccessExprData, BinaryExprData, CallExprData, FunctionData, IdentifierData, LiteralData, Node,
    NodeArena, NodeKind, VariableDeclarationData,
};

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena {
            nodes: Vec::new(),
            ranges: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
            ranges: Vec::with_capacity(capacity),
        }
    }

    /// Add a node to the arena and return its index
    pub fn add(&mut self, node: Node, pos: u32, end: u32) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        self.ranges.push(TextRange::new(pos, end));
        NodeIndex(index)
    }

    /// Add a node that has no source position.
    pub fn add_synthesized(&mut self, node: Node) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        self.ranges.push(TextRange::SYNTHESIZED);
        NodeIndex(index)
    }

    /// Get a node by index
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get a mutable node by index
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    /// Replace a node at the given index, keeping its source range.
    /// Returns the old node if successful
    pub fn replace(&mut self, index: NodeIndex, new_node: Node) -> Option<Node> {
        if index.is_none() {
            None
        } else {
            self.nodes
                .get_mut(index.0 as usize)
                .map(|old| std::mem::replace(old, new_node))
        }
    }

    pub fn range(&self, index: NodeIndex) -> TextRange {
        if index.is_none() {
            return TextRange::SYNTHESIZED;
        }
        self.ranges
            .get(index.0 as usize)
            .copied()
            .unwrap_or(TextRange::SYNTHESIZED)
    }

    pub fn kind(&self, index: NodeIndex) -> Option<NodeKind> {
        self.get(index).map(Node::kind)
    }

    /// Get the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    pub fn get_identifier(&self, index: NodeIndex) -> Option<&IdentifierData> {
        match self.get(index)? {
            Node::Identifier(data) => Some(data),
            _ => None,
        }
    }

    /// Text of an identifier node.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        self.get_identifier(index)
            .map(|data| data.escaped_text.as_str())
    }

    pub fn get_literal(&self, index: NodeIndex) -> Option<&LiteralData> {
        match self.get(index)? {
            Node::NumericLiteral(data) | Node::BigIntLiteral(data) | Node::StringLiteral(data) => {
                Some(data)
            }
            _ => None,
        }
    }

    pub fn get_variable_declaration(&self, index: NodeIndex) -> Option<&VariableDeclarationData> {
        match self.get(index)? {
            Node::VariableDeclaration(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_call_expr(&self, index: NodeIndex) -> Option<&CallExprData> {
        match self.get(index)? {
            Node::CallExpression(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_binary_expr(&self, index: NodeIndex) -> Option<&BinaryExprData> {
        match self.get(index)? {
            Node::BinaryExpression(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_access_expr(&self, index: NodeIndex) -> Option<&AccessExprData> {
        match self.get(index)? {
            Node::PropertyAccessExpression(data) | Node::ElementAccessExpression(data) => {
                Some(data)
            }
            _ => None,
        }
    }

    /// Function declaration, function expression or arrow function.
    pub fn get_function(&self, index: NodeIndex) -> Option<&FunctionData> {
        match self.get(index)? {
            Node::FunctionDeclaration(data)
            | Node::FunctionExpression(data)
            | Node::ArrowFunction(data) => Some(data),
            _ => None,
        }
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Direct children of a node in document order. Absent optional children
    /// are omitted.
    pub fn get_children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let Some(node) = self.get(index) else {
            return out;
        };

        fn one(out: &mut Vec<NodeIndex>, child: NodeIndex) {
            if child.is_some() {
                out.push(child);
            }
        }
        fn list(out: &mut Vec<NodeIndex>, children: &NodeList) {
            out.extend(children.nodes.iter().copied().filter(|c| c.is_some()));
        }

        match node {
            Node::SourceFile(data) => list(&mut out, &data.statements),
            Node::VariableStatement(data) | Node::VariableDeclarationList(data) => {
                list(&mut out, &data.declarations)
            }
            Node::VariableDeclaration(data) => {
                one(&mut out, data.name);
                one(&mut out, data.initializer);
            }
            Node::FunctionDeclaration(data)
            | Node::FunctionExpression(data)
            | Node::ArrowFunction(data) => {
                one(&mut out, data.name);
                list(&mut out, &data.parameters);
                one(&mut out, data.body);
            }
            Node::MethodDeclaration(data) => {
                one(&mut out, data.name);
                list(&mut out, &data.parameters);
                one(&mut out, data.body);
            }
            Node::Parameter(data) => {
                one(&mut out, data.name);
                one(&mut out, data.initializer);
            }
            Node::Block(data) => list(&mut out, &data.statements),
            Node::ExpressionStatement(data) => one(&mut out, data.expression),
            Node::ReturnStatement(data) => one(&mut out, data.expression),
            Node::IfStatement(data) => {
                one(&mut out, data.expression);
                one(&mut out, data.then_statement);
                one(&mut out, data.else_statement);
            }
            Node::WhileStatement(data) => {
                one(&mut out, data.condition);
                one(&mut out, data.statement);
            }
            Node::DoStatement(data) => {
                one(&mut out, data.statement);
                one(&mut out, data.condition);
            }
            Node::ForStatement(data) => {
                one(&mut out, data.initializer);
                one(&mut out, data.condition);
                one(&mut out, data.incrementor);
                one(&mut out, data.statement);
            }
            Node::ForInStatement(data) | Node::ForOfStatement(data) => {
                one(&mut out, data.initializer);
                one(&mut out, data.expression);
                one(&mut out, data.statement);
            }
            Node::BreakStatement(data) | Node::ContinueStatement(data) => {
                one(&mut out, data.label)
            }
            Node::ThrowStatement(data) => one(&mut out, data.expression),
            Node::ImportDeclaration(data) => {
                one(&mut out, data.default_binding);
                one(&mut out, data.namespace_binding);
                if let Some(named) = &data.named_bindings {
                    list(&mut out, named);
                }
                one(&mut out, data.module_specifier);
            }
            Node::ImportSpecifier(data) | Node::ExportSpecifier(data) => {
                one(&mut out, data.property_name);
                one(&mut out, data.name);
            }
            Node::ExportDeclaration(data) => {
                one(&mut out, data.declaration);
                if let Some(named) = &data.named_exports {
                    list(&mut out, named);
                }
                one(&mut out, data.module_specifier);
            }
            Node::ExportAssignment(data) => one(&mut out, data.expression),
            Node::ArrayBindingPattern(data) | Node::ObjectBindingPattern(data) => {
                list(&mut out, &data.elements)
            }
            Node::BindingElement(data) => {
                one(&mut out, data.property_name);
                one(&mut out, data.name);
                one(&mut out, data.initializer);
            }
            Node::ArrayLiteralExpression(data) => list(&mut out, &data.elements),
            Node::ObjectLiteralExpression(data) => list(&mut out, &data.properties),
            Node::PropertyAssignment(data) => {
                one(&mut out, data.name);
                one(&mut out, data.initializer);
            }
            Node::ShorthandPropertyAssignment(data) => one(&mut out, data.name),
            Node::SpreadElement(data) | Node::SpreadAssignment(data) => {
                one(&mut out, data.expression)
            }
            Node::ComputedPropertyName(data) => one(&mut out, data.expression),
            Node::ParenthesizedExpression(data) => one(&mut out, data.expression),
            Node::CallExpression(data) => {
                one(&mut out, data.expression);
                list(&mut out, &data.arguments);
            }
            Node::NewExpression(data) => {
                one(&mut out, data.expression);
                if let Some(args) = &data.arguments {
                    list(&mut out, args);
                }
            }
            Node::PropertyAccessExpression(data) | Node::ElementAccessExpression(data) => {
                one(&mut out, data.expression);
                one(&mut out, data.name_or_argument);
            }
            Node::PrefixUnaryExpression(data) | Node::PostfixUnaryExpression(data) => {
                one(&mut out, data.operand)
            }
            Node::AwaitExpression(data) => one(&mut out, data.expression),
            Node::BinaryExpression(data) => {
                one(&mut out, data.left);
                one(&mut out, data.right);
            }
            Node::TemplateExpression(data) => {
                for span in &data.spans {
                    one(&mut out, span.expression);
                }
            }
            Node::ConditionalExpression(data) => {
                one(&mut out, data.condition);
                one(&mut out, data.when_true);
                one(&mut out, data.when_false);
            }
            Node::EmptyStatement
            | Node::OmittedExpression
            | Node::Identifier(_)
            | Node::NumericLiteral(_)
            | Node::BigIntLiteral(_)
            | Node::StringLiteral(_)
            | Node::NoSubstitutionTemplateLiteral(_)
            | Node::TrueKeyword
            | Node::FalseKeyword
            | Node::NullKeyword
            | Node::ThisKeyword => {}
        }
        out
    }
}
