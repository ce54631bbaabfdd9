//! Builders for replacement nodes.
//!
//! Every node created here is synthesized (no source range). Original
//! subtrees passed in are referenced by index, never copied.

use super::symbols::{StateDeclarationInfo, StateKind};
use usefront_parser::parser::node::{
    AccessExprData, BinaryExprData, CallExprData, IdentifierData, Node, VariableDeclarationData,
};
use usefront_parser::{NodeArena, NodeIndex, NodeList};
use usefront_scanner::SyntaxKind;

/// Accessor of a `ref(...)` box.
pub const VALUE_ACCESSOR: &str = "value";

pub fn create_identifier(arena: &mut NodeArena, name: &str) -> NodeIndex {
    arena.add_synthesized(Node::Identifier(IdentifierData {
        escaped_text: name.to_string(),
    }))
}

/// `callee(argument)`
pub fn create_call(arena: &mut NodeArena, callee: &str, argument: NodeIndex) -> NodeIndex {
    let expression = create_identifier(arena, callee);
    arena.add_synthesized(Node::CallExpression(CallExprData {
        expression,
        arguments: NodeList::new(vec![argument]),
        question_dot: false,
    }))
}

/// Declarator `value_name = ref(initializer)` or
/// `value_name = reactive(initializer)`, ready for `NodeArena::replace`.
pub fn create_state_declarator(
    arena: &mut NodeArena,
    value_name: &str,
    kind: StateKind,
    initializer: NodeIndex,
) -> Node {
    let name = create_identifier(arena, value_name);
    let initializer = create_call(arena, kind.factory_name(), initializer);
    Node::VariableDeclaration(VariableDeclarationData { name, initializer })
}

/// Assignment target for a state variable: `v.value` when boxed, `v`
/// otherwise.
pub fn create_state_target(arena: &mut NodeArena, info: &StateDeclarationInfo) -> NodeIndex {
    let value = create_identifier(arena, &info.value_name);
    match info.kind {
        StateKind::Proxied => value,
        StateKind::Boxed => {
            let accessor = create_identifier(arena, VALUE_ACCESSOR);
            arena.add_synthesized(Node::PropertyAccessExpression(AccessExprData {
                expression: value,
                name_or_argument: accessor,
                question_dot: false,
            }))
        }
    }
}

/// `left <operator> right`
pub fn create_binary(
    arena: &mut NodeArena,
    left: NodeIndex,
    operator: SyntaxKind,
    right: NodeIndex,
) -> NodeIndex {
    arena.add_synthesized(create_binary_node(left, operator, right))
}

/// `target = value`, ready for `NodeArena::replace`.
pub fn create_assignment(target: NodeIndex, value: NodeIndex) -> Node {
    create_binary_node(target, SyntaxKind::EqualsToken, value)
}

/// Value of an updater call: the bare state name in place of the
/// updater's parameter, `value_name <operator> right`.
pub fn create_updated_value(
    arena: &mut NodeArena,
    value_name: &str,
    operator: SyntaxKind,
    right: NodeIndex,
) -> NodeIndex {
    let left = create_identifier(arena, value_name);
    create_binary(arena, left, operator, right)
}

fn create_binary_node(left: NodeIndex, operator_token: SyntaxKind, right: NodeIndex) -> Node {
    Node::BinaryExpression(BinaryExprData {
        left,
        operator_token,
        right,
    })
}
