//! Node helpers shared by transforms.

use crate::parser::node::Node;
use crate::parser::{NodeArena, NodeIndex};

/// Follow `ParenthesizedExpression` wrappers down to the inner expression.
#[must_use]
pub fn skip_parentheses(arena: &NodeArena, mut index: NodeIndex) -> NodeIndex {
    while let Some(Node::ParenthesizedExpression(paren)) = arena.get(index) {
        index = paren.expression;
    }
    index
}

/// Identifier text of `index`, looking through parentheses.
#[must_use]
pub fn identifier_text_through_parens(arena: &NodeArena, index: NodeIndex) -> Option<&str> {
    arena.identifier_text(skip_parentheses(arena, index))
}

/// Check whether `index` is the identifier `name`.
#[must_use]
pub fn is_identifier_named(arena: &NodeArena, index: NodeIndex, name: &str) -> bool {
    arena.identifier_text(index) == Some(name)
}

/// Check if any node under `index` (inclusive) is the identifier `name`.
#[must_use]
pub fn contains_identifier(arena: &NodeArena, index: NodeIndex, name: &str) -> bool {
    let mut stack = vec![index];
    while let Some(current) = stack.pop() {
        if is_identifier_named(arena, current, name) {
            return true;
        }
        stack.extend(arena.get_children(current));
    }
    false
}
