//! Pre-order traversal with per-kind visitor callbacks.
//!
//! Visitors run in registration order on every node as it is entered. A
//! visitor may replace the node it is given through `NodeArena::replace`;
//! the replacement is not dispatched again (to this or any later visitor),
//! but its children are walked, so subtrees preserved inside a replacement
//! are still visited.

use crate::parser::{NodeArena, NodeIndex, NodeKind};
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisitResult {
    Unchanged,
    Replaced,
}

/// Callbacks for the node kinds transforms rewrite. `C` is per-traversal
/// state shared by all visitors.
pub trait NodeVisitor<C> {
    fn name(&self) -> &'static str;

    fn visit_variable_declaration(
        &mut self,
        _arena: &mut NodeArena,
        _index: NodeIndex,
        _ctx: &mut C,
    ) -> VisitResult {
        VisitResult::Unchanged
    }

    fn visit_call_expression(
        &mut self,
        _arena: &mut NodeArena,
        _index: NodeIndex,
        _ctx: &mut C,
    ) -> VisitResult {
        VisitResult::Unchanged
    }
}

/// Walk the tree under `root` in document order.
pub fn traverse<C>(
    arena: &mut NodeArena,
    root: NodeIndex,
    visitors: &mut [&mut dyn NodeVisitor<C>],
    ctx: &mut C,
) {
    let mut stack = vec![root];
    while let Some(index) = stack.pop() {
        let Some(kind) = arena.kind(index) else {
            continue;
        };

        for visitor in visitors.iter_mut() {
            let result = match kind {
                NodeKind::VariableDeclaration => {
                    visitor.visit_variable_declaration(arena, index, ctx)
                }
                NodeKind::CallExpression => visitor.visit_call_expression(arena, index, ctx),
                _ => break,
            };
            if result == VisitResult::Replaced {
                trace!(visitor = visitor.name(), index = index.0, ?kind, "node replaced");
                break;
            }
        }

        let children = arena.get_children(index);
        stack.extend(children.into_iter().rev());
    }
}
