//! Traversal order and replacement semantics of `syntax::visitor`.

use usefront_parser::parser::node::{CallExprData, IdentifierData, Node};
use usefront_parser::parser::{NodeArena, NodeIndex, NodeList, parse_source};
use usefront_parser::syntax::transform_utils::{
    contains_identifier, identifier_text_through_parens, skip_parentheses,
};
use usefront_parser::syntax::{NodeVisitor, VisitResult, traverse};

#[derive(Default)]
struct Log {
    entries: Vec<String>,
}

/// Records callee names of every call it sees.
struct CallRecorder {
    tag: &'static str,
}

impl NodeVisitor<Log> for CallRecorder {
    fn name(&self) -> &'static str {
        self.tag
    }

    fn visit_call_expression(
        &mut self,
        arena: &mut NodeArena,
        index: NodeIndex,
        ctx: &mut Log,
    ) -> VisitResult {
        let callee = arena
            .get_call_expr(index)
            .and_then(|call| arena.identifier_text(call.expression))
            .unwrap_or("?");
        ctx.entries.push(format!("{}:{callee}", self.tag));
        VisitResult::Unchanged
    }
}

/// Renames calls to `old` into calls to `wrap(original_call_arguments...)`.
struct Wrapper;

impl NodeVisitor<Log> for Wrapper {
    fn name(&self) -> &'static str {
        "wrapper"
    }

    fn visit_call_expression(
        &mut self,
        arena: &mut NodeArena,
        index: NodeIndex,
        ctx: &mut Log,
    ) -> VisitResult {
        let Some(call) = arena.get_call_expr(index) else {
            return VisitResult::Unchanged;
        };
        if arena.identifier_text(call.expression) != Some("old") {
            return VisitResult::Unchanged;
        }
        let arguments = call.arguments.clone();
        let callee = arena.add_synthesized(Node::Identifier(IdentifierData {
            escaped_text: "wrap".to_string(),
        }));
        arena.replace(
            index,
            Node::CallExpression(CallExprData {
                expression: callee,
                arguments,
                question_dot: false,
            }),
        );
        ctx.entries.push("wrapper:replaced".to_string());
        VisitResult::Replaced
    }
}

/// Counts declarators.
struct DeclarationCounter;

impl NodeVisitor<Log> for DeclarationCounter {
    fn name(&self) -> &'static str {
        "declarations"
    }

    fn visit_variable_declaration(
        &mut self,
        arena: &mut NodeArena,
        index: NodeIndex,
        ctx: &mut Log,
    ) -> VisitResult {
        let name = arena
            .get_variable_declaration(index)
            .and_then(|decl| arena.identifier_text(decl.name))
            .unwrap_or("?");
        ctx.entries.push(format!("decl:{name}"));
        VisitResult::Unchanged
    }
}

#[test]
fn test_visits_in_document_order() {
    let (mut arena, root) =
        parse_source("t.js", "const a = f(); g(h()); function k() { const b = i(); }")
            .expect("parse");
    let mut log = Log::default();
    let mut calls = CallRecorder { tag: "call" };
    let mut decls = DeclarationCounter;
    traverse(&mut arena, root, &mut [&mut decls, &mut calls], &mut log);
    assert_eq!(
        log.entries,
        vec!["decl:a", "call:f", "call:g", "call:h", "decl:b", "call:i"]
    );
}

#[test]
fn test_visitors_run_in_registration_order() {
    let (mut arena, root) = parse_source("t.js", "f();").expect("parse");
    let mut log = Log::default();
    let mut first = CallRecorder { tag: "first" };
    let mut second = CallRecorder { tag: "second" };
    traverse(&mut arena, root, &mut [&mut first, &mut second], &mut log);
    assert_eq!(log.entries, vec!["first:f", "second:f"]);
}

#[test]
fn test_replaced_node_is_not_redispatched_but_children_are_walked() {
    let (mut arena, root) = parse_source("t.js", "old(inner());").expect("parse");
    let mut log = Log::default();
    let mut wrapper = Wrapper;
    let mut recorder = CallRecorder { tag: "after" };
    traverse(&mut arena, root, &mut [&mut wrapper, &mut recorder], &mut log);
    assert_eq!(log.entries, vec!["wrapper:replaced", "after:inner"]);
}

#[test]
fn test_replace_keeps_range_and_synthesized_nodes_have_none() {
    let (mut arena, root) = parse_source("t.js", "old(1);").expect("parse");
    let mut log = Log::default();
    let mut wrapper = Wrapper;
    traverse(&mut arena, root, &mut [&mut wrapper], &mut log);

    let call_index = (0..arena.len() as u32)
        .map(NodeIndex)
        .find(|&i| arena.get_call_expr(i).is_some())
        .expect("call node");
    let range = arena.range(call_index);
    assert_eq!((range.pos, range.end), (0, 6));

    let callee = arena.get_call_expr(call_index).expect("call").expression;
    assert_eq!(arena.identifier_text(callee), Some("wrap"));
    assert!(arena.range(callee).is_synthesized());
}

#[test]
fn test_skip_parentheses() {
    let (arena, root) = parse_source("t.js", "((x));").expect("parse");
    let Some(Node::SourceFile(file)) = arena.get(root) else {
        panic!("expected source file");
    };
    let Some(Node::ExpressionStatement(stmt)) = arena.get(file.statements.nodes[0]) else {
        panic!("expected expression statement");
    };
    let inner = skip_parentheses(&arena, stmt.expression);
    assert_eq!(arena.identifier_text(inner), Some("x"));
    assert_eq!(
        identifier_text_through_parens(&arena, stmt.expression),
        Some("x")
    );
    assert!(contains_identifier(&arena, root, "x"));
    assert!(!contains_identifier(&arena, root, "y"));
}

#[test]
fn test_empty_argument_list_is_empty_node_list() {
    let (arena, root) = parse_source("t.js", "f();").expect("parse");
    let call = (0..arena.len() as u32)
        .map(NodeIndex)
        .find_map(|i| arena.get_call_expr(i))
        .expect("call");
    assert_eq!(call.arguments, NodeList::default());
    assert_eq!(arena.get_children(root).len(), 1);
}
