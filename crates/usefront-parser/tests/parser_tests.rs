//! Parser tests: statement and expression shapes.

use usefront_parser::parser::node::{Node, NodeKind, VariableKind};
use usefront_parser::parser::{NodeArena, NodeIndex, parse_source};
use usefront_scanner::SyntaxKind;

fn parse(source: &str) -> (NodeArena, NodeIndex) {
    parse_source("test.js", source).expect("source should parse")
}

fn statements(arena: &NodeArena, root: NodeIndex) -> Vec<NodeIndex> {
    match arena.get(root) {
        Some(Node::SourceFile(file)) => file.statements.nodes.clone(),
        other => panic!("expected source file, got {other:?}"),
    }
}

/// Expression of the `n`th statement, which must be an expression statement.
fn expression_of(arena: &NodeArena, root: NodeIndex, n: usize) -> NodeIndex {
    match arena.get(statements(arena, root)[n]) {
        Some(Node::ExpressionStatement(stmt)) => stmt.expression,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

/// First declarator of the `n`th statement, which must be a variable statement.
fn declarator_of(arena: &NodeArena, root: NodeIndex, n: usize) -> NodeIndex {
    match arena.get(statements(arena, root)[n]) {
        Some(Node::VariableStatement(list)) => list.declarations.nodes[0],
        other => panic!("expected variable statement, got {other:?}"),
    }
}

#[test]
fn test_parse_use_state_declaration() {
    let (arena, root) = parse("const [counter, setCounter] = useState(0);");
    let stmts = statements(&arena, root);
    assert_eq!(stmts.len(), 1);

    let Some(Node::VariableStatement(list)) = arena.get(stmts[0]) else {
        panic!("expected variable statement");
    };
    assert_eq!(list.kind, VariableKind::Const);
    assert_eq!(list.declarations.len(), 1);

    let decl = arena
        .get_variable_declaration(list.declarations.nodes[0])
        .expect("declarator");
    let Some(Node::ArrayBindingPattern(pattern)) = arena.get(decl.name) else {
        panic!("expected array binding pattern");
    };
    assert_eq!(pattern.elements.len(), 2);
    for (element, expected) in pattern.elements.nodes.iter().zip(["counter", "setCounter"]) {
        let Some(Node::BindingElement(binding)) = arena.get(*element) else {
            panic!("expected binding element");
        };
        assert!(!binding.dot_dot_dot);
        assert!(binding.initializer.is_none());
        assert_eq!(arena.identifier_text(binding.name), Some(expected));
    }

    let call = arena.get_call_expr(decl.initializer).expect("call");
    assert_eq!(arena.identifier_text(call.expression), Some("useState"));
    assert_eq!(call.arguments.len(), 1);
    assert_eq!(
        arena.kind(call.arguments.nodes[0]),
        Some(NodeKind::NumericLiteral)
    );
}

#[test]
fn test_parse_binding_pattern_holes_rest_and_defaults() {
    let (arena, root) = parse("let [a = 1, , ...rest] = xs;");
    let decl = arena
        .get_variable_declaration(declarator_of(&arena, root, 0))
        .expect("declarator");
    let Some(Node::ArrayBindingPattern(pattern)) = arena.get(decl.name) else {
        panic!("expected array binding pattern");
    };
    let kinds: Vec<_> = pattern
        .elements
        .nodes
        .iter()
        .map(|&e| arena.kind(e))
        .collect();
    assert_eq!(
        kinds,
        vec![
            Some(NodeKind::BindingElement),
            Some(NodeKind::OmittedExpression),
            Some(NodeKind::BindingElement),
        ]
    );
    let Some(Node::BindingElement(first)) = arena.get(pattern.elements.nodes[0]) else {
        panic!();
    };
    assert!(first.initializer.is_some());
    let Some(Node::BindingElement(last)) = arena.get(pattern.elements.nodes[2]) else {
        panic!();
    };
    assert!(last.dot_dot_dot);
}

#[test]
fn test_parse_object_binding_pattern() {
    let (arena, root) = parse("const { a, b: c, ...others } = props;");
    let decl = arena
        .get_variable_declaration(declarator_of(&arena, root, 0))
        .expect("declarator");
    let Some(Node::ObjectBindingPattern(pattern)) = arena.get(decl.name) else {
        panic!("expected object binding pattern");
    };
    assert_eq!(pattern.elements.len(), 3);
    let Some(Node::BindingElement(renamed)) = arena.get(pattern.elements.nodes[1]) else {
        panic!();
    };
    assert_eq!(arena.identifier_text(renamed.property_name), Some("b"));
    assert_eq!(arena.identifier_text(renamed.name), Some("c"));
}

#[test]
fn test_binary_precedence() {
    let (arena, root) = parse("a + b * c;");
    let expr = expression_of(&arena, root, 0);
    let add = arena.get_binary_expr(expr).expect("binary");
    assert_eq!(add.operator_token, SyntaxKind::PlusToken);
    assert_eq!(arena.identifier_text(add.left), Some("a"));
    let mul = arena.get_binary_expr(add.right).expect("nested binary");
    assert_eq!(mul.operator_token, SyntaxKind::AsteriskToken);
}

#[test]
fn test_binary_left_associative() {
    let (arena, root) = parse("a - b - c;");
    let expr = expression_of(&arena, root, 0);
    let outer = arena.get_binary_expr(expr).expect("binary");
    assert_eq!(arena.identifier_text(outer.right), Some("c"));
    assert!(arena.get_binary_expr(outer.left).is_some());
}

#[test]
fn test_exponent_right_associative() {
    let (arena, root) = parse("a ** b ** c;");
    let expr = expression_of(&arena, root, 0);
    let outer = arena.get_binary_expr(expr).expect("binary");
    assert_eq!(arena.identifier_text(outer.left), Some("a"));
    assert!(arena.get_binary_expr(outer.right).is_some());
}

#[test]
fn test_assignment_is_right_associative() {
    let (arena, root) = parse("a = b = 1;");
    let expr = expression_of(&arena, root, 0);
    let outer = arena.get_binary_expr(expr).expect("assignment");
    assert_eq!(outer.operator_token, SyntaxKind::EqualsToken);
    let inner = arena.get_binary_expr(outer.right).expect("inner assignment");
    assert_eq!(inner.operator_token, SyntaxKind::EqualsToken);
}

#[test]
fn test_simple_arrow_function() {
    let (arena, root) = parse("setCounter(c => c + 1);");
    let call = arena
        .get_call_expr(expression_of(&arena, root, 0))
        .expect("call");
    let arrow = call.arguments.nodes[0];
    assert_eq!(arena.kind(arrow), Some(NodeKind::ArrowFunction));
    let func = arena.get_function(arrow).expect("function data");
    assert_eq!(func.parameters.len(), 1);
    assert_eq!(arena.kind(func.body), Some(NodeKind::BinaryExpression));
}

#[test]
fn test_parenthesized_arrow_function_with_block_body() {
    let (arena, root) = parse("const f = (a, b = 2) => { return a + b; };");
    let decl = arena
        .get_variable_declaration(declarator_of(&arena, root, 0))
        .expect("declarator");
    let func = arena.get_function(decl.initializer).expect("arrow");
    assert_eq!(func.parameters.len(), 2);
    assert_eq!(arena.kind(func.body), Some(NodeKind::Block));
}

#[test]
fn test_parenthesized_expression_is_not_arrow() {
    let (arena, root) = parse("(a + b) * c;");
    let expr = expression_of(&arena, root, 0);
    let mul = arena.get_binary_expr(expr).expect("binary");
    assert_eq!(arena.kind(mul.left), Some(NodeKind::ParenthesizedExpression));
}

#[test]
fn test_async_arrow_and_call_named_async() {
    let (arena, root) = parse("const f = async x => await x;\nasync(1);");
    let decl = arena
        .get_variable_declaration(declarator_of(&arena, root, 0))
        .expect("declarator");
    assert!(arena.get_function(decl.initializer).expect("arrow").is_async);

    let call = arena
        .get_call_expr(expression_of(&arena, root, 1))
        .expect("call");
    assert_eq!(arena.identifier_text(call.expression), Some("async"));
}

#[test]
fn test_object_literal_members() {
    let (arena, root) = parse("x = { a: 1, b, [k]: 2, ...rest, m() {}, 'q': 3 };");
    let assign = arena
        .get_binary_expr(expression_of(&arena, root, 0))
        .expect("assignment");
    let Some(Node::ObjectLiteralExpression(object)) = arena.get(assign.right) else {
        panic!("expected object literal");
    };
    let kinds: Vec<_> = object
        .properties
        .nodes
        .iter()
        .map(|&p| arena.kind(p).expect("property"))
        .collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::PropertyAssignment,
            NodeKind::ShorthandPropertyAssignment,
            NodeKind::PropertyAssignment,
            NodeKind::SpreadAssignment,
            NodeKind::MethodDeclaration,
            NodeKind::PropertyAssignment,
        ]
    );
}

#[test]
fn test_member_call_chain_and_optional_chaining() {
    let (arena, root) = parse("a.b[c](d)?.e;");
    let expr = expression_of(&arena, root, 0);
    let outer = arena.get_access_expr(expr).expect("property access");
    assert!(outer.question_dot);
    assert_eq!(arena.identifier_text(outer.name_or_argument), Some("e"));
    let call = arena.get_call_expr(outer.expression).expect("call");
    assert_eq!(
        arena.kind(call.expression),
        Some(NodeKind::ElementAccessExpression)
    );
}

#[test]
fn test_new_expression_binds_arguments() {
    let (arena, root) = parse("new Foo(1).bar;");
    let expr = expression_of(&arena, root, 0);
    let access = arena.get_access_expr(expr).expect("property access");
    let Some(Node::NewExpression(new_expr)) = arena.get(access.expression) else {
        panic!("expected new expression");
    };
    assert_eq!(new_expr.arguments.as_ref().map(|a| a.len()), Some(1));
}

#[test]
fn test_prefix_and_postfix_unary() {
    let (arena, root) = parse("-x;\ni++;\ntypeof y;");
    let Some(Node::PrefixUnaryExpression(neg)) = arena.get(expression_of(&arena, root, 0)) else {
        panic!("expected prefix unary");
    };
    assert_eq!(neg.operator, SyntaxKind::MinusToken);
    assert_eq!(
        arena.kind(expression_of(&arena, root, 1)),
        Some(NodeKind::PostfixUnaryExpression)
    );
    let Some(Node::PrefixUnaryExpression(type_of)) = arena.get(expression_of(&arena, root, 2))
    else {
        panic!("expected typeof");
    };
    assert_eq!(type_of.operator, SyntaxKind::TypeOfKeyword);
}

#[test]
fn test_conditional_expression() {
    let (arena, root) = parse("a ? b : c ? d : e;");
    let Some(Node::ConditionalExpression(cond)) = arena.get(expression_of(&arena, root, 0))
    else {
        panic!("expected conditional");
    };
    assert_eq!(arena.kind(cond.when_false), Some(NodeKind::ConditionalExpression));
}

#[test]
fn test_automatic_semicolon_insertion() {
    let (arena, root) = parse("let a = 1\nlet b = 2\na + b");
    assert_eq!(statements(&arena, root).len(), 3);
}

#[test]
fn test_return_without_value_before_newline() {
    let (arena, root) = parse("function f() {\n  return\n  1;\n}");
    let func = arena
        .get_function(statements(&arena, root)[0])
        .expect("function");
    let Some(Node::Block(body)) = arena.get(func.body) else {
        panic!("expected block body");
    };
    assert_eq!(body.statements.len(), 2);
    let Some(Node::ReturnStatement(ret)) = arena.get(body.statements.nodes[0]) else {
        panic!("expected return");
    };
    assert!(ret.expression.is_none());
}

#[test]
fn test_control_flow_statements() {
    let source = "\
if (a) { b(); } else c();
while (x) x--;
do { y(); } while (y)
for (let i = 0; i < n; i++) { continue; }
for (const k in obj) {}
for (const v of list) break;
throw err;
;";
    let (arena, root) = parse(source);
    let kinds: Vec<_> = statements(&arena, root)
        .into_iter()
        .map(|s| arena.kind(s).expect("statement"))
        .collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::IfStatement,
            NodeKind::WhileStatement,
            NodeKind::DoStatement,
            NodeKind::ForStatement,
            NodeKind::ForInStatement,
            NodeKind::ForOfStatement,
            NodeKind::ThrowStatement,
            NodeKind::EmptyStatement,
        ]
    );
}

#[test]
fn test_import_and_export_forms() {
    let source = "\
import React, { useState as useHook, useEffect } from 'react';
import * as ns from \"lib\";
import 'side-effect';
export const a = 1;
export function f() {}
export default function () {}
export { a as b };
export * from './mod';
export default a + 1;";
    let (arena, root) = parse(source);
    let kinds: Vec<_> = statements(&arena, root)
        .into_iter()
        .map(|s| arena.kind(s).expect("statement"))
        .collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::ImportDeclaration,
            NodeKind::ImportDeclaration,
            NodeKind::ImportDeclaration,
            NodeKind::ExportDeclaration,
            NodeKind::ExportDeclaration,
            NodeKind::ExportDeclaration,
            NodeKind::ExportDeclaration,
            NodeKind::ExportDeclaration,
            NodeKind::ExportAssignment,
        ]
    );

    let Some(Node::ImportDeclaration(import)) = arena.get(statements(&arena, root)[0]) else {
        panic!();
    };
    assert_eq!(arena.identifier_text(import.default_binding), Some("React"));
    assert_eq!(import.named_bindings.as_ref().map(|n| n.len()), Some(2));
}

#[test]
fn test_literals_keep_raw_text() {
    let (arena, root) = parse("f('a\\'b', 0x1F, 10n);");
    let call = arena
        .get_call_expr(expression_of(&arena, root, 0))
        .expect("call");
    let string = arena.get_literal(call.arguments.nodes[0]).expect("string");
    assert_eq!(string.text, "a'b");
    assert_eq!(string.raw_text, "'a\\'b'");
    let hex = arena.get_literal(call.arguments.nodes[1]).expect("number");
    assert_eq!(hex.raw_text, "0x1F");
    assert_eq!(
        arena.kind(call.arguments.nodes[2]),
        Some(NodeKind::BigIntLiteral)
    );
}

#[test]
fn test_comments_are_skipped() {
    let (arena, root) = parse("// leading\nconst a = /* inline */ 1; /* trailing */");
    assert_eq!(statements(&arena, root).len(), 1);
}

#[test]
fn test_node_ranges_cover_source() {
    let source = "const [a, setA] = useState(1);";
    let (arena, root) = parse(source);
    let stmt = statements(&arena, root)[0];
    let range = arena.range(stmt);
    assert_eq!(range.pos, 0);
    assert_eq!(range.end as usize, source.len());

    let decl = declarator_of(&arena, root, 0);
    let decl_range = arena.range(decl);
    assert_eq!(
        &source[decl_range.pos as usize..decl_range.end as usize],
        "[a, setA] = useState(1)"
    );
}

#[test]
fn test_children_in_document_order() {
    let (arena, root) = parse("f(a, b);");
    let call = expression_of(&arena, root, 0);
    let names: Vec<_> = arena
        .get_children(call)
        .into_iter()
        .map(|c| arena.identifier_text(c).map(str::to_string))
        .collect();
    assert_eq!(
        names,
        vec![
            Some("f".to_string()),
            Some("a".to_string()),
            Some("b".to_string())
        ]
    );
}

#[test]
fn test_arena_serializes_to_json() {
    let (arena, _) = parse("const x = 1;");
    let json = serde_json::to_value(&arena).expect("serialize");
    assert!(json["nodes"].as_array().is_some_and(|nodes| !nodes.is_empty()));
}

#[test]
fn test_parse_template_literals() {
    let (arena, root) = parse("`plain \\${x}`;\n`a${b}c${{d: 1}.d}e`;");

    let plain = expression_of(&arena, root, 0);
    let Some(Node::NoSubstitutionTemplateLiteral(plain)) = arena.get(plain) else {
        panic!("expected a no-substitution template");
    };
    assert_eq!(plain.text, "plain \\${x}");
    assert_eq!(plain.raw_text, "`plain \\${x}`");

    let template_index = expression_of(&arena, root, 1);
    let Some(Node::TemplateExpression(template)) = arena.get(template_index) else {
        panic!("expected a template expression");
    };
    assert_eq!(template.head, "a");
    let literals: Vec<&str> = template.spans.iter().map(|span| span.literal.as_str()).collect();
    assert_eq!(literals, ["c", "e"]);
    assert_eq!(arena.kind(template.spans[0].expression), Some(NodeKind::Identifier));
    assert_eq!(
        arena.kind(template.spans[1].expression),
        Some(NodeKind::PropertyAccessExpression)
    );
    assert_eq!(
        arena.get_children(template_index),
        vec![template.spans[0].expression, template.spans[1].expression]
    );
}

#[test]
fn test_template_inside_arrow_parameters() {
    let (arena, root) = parse("const f = (a = `${b})`) => a;");
    let Some(Node::VariableDeclaration(decl)) = arena.get(declarator_of(&arena, root, 0)) else {
        panic!("expected a declarator");
    };
    assert_eq!(arena.kind(decl.initializer), Some(NodeKind::ArrowFunction));
}
