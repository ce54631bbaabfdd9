//! Printer output for parsed and synthesized trees.

use usefront_emitter::{Printer, PrinterOptions};
use usefront_parser::parser::node::{
    BinaryExprData, CallExprData, IdentifierData, NewExprData, Node,
};
use usefront_parser::parser::{NodeArena, NodeIndex, NodeList, parse_source};
use usefront_scanner::SyntaxKind;

fn print(source: &str) -> String {
    let (arena, root) = parse_source("test.js", source).expect("source should parse");
    Printer::new(&arena, PrinterOptions::default()).print(root)
}

fn ident(arena: &mut NodeArena, name: &str) -> NodeIndex {
    arena.add_synthesized(Node::Identifier(IdentifierData {
        escaped_text: name.to_string(),
    }))
}

fn binary(arena: &mut NodeArena, left: NodeIndex, op: SyntaxKind, right: NodeIndex) -> NodeIndex {
    arena.add_synthesized(Node::BinaryExpression(BinaryExprData {
        left,
        operator_token: op,
        right,
    }))
}

#[test]
fn normalizes_spacing_and_semicolons() {
    assert_eq!(print("let   x=1\nx+=2"), "let x = 1;\nx += 2;\n");
}

#[test]
fn empty_source_prints_nothing() {
    assert_eq!(print(""), "");
    assert_eq!(print("// only a comment\n"), "");
}

#[test]
fn comments_are_dropped() {
    assert_eq!(print("// hi\nfoo(); /* c */"), "foo();\n");
}

#[test]
fn blocks_are_indented() {
    assert_eq!(
        print("if (a) b(); else { c(); if (d) { e(); } }"),
        "if (a) b(); else {\n  c();\n  if (d) {\n    e();\n  }\n}\n"
    );
    assert_eq!(print("{}"), "{}\n");
}

#[test]
fn loops() {
    assert_eq!(
        print("for (let i = 0; i < n; i++) { s += i; }"),
        "for (let i = 0; i < n; i++) {\n  s += i;\n}\n"
    );
    assert_eq!(print("for (const k in o) f(k);"), "for (const k in o) f(k);\n");
    assert_eq!(print("for (x of xs) f(x);"), "for (x of xs) f(x);\n");
    assert_eq!(print("for (;;) break;"), "for (;;) break;\n");
    assert_eq!(print("do x++; while (x < 5)"), "do x++; while (x < 5);\n");
    assert_eq!(print("while (true) continue"), "while (true) continue;\n");
}

#[test]
fn object_literals_are_compact() {
    assert_eq!(
        print("x = {a:1, b, [k]: 2, ...rest};"),
        "x = {a: 1, b, [k]: 2, ...rest};\n"
    );
    assert_eq!(print("x = {};"), "x = {};\n");
}

#[test]
fn array_literals() {
    assert_eq!(print("x = [1,2, ...ys];"), "x = [1, 2, ...ys];\n");
    assert_eq!(print("x = [];"), "x = [];\n");
}

#[test]
fn arrow_functions() {
    assert_eq!(print("const f = (a) => ({a});"), "const f = a => ({a});\n");
    assert_eq!(print("const g = (a, b) => a + b;"), "const g = (a, b) => a + b;\n");
    assert_eq!(print("const h = () => {};"), "const h = () => {};\n");
    assert_eq!(
        print("const i = async ([a]) => { await a; };"),
        "const i = async ([a]) => {\n  await a;\n};\n"
    );
}

#[test]
fn functions() {
    assert_eq!(
        print("function add(a, b = 1, ...rest) { return a + b; }"),
        "function add(a, b = 1, ...rest) {\n  return a + b;\n}\n"
    );
    assert_eq!(print("(function () {})();"), "(function () {})();\n");
}

#[test]
fn source_spelling_of_literals_is_kept() {
    assert_eq!(print("x = 'it\\'s';"), "x = 'it\\'s';\n");
    assert_eq!(print("x = 0x1F + 1e3;"), "x = 0x1F + 1e3;\n");
    assert_eq!(print("x = null || true;"), "x = null || true;\n");
}

#[test]
fn unary_operators() {
    assert_eq!(print("x = - -y;"), "x = - -y;\n");
    assert_eq!(print("x = typeof y;"), "x = typeof y;\n");
    assert_eq!(print("x = !y;"), "x = !y;\n");
    assert_eq!(print("x = void 0;"), "x = void 0;\n");
}

#[test]
fn member_calls_and_new() {
    assert_eq!(print("a?.b?.[c]?.(d);"), "a?.b?.[c]?.(d);\n");
    assert_eq!(print("new Foo;"), "new Foo;\n");
    assert_eq!(print("new Foo(1).bar();"), "new Foo(1).bar();\n");
}

#[test]
fn conditional_and_parenthesized() {
    assert_eq!(print("x = a ? b : c;"), "x = a ? b : c;\n");
    assert_eq!(print("x = (a + b) * c;"), "x = (a + b) * c;\n");
}

#[test]
fn modules() {
    assert_eq!(
        print("import React, { useState as us, useRef } from 'react';"),
        "import React, { useState as us, useRef } from 'react';\n"
    );
    assert_eq!(print("import * as R from \"r\";"), "import * as R from \"r\";\n");
    assert_eq!(print("import 'side';"), "import 'side';\n");
    assert_eq!(print("export { a, b as c };"), "export { a, b as c };\n");
    assert_eq!(
        print("export default function App() {}"),
        "export default function App() {}\n"
    );
    assert_eq!(print("export const x = 1;"), "export const x = 1;\n");
    assert_eq!(print("export default x;"), "export default x;\n");
}

#[test]
fn synthesized_trees_get_required_parentheses() {
    let mut arena = NodeArena::new();
    let a = ident(&mut arena, "a");
    let b = ident(&mut arena, "b");
    let c = ident(&mut arena, "c");
    let sum = binary(&mut arena, a, SyntaxKind::PlusToken, b);
    let product = binary(&mut arena, sum, SyntaxKind::AsteriskToken, c);
    assert_eq!(Printer::print_node(&arena, product), "(a + b) * c");

    let d = ident(&mut arena, "d");
    let e = ident(&mut arena, "e");
    let f = ident(&mut arena, "f");
    let inner = binary(&mut arena, e, SyntaxKind::MinusToken, f);
    let outer = binary(&mut arena, d, SyntaxKind::MinusToken, inner);
    assert_eq!(Printer::print_node(&arena, outer), "d - (e - f)");

    let g = ident(&mut arena, "g");
    let left = binary(&mut arena, g, SyntaxKind::MinusToken, d);
    let chained = binary(&mut arena, left, SyntaxKind::MinusToken, e);
    assert_eq!(Printer::print_node(&arena, chained), "g - d - e");
}

#[test]
fn synthesized_assignment_in_operand_position() {
    let mut arena = NodeArena::new();
    let a = ident(&mut arena, "a");
    let b = ident(&mut arena, "b");
    let c = ident(&mut arena, "c");
    let assign = binary(&mut arena, a, SyntaxKind::EqualsToken, b);
    let sum = binary(&mut arena, c, SyntaxKind::PlusToken, assign);
    assert_eq!(Printer::print_node(&arena, sum), "c + (a = b)");
}

#[test]
fn new_keeps_parentheses_around_a_called_callee() {
    let mut arena = NodeArena::new();
    let f = ident(&mut arena, "f");
    let call = arena.add_synthesized(Node::CallExpression(CallExprData {
        expression: f,
        arguments: NodeList::default(),
        question_dot: false,
    }));
    let new_expr = arena.add_synthesized(Node::NewExpression(NewExprData {
        expression: call,
        arguments: Some(NodeList::default()),
    }));
    assert_eq!(Printer::print_node(&arena, new_expr), "new (f())()");
    assert_eq!(print("x = new (f())();"), "x = new (f())();\n");
}

// Long chains are built iteratively by the parser; printing them must not
// recurse once per link. These run on the default test thread stack.

#[test]
fn long_binary_chain() {
    let terms = vec!["a"; 20_000].join(" + ");
    let source = format!("x = {terms};");
    assert_eq!(print(&source), format!("{source}\n"));
}

#[test]
fn long_member_and_call_chain() {
    let source = format!("a{}();", ".b()".repeat(10_000));
    assert_eq!(print(&source), format!("{source}\n"));
}

#[test]
fn chain_with_parenthesized_links() {
    assert_eq!(print("x = (a + b) * c - d - e;"), "x = (a + b) * c - d - e;\n");
    assert_eq!(print("x = a - (b - c) - d;"), "x = a - (b - c) - d;\n");
    assert_eq!(print("(a, b), c;"), "(a, b), c;\n");
}

#[test]
fn template_literals_keep_their_text() {
    assert_eq!(print("x = `a \\` ${b}`;"), "x = `a \\` ${b}`;\n");
    assert_eq!(
        print("x = `sum: ${a   +   b}!\n${ `in ${c}` }`;"),
        "x = `sum: ${a + b}!\n${`in ${c}`}`;\n"
    );
    assert_eq!(print("f(`${{a: 1}.a}`);"), "f(`${{a: 1}.a}`);\n");
}
