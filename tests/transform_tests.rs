//! Library entry point: options, reports and error propagation.

use usefront::{
    MismatchReason, StateKind, TransformError, TransformOptions, VisitorSet, parse, transform,
};
use usefront_parser::parser::node::Node;

fn options(visitors: VisitorSet) -> TransformOptions {
    TransformOptions {
        visitors,
        ..TransformOptions::default()
    }
}

#[test]
fn rewrites_with_default_options() {
    let output = transform(
        "const [count, setCount] = useState(0); setCount(c => c + 1);",
        &TransformOptions::default(),
    )
    .expect("transform should succeed");
    assert_eq!(output.code, "const count = ref(0);\ncount.value = count + 1;\n");
    assert_eq!(output.report.declarations_rewritten, 1);
    assert_eq!(output.report.calls_rewritten, 1);
}

#[test]
fn exposes_registered_setters() {
    let output = transform(
        "const [user, setUser] = useState({name: 'a'});",
        &TransformOptions::default(),
    )
    .expect("transform should succeed");
    let info = output.symbols.lookup("setUser").expect("setter registered");
    assert_eq!(info.value_name, "user");
    assert_eq!(info.kind, StateKind::Proxied);
    assert_eq!(output.symbols.len(), 1);
}

#[test]
fn parse_error_names_the_file() {
    let options = TransformOptions::default().with_file_name("App.jsx");
    let err = transform("let x = ;", &options).expect_err("should fail to parse");
    assert_eq!(err.to_string(), "App.jsx(1,9): error TS1109: Expression expected.");
    let TransformError::Parse(parse_error) = &err;
    assert_eq!(parse_error.code(), 1109);
    assert_eq!((parse_error.line, parse_error.column), (1, 9));
}

#[test]
fn parse_error_uses_default_file_name() {
    let err = transform("let x = ;", &TransformOptions::default()).expect_err("should fail");
    assert!(err.to_string().starts_with("input.js(1,9)"), "{err}");
}

#[test]
fn declarations_only() {
    let output = transform(
        "const [a, setA] = useState(0); setA(1);",
        &options(VisitorSet::DECLARATIONS),
    )
    .expect("transform should succeed");
    assert_eq!(output.code, "const a = ref(0);\nsetA(1);\n");
    assert_eq!(output.report.calls_rewritten, 0);
}

#[test]
fn call_sites_only_keeps_declarations() {
    let output = transform(
        "const [a, setA] = useState(0); setA(1);",
        &options(VisitorSet::CALL_SITES),
    )
    .expect("transform should succeed");
    assert_eq!(output.code, "const [a, setA] = useState(0);\na.value = 1;\n");
    assert_eq!(output.report.declarations_rewritten, 0);
    assert_eq!(output.report.calls_rewritten, 1);
}

#[test]
fn no_visitors_only_reprints() {
    let output = transform(
        "const [a, setA] = useState(0); setA(1);",
        &options(VisitorSet::empty()),
    )
    .expect("transform should succeed");
    assert_eq!(output.code, "const [a, setA] = useState(0);\nsetA(1);\n");
    assert!(output.report.is_unchanged());
    assert!(output.symbols.is_empty());
}

#[test]
fn retain_lines_keeps_blank_lines() {
    let options = TransformOptions {
        retain_lines: true,
        ..TransformOptions::default()
    };
    let output = transform(
        "\n\nconst [a, setA] = useState('x');\n\nsetA(b);",
        &options,
    )
    .expect("transform should succeed");
    assert_eq!(output.code, "\n\nconst a = ref('x');\n\na.value = b;\n");
}

#[test]
fn calls_before_the_declaration_are_left_alone() {
    let output = transform(
        "setA(1); const [a, setA] = useState(0);",
        &TransformOptions::default(),
    )
    .expect("transform should succeed");
    assert_eq!(output.code, "setA(1);\nconst a = ref(0);\n");
    assert_eq!(output.report.calls_rewritten, 0);
}

#[test]
fn malformed_setter_call_is_reported() {
    let output = transform(
        "const [a, setA] = useState(0); setA(1, 2);",
        &TransformOptions::default(),
    )
    .expect("transform should succeed");
    assert_eq!(output.code, "const a = ref(0);\nsetA(1, 2);\n");
    assert_eq!(output.report.skipped.len(), 1);
    assert_eq!(
        output.report.skipped[0].reason,
        MismatchReason::ArgumentCount { found: 2 }
    );
}

#[test]
fn parse_returns_source_file() {
    let (arena, root) = parse("const a = 1;", "a.js").expect("source should parse");
    match arena.get(root) {
        Some(Node::SourceFile(file)) => {
            assert_eq!(file.file_name, "a.js");
            assert_eq!(file.statements.nodes.len(), 1);
        }
        other => panic!("expected a source file, got {other:?}"),
    }
}

#[test]
fn excessive_nesting_is_a_parse_error() {
    let source = format!("x = {}1{};", "(".repeat(240), ")".repeat(240));
    let err = transform(&source, &TransformOptions::default()).expect_err("should fail");
    let TransformError::Parse(parse_error) = &err;
    assert_eq!(parse_error.code(), 18005);
}

#[test]
fn long_updater_chain_is_rewritten() {
    let tail = " + 1".repeat(20_000);
    let source = format!("const [n, setN] = useState(0); setN(n{tail});");
    let output =
        transform(&source, &TransformOptions::default()).expect("transform should succeed");
    assert_eq!(output.code, format!("const n = ref(0);\nn.value = n{tail};\n"));
}

#[test]
fn string_setter_argument_is_left_as_written() {
    let output = transform(
        "const [name, setName] = useState(''); setName('hello');",
        &TransformOptions::default(),
    )
    .expect("transform should succeed");
    assert_eq!(output.code, "const name = ref('');\nsetName('hello');\n");
    assert_eq!(output.report.calls_rewritten, 0);
    assert_eq!(
        output.report.skipped[0].reason,
        MismatchReason::UnsupportedArgument {
            kind: usefront_parser::parser::NodeKind::StringLiteral,
        }
    );
}

#[test]
fn setters_inside_template_substitutions_are_rewritten() {
    let output = transform(
        "const [n, setN] = useState(0);\nlog(`clicked ${setN(n + 1)} times`);",
        &TransformOptions::default(),
    )
    .expect("transform should succeed");
    assert_eq!(
        output.code,
        "const n = ref(0);\nlog(`clicked ${n.value = n + 1} times`);\n"
    );
    assert_eq!(output.report.calls_rewritten, 1);
}

#[test]
fn template_initial_value_is_proxied() {
    let output = transform(
        "const [label, setLabel] = useState(`a`);\nsetLabel(`b`);",
        &TransformOptions::default(),
    )
    .expect("transform should succeed");
    assert_eq!(output.code, "const label = reactive(`a`);\nsetLabel(`b`);\n");
    let info = output.symbols.lookup("setLabel").expect("setter registered");
    assert_eq!(info.kind, StateKind::Proxied);
}
