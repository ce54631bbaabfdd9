use super::*;
use usefront_parser::parser::parse_source;

fn parse(source: &str) -> NodeArena {
    let (arena, _) = parse_source("test.js", source).expect("source should parse");
    arena
}

/// First node of `kind` in source order.
fn first(arena: &NodeArena, kind: NodeKind) -> NodeIndex {
    (0..arena.len() as u32)
        .map(NodeIndex)
        .filter(|&index| arena.kind(index) == Some(kind))
        .min_by_key(|&index| arena.range(index).pos)
        .expect("node of requested kind")
}

fn declaration(source: &str) -> MatchOutcome<StateDeclarationMatch> {
    let arena = parse(source);
    match_state_declaration(&arena, first(&arena, NodeKind::VariableDeclaration))
}

fn initial_kind(source: &str) -> StateKind {
    let arena = parse(source);
    let decl = first(&arena, NodeKind::VariableDeclaration);
    let initializer = arena
        .get_variable_declaration(decl)
        .map(|decl| decl.initializer)
        .expect("declarator");
    classify_initial_value(&arena, initializer)
}

/// Classify the argument of the first call in `source`.
fn setter_argument(source: &str) -> (NodeArena, MatchOutcome<SetterArgument>) {
    let arena = parse(source);
    let call = first(&arena, NodeKind::CallExpression);
    let argument = arena
        .get_call_expr(call)
        .map(|call| call.arguments.nodes[0])
        .expect("call");
    let outcome = classify_setter_argument(&arena, argument);
    (arena, outcome)
}

fn symbols_with(setter: &str, value: &str, kind: StateKind) -> StateSymbolTable {
    let mut table = StateSymbolTable::new();
    table.register(
        setter,
        StateDeclarationInfo {
            kind,
            value_name: value.to_string(),
        },
    );
    table
}

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn matches_canonical_declaration() {
    let MatchOutcome::Matched(matched) = declaration("const [count, setCount] = useState(0);")
    else {
        panic!("expected a match");
    };
    assert_eq!(matched.value_name, "count");
    assert_eq!(matched.setter_name, "setCount");
}

#[test]
fn matches_through_parentheses() {
    assert!(declaration("let [a, setA] = (useState)((1));").is_matched());
}

#[test]
fn other_hooks_are_not_applicable() {
    assert_eq!(
        declaration("const [a, setA] = useReducer(0);"),
        MatchOutcome::NotApplicable
    );
    assert_eq!(declaration("const a = useState(0);"), MatchOutcome::NotApplicable);
    assert_eq!(
        declaration("const {a, setA} = useState(0);"),
        MatchOutcome::NotApplicable
    );
    assert_eq!(declaration("let a;"), MatchOutcome::NotApplicable);
}

#[test]
fn setter_naming_is_enforced() {
    assert_eq!(
        declaration("const [x, y] = useState(1);"),
        MatchOutcome::Malformed(MismatchReason::SetterNameMismatch {
            expected: "setX".to_string(),
            found: "y".to_string(),
        })
    );
    assert!(!declaration("const [count, setcount] = useState(1);").is_matched());
}

#[test]
fn pattern_shape_is_enforced() {
    assert_eq!(
        declaration("const [a] = useState(1);"),
        MatchOutcome::Malformed(MismatchReason::PatternArity { found: 1 })
    );
    assert_eq!(
        declaration("const [a, setA, b] = useState(1);"),
        MatchOutcome::Malformed(MismatchReason::PatternArity { found: 3 })
    );
    assert_eq!(
        declaration("const [a = 1, setA] = useState(1);"),
        MatchOutcome::Malformed(MismatchReason::PatternElementNotIdentifier { position: 0 })
    );
    assert_eq!(
        declaration("const [a, ...setA] = useState(1);"),
        MatchOutcome::Malformed(MismatchReason::PatternElementNotIdentifier { position: 1 })
    );
    assert_eq!(
        declaration("const [, setA] = useState(1);"),
        MatchOutcome::Malformed(MismatchReason::PatternElementNotIdentifier { position: 0 })
    );
    assert_eq!(
        declaration("const [[a], setA] = useState(1);"),
        MatchOutcome::Malformed(MismatchReason::PatternElementNotIdentifier { position: 0 })
    );
}

#[test]
fn use_state_arity_is_enforced() {
    assert_eq!(
        declaration("const [a, setA] = useState();"),
        MatchOutcome::Malformed(MismatchReason::ArgumentCount { found: 0 })
    );
    assert_eq!(
        declaration("const [a, setA] = useState(1, 2);"),
        MatchOutcome::Malformed(MismatchReason::ArgumentCount { found: 2 })
    );
    assert_eq!(
        declaration("const [a, setA] = useState(...args);"),
        MatchOutcome::Malformed(MismatchReason::SpreadArgument)
    );
}

#[test]
fn setter_name_uppercases_first_char() {
    assert_eq!(setter_name_for("counter"), "setCounter");
    assert_eq!(setter_name_for("Count"), "setCount");
    assert_eq!(setter_name_for("_x"), "set_x");
    assert_eq!(setter_name_for("éclair"), "setÉclair");
    assert_eq!(setter_name_for(""), "set");
}

// =============================================================================
// Initial values
// =============================================================================

#[test]
fn primitive_literals_are_boxed() {
    for init in ["0", "1.5", "'a'", "\"b\"", "true", "false", "null", "(0)"] {
        let source = format!("const [a, setA] = useState({init});");
        assert_eq!(initial_kind(&source), StateKind::Boxed, "{init}");
    }
}

#[test]
fn everything_else_is_proxied() {
    for init in ["{a: 1}", "[1, 2]", "props", "-1", "compute()", "a + 1", "10n", "undefined"] {
        let source = format!("const [a, setA] = useState({init});");
        assert_eq!(initial_kind(&source), StateKind::Proxied, "{init}");
    }
}

// =============================================================================
// Setter calls
// =============================================================================

#[test]
fn registered_setter_call_matches() {
    let arena = parse("setA(1);");
    let symbols = symbols_with("setA", "a", StateKind::Boxed);
    let call = first(&arena, NodeKind::CallExpression);
    let MatchOutcome::Matched(matched) = match_setter_call(&arena, call, &symbols) else {
        panic!("expected a match");
    };
    assert_eq!(matched.setter_name, "setA");
    assert_eq!(matched.info.value_name, "a");
    assert_eq!(matched.info.kind, StateKind::Boxed);
}

#[test]
fn unregistered_or_member_calls_are_not_applicable() {
    let symbols = symbols_with("setA", "a", StateKind::Boxed);
    for source in ["setB(1);", "obj.setA(1);", "setA.call(null, 1);"] {
        let arena = parse(source);
        let call = first(&arena, NodeKind::CallExpression);
        assert_eq!(
            match_setter_call(&arena, call, &symbols),
            MatchOutcome::NotApplicable,
            "{source}"
        );
    }
}

#[test]
fn setter_call_arity_is_enforced() {
    let symbols = symbols_with("setA", "a", StateKind::Boxed);
    let cases = [
        ("setA();", MismatchReason::ArgumentCount { found: 0 }),
        ("setA(1, 2);", MismatchReason::ArgumentCount { found: 2 }),
        ("setA(...xs);", MismatchReason::SpreadArgument),
        ("setA?.(1);", MismatchReason::OptionalCall),
    ];
    for (source, reason) in cases {
        let arena = parse(source);
        let call = first(&arena, NodeKind::CallExpression);
        assert_eq!(
            match_setter_call(&arena, call, &symbols),
            MatchOutcome::Malformed(reason),
            "{source}"
        );
    }
}

#[test]
fn direct_value_shapes() {
    let arguments = ["x", "1", "true", "null", "[1]", "{a: 2}", "a + 1", "a instanceof B", "(x)"];
    for argument in arguments {
        let (_, outcome) = setter_argument(&format!("f({argument});"));
        assert!(
            matches!(outcome, MatchOutcome::Matched(SetterArgument::Direct(_))),
            "{argument}: {outcome:?}"
        );
    }
}

#[test]
fn logical_and_assignment_operators_are_rejected() {
    for (argument, operator) in [
        ("a && b", SyntaxKind::AmpersandAmpersandToken),
        ("a || b", SyntaxKind::BarBarToken),
        ("a ?? b", SyntaxKind::QuestionQuestionToken),
        ("a = b", SyntaxKind::EqualsToken),
        ("(a, b)", SyntaxKind::CommaToken),
    ] {
        let (_, outcome) = setter_argument(&format!("f({argument});"));
        assert_eq!(
            outcome,
            MatchOutcome::Malformed(MismatchReason::UnsupportedOperator { operator }),
            "{argument}"
        );
    }
}

#[test]
fn other_arguments_are_unsupported() {
    let cases = [
        ("'s'", NodeKind::StringLiteral),
        ("g()", NodeKind::CallExpression),
        ("a.b", NodeKind::PropertyAccessExpression),
        ("-1", NodeKind::PrefixUnaryExpression),
        ("c ? 1 : 2", NodeKind::ConditionalExpression),
        ("function (p) { return p + 1; }", NodeKind::FunctionExpression),
    ];
    for (argument, kind) in cases {
        let (_, outcome) = setter_argument(&format!("f({argument});"));
        assert_eq!(
            outcome,
            MatchOutcome::Malformed(MismatchReason::UnsupportedArgument { kind }),
            "{argument}"
        );
    }
}

#[test]
fn updater_shape_is_matched() {
    let (arena, outcome) = setter_argument("f(p => p + step);");
    let MatchOutcome::Matched(SetterArgument::Updater {
        parameter_name,
        operator,
        right,
    }) = outcome
    else {
        panic!("expected an updater, got {outcome:?}");
    };
    assert_eq!(parameter_name.as_deref(), Some("p"));
    assert_eq!(operator, SyntaxKind::PlusToken);
    assert_eq!(arena.identifier_text(right), Some("step"));
}

#[test]
fn updater_left_operand_is_positional() {
    let (_, outcome) = setter_argument("f((p) => (other * 2));");
    assert!(matches!(
        outcome,
        MatchOutcome::Matched(SetterArgument::Updater {
            operator: SyntaxKind::AsteriskToken,
            ..
        })
    ));
}

#[test]
fn malformed_updaters() {
    let cases = [
        ("f(() => a + 1);", MismatchReason::UpdaterParameterCount { found: 0 }),
        ("f((p, q) => p + q);", MismatchReason::UpdaterParameterCount { found: 2 }),
        ("f(async p => p + 1);", MismatchReason::UpdaterAsync),
        ("f(p => { return p + 1; });", MismatchReason::UpdaterBlockBody),
        (
            "f(p => !p);",
            MismatchReason::UpdaterBodyNotBinary {
                kind: NodeKind::PrefixUnaryExpression,
            },
        ),
        (
            "f(p => p && q);",
            MismatchReason::UpdaterBodyNotBinary {
                kind: NodeKind::BinaryExpression,
            },
        ),
        ("f(p => 1 + p);", MismatchReason::UpdaterLeftOperandNotIdentifier),
    ];
    for (source, reason) in cases {
        let (_, outcome) = setter_argument(source);
        assert_eq!(outcome, MatchOutcome::Malformed(reason), "{source}");
    }
}

#[test]
fn reasons_render_as_text() {
    assert_eq!(
        MismatchReason::SetterNameMismatch {
            expected: "setX".to_string(),
            found: "y".to_string(),
        }
        .to_string(),
        "setter 'y' does not follow the 'setX' naming"
    );
    assert_eq!(
        MismatchReason::UnsupportedOperator {
            operator: SyntaxKind::BarBarToken,
        }
        .to_string(),
        "operator '||' is not a binary operator"
    );
}
