use super::reporter::Reporter;
use crate::{MismatchReason, SkippedNode, TransformOptions, transform};
use usefront_common::LineMap;
use usefront_parser::NodeIndex;
use usefront_parser::parser::NodeKind;

#[test]
fn parse_error_with_snippet() {
    let source = "const a = ;\n";
    let options = TransformOptions::default().with_file_name("App.js");
    let err = transform(source, &options).expect_err("should fail to parse");
    let parse_error = err.as_parse_error().expect("parse error");

    let rendered = Reporter::new(false).format_parse_error(parse_error, source);
    let mut lines = rendered.lines();
    assert_eq!(
        lines.next(),
        Some("App.js(1,11) - error TS1109: Expression expected.")
    );
    assert_eq!(lines.next(), Some("    1   const a = ;"));
    assert_eq!(lines.next(), Some("                  ~"));
}

#[test]
fn skipped_node_location() {
    let source = "let x;\nconst [x, y] = useState(1);";
    let line_map = LineMap::build(source);
    let skipped = SkippedNode {
        node: NodeIndex(0),
        kind: NodeKind::VariableDeclaration,
        pos: 13,
        reason: MismatchReason::SetterNameMismatch {
            expected: "setX".to_string(),
            found: "y".to_string(),
        },
    };
    assert_eq!(
        Reporter::new(false).format_skipped("App.js", source, &line_map, &skipped),
        "App.js(2,7) - skipped: setter 'y' does not follow the 'setX' naming"
    );
}

#[test]
fn summary_counts() {
    let reporter = Reporter::new(false);
    assert_eq!(
        reporter.format_summary(1, 2, 3, 0),
        "1 file: 2 declarations and 3 setter calls rewritten"
    );
    assert_eq!(
        reporter.format_summary(4, 0, 0, 2),
        "4 files: 0 declarations and 0 setter calls rewritten, 2 failed to parse"
    );
}
