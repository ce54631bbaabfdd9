//! Tests for token classification helpers.

use usefront_scanner::*;

#[test]
fn test_token_is_keyword() {
    assert!(token_is_keyword(SyntaxKind::BreakKeyword));
    assert!(token_is_keyword(SyntaxKind::ConstKeyword));
    assert!(token_is_keyword(SyntaxKind::OfKeyword));
    assert!(!token_is_keyword(SyntaxKind::Identifier));
    assert!(!token_is_keyword(SyntaxKind::OpenBraceToken));
}

#[test]
fn test_token_is_contextual_keyword() {
    assert!(token_is_contextual_keyword(SyntaxKind::AsyncKeyword));
    assert!(token_is_contextual_keyword(SyntaxKind::LetKeyword));
    assert!(!token_is_contextual_keyword(SyntaxKind::ConstKeyword));
}

#[test]
fn test_token_is_assignment_operator() {
    assert!(token_is_assignment_operator(SyntaxKind::EqualsToken));
    assert!(token_is_assignment_operator(SyntaxKind::PlusEqualsToken));
    assert!(token_is_assignment_operator(
        SyntaxKind::QuestionQuestionEqualsToken
    ));
    assert!(!token_is_assignment_operator(SyntaxKind::PlusToken));
    assert!(!token_is_assignment_operator(SyntaxKind::EqualsEqualsToken));
}

#[test]
fn test_keyword_round_trip_text() {
    assert_eq!(text_to_keyword("const"), Some(SyntaxKind::ConstKeyword));
    assert_eq!(text_to_keyword("instanceof"), Some(SyntaxKind::InstanceOfKeyword));
    assert_eq!(text_to_keyword("CONST"), None);
    assert_eq!(keyword_to_text(SyntaxKind::TypeOfKeyword), Some("typeof"));
    assert_eq!(keyword_to_text(SyntaxKind::Identifier), None);
    assert_eq!(string_to_token("useState"), SyntaxKind::Identifier);
}

#[test]
fn test_punctuation_to_text() {
    assert_eq!(punctuation_to_text(SyntaxKind::EqualsGreaterThanToken), Some("=>"));
    assert_eq!(
        punctuation_to_text(SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken),
        Some(">>>=")
    );
    assert_eq!(punctuation_to_text(SyntaxKind::Identifier), None);
    assert_eq!(token_to_text(SyntaxKind::InKeyword), Some("in"));
}

#[test]
fn test_binary_operator_precedence_ordering() {
    let prec = |kind| binary_operator_precedence(kind).expect("binary operator");
    assert!(prec(SyntaxKind::AsteriskToken) > prec(SyntaxKind::PlusToken));
    assert!(prec(SyntaxKind::PlusToken) > prec(SyntaxKind::LessThanToken));
    assert!(prec(SyntaxKind::EqualsEqualsEqualsToken) > prec(SyntaxKind::AmpersandAmpersandToken));
    assert!(prec(SyntaxKind::AmpersandAmpersandToken) > prec(SyntaxKind::BarBarToken));
    assert_eq!(binary_operator_precedence(SyntaxKind::EqualsToken), None);
    assert_eq!(
        operator_token_precedence(SyntaxKind::EqualsToken),
        OperatorPrecedence::Assignment
    );
    assert_eq!(
        operator_token_precedence(SyntaxKind::CommaToken),
        OperatorPrecedence::Comma
    );
}

#[test]
fn test_logical_operators() {
    assert!(token_is_logical_operator(SyntaxKind::BarBarToken));
    assert!(token_is_logical_operator(SyntaxKind::QuestionQuestionToken));
    assert!(!token_is_logical_operator(SyntaxKind::BarToken));
}
