//! Token kinds and token classification helpers.

use serde::Serialize;

/// Token kinds produced by the scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,
    SingleLineCommentTrivia,
    MultiLineCommentTrivia,
    NewLineTrivia,
    WhitespaceTrivia,
    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    NoSubstitutionTemplateLiteral,
    // Template pieces: `` `head${ ``, `` }middle${ ``, `` }tail` ``
    TemplateHead,
    TemplateMiddle,
    TemplateTail,
    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    AtToken,
    QuestionQuestionToken,
    HashToken,
    // Assignments
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    AsteriskAsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    AmpersandAmpersandEqualsToken,
    BarBarEqualsToken,
    QuestionQuestionEqualsToken,
    // Identifiers
    Identifier,
    // Reserved words
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,
    // Strict mode reserved words
    LetKeyword,
    YieldKeyword,
    // Contextual keywords
    AsKeyword,
    AsyncKeyword,
    AwaitKeyword,
    FromKeyword,
    OfKeyword,
}

const KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("break", SyntaxKind::BreakKeyword),
    ("case", SyntaxKind::CaseKeyword),
    ("catch", SyntaxKind::CatchKeyword),
    ("class", SyntaxKind::ClassKeyword),
    ("const", SyntaxKind::ConstKeyword),
    ("continue", SyntaxKind::ContinueKeyword),
    ("debugger", SyntaxKind::DebuggerKeyword),
    ("default", SyntaxKind::DefaultKeyword),
    ("delete", SyntaxKind::DeleteKeyword),
    ("do", SyntaxKind::DoKeyword),
    ("else", SyntaxKind::ElseKeyword),
    ("enum", SyntaxKind::EnumKeyword),
    ("export", SyntaxKind::ExportKeyword),
    ("extends", SyntaxKind::ExtendsKeyword),
    ("false", SyntaxKind::FalseKeyword),
    ("finally", SyntaxKind::FinallyKeyword),
    ("for", SyntaxKind::ForKeyword),
    ("function", SyntaxKind::FunctionKeyword),
    ("if", SyntaxKind::IfKeyword),
    ("import", SyntaxKind::ImportKeyword),
    ("in", SyntaxKind::InKeyword),
    ("instanceof", SyntaxKind::InstanceOfKeyword),
    ("new", SyntaxKind::NewKeyword),
    ("null", SyntaxKind::NullKeyword),
    ("return", SyntaxKind::ReturnKeyword),
    ("super", SyntaxKind::SuperKeyword),
    ("switch", SyntaxKind::SwitchKeyword),
    ("this", SyntaxKind::ThisKeyword),
    ("throw", SyntaxKind::ThrowKeyword),
    ("true", SyntaxKind::TrueKeyword),
    ("try", SyntaxKind::TryKeyword),
    ("typeof", SyntaxKind::TypeOfKeyword),
    ("var", SyntaxKind::VarKeyword),
    ("void", SyntaxKind::VoidKeyword),
    ("while", SyntaxKind::WhileKeyword),
    ("with", SyntaxKind::WithKeyword),
    ("let", SyntaxKind::LetKeyword),
    ("yield", SyntaxKind::YieldKeyword),
    ("as", SyntaxKind::AsKeyword),
    ("async", SyntaxKind::AsyncKeyword),
    ("await", SyntaxKind::AwaitKeyword),
    ("from", SyntaxKind::FromKeyword),
    ("of", SyntaxKind::OfKeyword),
];

/// Keyword kind for `text`, if `text` is a (possibly contextual) keyword.
pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    KEYWORDS
        .iter()
        .find(|(keyword, _)| *keyword == text)
        .map(|&(_, kind)| kind)
}

/// Token kind for an identifier-like word.
pub fn string_to_token(text: &str) -> SyntaxKind {
    text_to_keyword(text).unwrap_or(SyntaxKind::Identifier)
}

pub fn keyword_to_text(kind: SyntaxKind) -> Option<&'static str> {
    KEYWORDS
        .iter()
        .find(|&&(_, keyword)| keyword == kind)
        .map(|&(text, _)| text)
}

pub fn punctuation_to_text(kind: SyntaxKind) -> Option<&'static str> {
    use SyntaxKind::*;
    let text = match kind {
        OpenBraceToken => "{",
        CloseBraceToken => "}",
        OpenParenToken => "(",
        CloseParenToken => ")",
        OpenBracketToken => "[",
        CloseBracketToken => "]",
        DotToken => ".",
        DotDotDotToken => "...",
        SemicolonToken => ";",
        CommaToken => ",",
        QuestionDotToken => "?.",
        LessThanToken => "<",
        GreaterThanToken => ">",
        LessThanEqualsToken => "<=",
        GreaterThanEqualsToken => ">=",
        EqualsEqualsToken => "==",
        ExclamationEqualsToken => "!=",
        EqualsEqualsEqualsToken => "===",
        ExclamationEqualsEqualsToken => "!==",
        EqualsGreaterThanToken => "=>",
        PlusToken => "+",
        MinusToken => "-",
        AsteriskToken => "*",
        AsteriskAsteriskToken => "**",
        SlashToken => "/",
        PercentToken => "%",
        PlusPlusToken => "++",
        MinusMinusToken => "--",
        LessThanLessThanToken => "<<",
        GreaterThanGreaterThanToken => ">>",
        GreaterThanGreaterThanGreaterThanToken => ">>>",
        AmpersandToken => "&",
        BarToken => "|",
        CaretToken => "^",
        ExclamationToken => "!",
        TildeToken => "~",
        AmpersandAmpersandToken => "&&",
        BarBarToken => "||",
        QuestionToken => "?",
        ColonToken => ":",
        AtToken => "@",
        QuestionQuestionToken => "??",
        HashToken => "#",
        EqualsToken => "=",
        PlusEqualsToken => "+=",
        MinusEqualsToken => "-=",
        AsteriskEqualsToken => "*=",
        AsteriskAsteriskEqualsToken => "**=",
        SlashEqualsToken => "/=",
        PercentEqualsToken => "%=",
        LessThanLessThanEqualsToken => "<<=",
        GreaterThanGreaterThanEqualsToken => ">>=",
        GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
        AmpersandEqualsToken => "&=",
        BarEqualsToken => "|=",
        CaretEqualsToken => "^=",
        AmpersandAmpersandEqualsToken => "&&=",
        BarBarEqualsToken => "||=",
        QuestionQuestionEqualsToken => "??=",
        _ => return None,
    };
    Some(text)
}

/// Source text of a fixed-text token (punctuation or keyword).
pub fn token_to_text(kind: SyntaxKind) -> Option<&'static str> {
    punctuation_to_text(kind).or_else(|| keyword_to_text(kind))
}

pub fn token_is_keyword(kind: SyntaxKind) -> bool {
    (kind as u16) >= (SyntaxKind::BreakKeyword as u16)
        && (kind as u16) <= (SyntaxKind::OfKeyword as u16)
}

/// Keywords that are only reserved in particular positions and otherwise
/// behave like identifiers (`let`, `async`, `of`, ...).
pub fn token_is_contextual_keyword(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::LetKeyword
            | SyntaxKind::YieldKeyword
            | SyntaxKind::AsKeyword
            | SyntaxKind::AsyncKeyword
            | SyntaxKind::AwaitKeyword
            | SyntaxKind::FromKeyword
            | SyntaxKind::OfKeyword
    )
}

pub fn token_is_identifier_or_keyword(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Identifier || token_is_keyword(kind)
}

pub fn token_is_punctuation(kind: SyntaxKind) -> bool {
    (kind as u16) >= (SyntaxKind::OpenBraceToken as u16)
        && (kind as u16) <= (SyntaxKind::QuestionQuestionEqualsToken as u16)
}

pub fn token_is_assignment_operator(kind: SyntaxKind) -> bool {
    (kind as u16) >= (SyntaxKind::EqualsToken as u16)
        && (kind as u16) <= (SyntaxKind::QuestionQuestionEqualsToken as u16)
}

pub fn token_is_logical_operator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::AmpersandAmpersandToken
            | SyntaxKind::BarBarToken
            | SyntaxKind::QuestionQuestionToken
    )
}

/// Binding power of binary operators, higher binds tighter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Comma,
    Assignment,
    Conditional,
    Coalesce,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Exponentiation,
    Unary,
    Update,
    LeftHandSide,
    Member,
    Primary,
    Invalid,
}

/// Precedence of `kind` used as a binary operator, `None` if it isn't one.
///
/// `in` is included; the parser suppresses it in `for (... in ...)` heads.
pub fn binary_operator_precedence(kind: SyntaxKind) -> Option<OperatorPrecedence> {
    use SyntaxKind::*;
    let precedence = match kind {
        QuestionQuestionToken => OperatorPrecedence::Coalesce,
        BarBarToken => OperatorPrecedence::LogicalOr,
        AmpersandAmpersandToken => OperatorPrecedence::LogicalAnd,
        BarToken => OperatorPrecedence::BitwiseOr,
        CaretToken => OperatorPrecedence::BitwiseXor,
        AmpersandToken => OperatorPrecedence::BitwiseAnd,
        EqualsEqualsToken
        | ExclamationEqualsToken
        | EqualsEqualsEqualsToken
        | ExclamationEqualsEqualsToken => OperatorPrecedence::Equality,
        LessThanToken
        | GreaterThanToken
        | LessThanEqualsToken
        | GreaterThanEqualsToken
        | InstanceOfKeyword
        | InKeyword => OperatorPrecedence::Relational,
        LessThanLessThanToken
        | GreaterThanGreaterThanToken
        | GreaterThanGreaterThanGreaterThanToken => OperatorPrecedence::Shift,
        PlusToken | MinusToken => OperatorPrecedence::Additive,
        AsteriskToken | SlashToken | PercentToken => OperatorPrecedence::Multiplicative,
        AsteriskAsteriskToken => OperatorPrecedence::Exponentiation,
        _ => return None,
    };
    Some(precedence)
}

/// Precedence of the expression formed by a binary-shaped operator token,
/// including assignment and comma.
pub fn operator_token_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    if kind == SyntaxKind::CommaToken {
        OperatorPrecedence::Comma
    } else if token_is_assignment_operator(kind) {
        OperatorPrecedence::Assignment
    } else {
        binary_operator_precedence(kind).unwrap_or(OperatorPrecedence::Invalid)
    }
}
