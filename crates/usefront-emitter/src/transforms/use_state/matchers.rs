//! Shape matchers for the useState idiom.
//!
//! Matchers are pure functions over the arena. Each returns a
//! [`MatchOutcome`]: `NotApplicable` when the node is not an instance of the
//! idiom at all, `Malformed` when it looks like one but breaks a rule (the
//! node is then left alone and the reason reported), `Matched` otherwise.
//! Parentheses are looked through everywhere.

use super::symbols::{StateDeclarationInfo, StateKind, StateSymbolTable};
use std::fmt;
use usefront_parser::parser::node::{FunctionData, Node, NodeKind};
use usefront_parser::syntax::transform_utils::{identifier_text_through_parens, skip_parentheses};
use usefront_parser::{NodeArena, NodeIndex, NodeList};
use usefront_scanner::{OperatorPrecedence, SyntaxKind, binary_operator_precedence, token_to_text};

/// Callee name of the state declaration idiom.
pub const USE_STATE: &str = "useState";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome<T> {
    Matched(T),
    NotApplicable,
    Malformed(MismatchReason),
}

impl<T> MatchOutcome<T> {
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }
}

/// Why a node that looked like the idiom was left unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MismatchReason {
    PatternArity { found: usize },
    PatternElementNotIdentifier { position: usize },
    SetterNameMismatch { expected: String, found: String },
    ArgumentCount { found: usize },
    SpreadArgument,
    OptionalCall,
    UnsupportedArgument { kind: NodeKind },
    UnsupportedOperator { operator: SyntaxKind },
    UpdaterParameterCount { found: usize },
    UpdaterAsync,
    UpdaterBlockBody,
    UpdaterBodyNotBinary { kind: NodeKind },
    UpdaterLeftOperandNotIdentifier,
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchReason::PatternArity { found } => {
                write!(f, "expected a two-element array pattern, found {found} elements")
            }
            MismatchReason::PatternElementNotIdentifier { position } => write!(
                f,
                "pattern element {position} is not a plain identifier"
            ),
            MismatchReason::SetterNameMismatch { expected, found } => {
                write!(f, "setter '{found}' does not follow the '{expected}' naming")
            }
            MismatchReason::ArgumentCount { found } => {
                write!(f, "expected exactly one argument, found {found}")
            }
            MismatchReason::SpreadArgument => f.write_str("spread argument"),
            MismatchReason::OptionalCall => f.write_str("optional call of a setter"),
            MismatchReason::UnsupportedArgument { kind } => {
                write!(f, "unsupported setter argument ({kind:?})")
            }
            MismatchReason::UnsupportedOperator { operator } => write!(
                f,
                "operator '{}' is not a binary operator",
                token_to_text(*operator).unwrap_or("?")
            ),
            MismatchReason::UpdaterParameterCount { found } => {
                write!(f, "updater takes {found} parameters, expected one")
            }
            MismatchReason::UpdaterAsync => f.write_str("async updater function"),
            MismatchReason::UpdaterBlockBody => f.write_str("updater has a block body"),
            MismatchReason::UpdaterBodyNotBinary { kind } => {
                write!(f, "updater body is not a binary expression ({kind:?})")
            }
            MismatchReason::UpdaterLeftOperandNotIdentifier => {
                f.write_str("updater body's left operand is not an identifier")
            }
        }
    }
}

/// `const [value_name, setter_name] = useState(initializer)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateDeclarationMatch {
    pub value_name: String,
    pub setter_name: String,
    /// The single `useState` argument
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetterCallMatch {
    pub setter_name: String,
    pub info: StateDeclarationInfo,
    pub argument: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetterArgument {
    /// The argument is the new value as written.
    Direct(NodeIndex),
    /// `p => p <operator> right`
    Updater {
        parameter_name: Option<String>,
        operator: SyntaxKind,
        right: NodeIndex,
    },
}

/// `count` -> `setCount`.
pub fn setter_name_for(value_name: &str) -> String {
    let mut chars = value_name.chars();
    let mut name = String::with_capacity(value_name.len() + 3);
    name.push_str("set");
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
        name.push_str(chars.as_str());
    }
    name
}

pub fn match_state_declaration(
    arena: &NodeArena,
    declarator: NodeIndex,
) -> MatchOutcome<StateDeclarationMatch> {
    let Some(decl) = arena.get_variable_declaration(declarator) else {
        return MatchOutcome::NotApplicable;
    };
    let Some(Node::ArrayBindingPattern(pattern)) = arena.get(decl.name) else {
        return MatchOutcome::NotApplicable;
    };
    if decl.initializer.is_none() {
        return MatchOutcome::NotApplicable;
    }
    let Some(call) = arena.get_call_expr(skip_parentheses(arena, decl.initializer)) else {
        return MatchOutcome::NotApplicable;
    };
    if identifier_text_through_parens(arena, call.expression) != Some(USE_STATE) {
        return MatchOutcome::NotApplicable;
    }

    let &[value, setter] = pattern.elements.nodes.as_slice() else {
        return MatchOutcome::Malformed(MismatchReason::PatternArity {
            found: pattern.elements.len(),
        });
    };
    let Some(value_name) = binding_identifier(arena, value) else {
        return MatchOutcome::Malformed(MismatchReason::PatternElementNotIdentifier {
            position: 0,
        });
    };
    let Some(setter_name) = binding_identifier(arena, setter) else {
        return MatchOutcome::Malformed(MismatchReason::PatternElementNotIdentifier {
            position: 1,
        });
    };
    let initializer = match single_argument(arena, &call.arguments) {
        Ok(argument) => argument,
        Err(reason) => return MatchOutcome::Malformed(reason),
    };

    let expected = setter_name_for(value_name);
    if setter_name != expected {
        return MatchOutcome::Malformed(MismatchReason::SetterNameMismatch {
            expected,
            found: setter_name.to_string(),
        });
    }

    MatchOutcome::Matched(StateDeclarationMatch {
        value_name: value_name.to_string(),
        setter_name: setter_name.to_string(),
        initializer,
    })
}

pub fn match_setter_call(
    arena: &NodeArena,
    call_index: NodeIndex,
    symbols: &StateSymbolTable,
) -> MatchOutcome<SetterCallMatch> {
    let Some(call) = arena.get_call_expr(call_index) else {
        return MatchOutcome::NotApplicable;
    };
    let Some(callee) = identifier_text_through_parens(arena, call.expression) else {
        return MatchOutcome::NotApplicable;
    };
    let Some(info) = symbols.lookup(callee) else {
        return MatchOutcome::NotApplicable;
    };
    if call.question_dot {
        return MatchOutcome::Malformed(MismatchReason::OptionalCall);
    }
    match single_argument(arena, &call.arguments) {
        Ok(argument) => MatchOutcome::Matched(SetterCallMatch {
            setter_name: callee.to_string(),
            info: info.clone(),
            argument,
        }),
        Err(reason) => MatchOutcome::Malformed(reason),
    }
}

/// `Boxed` for numeric, string, boolean and null literals, `Proxied` for
/// everything else (including `-1`).
pub fn classify_initial_value(arena: &NodeArena, expr: NodeIndex) -> StateKind {
    let is_literal = arena
        .get(skip_parentheses(arena, expr))
        .is_some_and(Node::is_primitive_literal);
    if is_literal {
        StateKind::Boxed
    } else {
        StateKind::Proxied
    }
}

pub fn classify_setter_argument(
    arena: &NodeArena,
    argument: NodeIndex,
) -> MatchOutcome<SetterArgument> {
    let Some(node) = arena.get(skip_parentheses(arena, argument)) else {
        return MatchOutcome::NotApplicable;
    };
    match node {
        Node::Identifier(_)
        | Node::NumericLiteral(_)
        | Node::TrueKeyword
        | Node::FalseKeyword
        | Node::NullKeyword
        | Node::ArrayLiteralExpression(_)
        | Node::ObjectLiteralExpression(_) => {
            MatchOutcome::Matched(SetterArgument::Direct(argument))
        }
        Node::BinaryExpression(binary) => {
            if is_plain_binary_operator(binary.operator_token) {
                MatchOutcome::Matched(SetterArgument::Direct(argument))
            } else {
                MatchOutcome::Malformed(MismatchReason::UnsupportedOperator {
                    operator: binary.operator_token,
                })
            }
        }
        Node::ArrowFunction(func) => classify_updater(arena, func),
        other => {
            MatchOutcome::Malformed(MismatchReason::UnsupportedArgument { kind: other.kind() })
        }
    }
}

fn classify_updater(arena: &NodeArena, func: &FunctionData) -> MatchOutcome<SetterArgument> {
    if func.parameters.len() != 1 {
        return MatchOutcome::Malformed(MismatchReason::UpdaterParameterCount {
            found: func.parameters.len(),
        });
    }
    if func.is_async {
        return MatchOutcome::Malformed(MismatchReason::UpdaterAsync);
    }
    let Some(body) = arena.get(skip_parentheses(arena, func.body)) else {
        return MatchOutcome::NotApplicable;
    };
    let binary = match body {
        Node::Block(_) => return MatchOutcome::Malformed(MismatchReason::UpdaterBlockBody),
        Node::BinaryExpression(binary) if is_plain_binary_operator(binary.operator_token) => binary,
        other => {
            return MatchOutcome::Malformed(MismatchReason::UpdaterBodyNotBinary {
                kind: other.kind(),
            });
        }
    };
    if identifier_text_through_parens(arena, binary.left).is_none() {
        return MatchOutcome::Malformed(MismatchReason::UpdaterLeftOperandNotIdentifier);
    }

    let parameter_name = func.parameters.nodes.first().and_then(|&param| match arena.get(param) {
        Some(Node::Parameter(data)) => arena.identifier_text(data.name).map(str::to_string),
        _ => None,
    });
    MatchOutcome::Matched(SetterArgument::Updater {
        parameter_name,
        operator: binary.operator_token,
        right: binary.right,
    })
}

/// Arithmetic, bitwise, relational, equality, `in` and `instanceof`.
/// Logical operators, assignments and the comma operator are excluded.
pub fn is_plain_binary_operator(operator: SyntaxKind) -> bool {
    matches!(
        binary_operator_precedence(operator),
        Some(precedence) if !matches!(
            precedence,
            OperatorPrecedence::Coalesce
                | OperatorPrecedence::LogicalOr
                | OperatorPrecedence::LogicalAnd
        )
    )
}

/// Name of a plain identifier array-pattern element: no rest, default or
/// nested pattern.
fn binding_identifier(arena: &NodeArena, element: NodeIndex) -> Option<&str> {
    match arena.get(element)? {
        Node::BindingElement(data)
            if !data.dot_dot_dot && data.initializer.is_none() && data.property_name.is_none() =>
        {
            arena.identifier_text(data.name)
        }
        _ => None,
    }
}

fn single_argument(arena: &NodeArena, arguments: &NodeList) -> Result<NodeIndex, MismatchReason> {
    let &[argument] = arguments.nodes.as_slice() else {
        return Err(MismatchReason::ArgumentCount {
            found: arguments.len(),
        });
    };
    if matches!(arena.get(argument), Some(Node::SpreadElement(_))) {
        return Err(MismatchReason::SpreadArgument);
    }
    Ok(argument)
}

#[cfg(test)]
#[path = "tests/use_state_matchers.rs"]
mod tests;
