//! Parser, AST nodes and node storage.

pub mod base;
pub mod node;
mod node_arena;
mod parse_error;
mod state;
mod state_expressions;
mod state_statements;

pub use base::{NodeIndex, NodeList, TextRange};
pub use node::{Node, NodeArena, NodeKind};
pub use parse_error::ParseError;
pub use state::ParserState;

/// Parse `source_text` into a fresh arena, returning the arena and the
/// source file node.
pub fn parse_source(
    file_name: impl Into<String>,
    source_text: impl Into<String>,
) -> Result<(NodeArena, NodeIndex), ParseError> {
    let mut parser = ParserState::new(file_name.into(), source_text.into());
    let root = parser.parse_source_file()?;
    Ok((parser.into_arena(), root))
}
