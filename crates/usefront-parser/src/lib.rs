//! JavaScript parser and AST for the usefront rewriter.
//!
//! The parser produces a `NodeArena` of `Node`s addressed by `NodeIndex`.
//! Transforms mutate the arena in place through `NodeArena::replace` and the
//! `syntax::visitor` traversal; the emitter prints the arena back to text.

pub mod parser;
pub mod syntax;

pub use parser::{NodeArena, NodeIndex, NodeList, ParseError, ParserState, TextRange};
