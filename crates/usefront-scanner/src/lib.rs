//! JavaScript scanner for the usefront rewriter.
//!
//! Token kinds reuse TypeScript's `SyntaxKind` naming; only the subset of
//! JavaScript the parser understands is tokenized precisely, everything
//! else surfaces as a dedicated token the parser rejects.

pub mod scanner_impl;
pub mod syntax_kind;

pub use scanner_impl::{ScannerSnapshot, ScannerState};
pub use syntax_kind::*;
