//! Printing and transforms for the usefront rewriter.
//!
//! - `emitter::Printer` prints a `NodeArena` back to JavaScript.
//! - `transforms::use_state` rewrites `useState` declarations and setter
//!   calls into `ref`/`reactive` bindings and assignments.

pub mod emitter;
pub mod source_writer;
pub mod transforms;

pub use emitter::{Printer, PrinterOptions};
pub use source_writer::SourceWriter;
