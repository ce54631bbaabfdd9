//! JavaScript printer.
//!
//! `Printer` walks a `NodeArena` from the source file node and writes
//! JavaScript with deterministic formatting: two-space indentation, one
//! statement per line, `;` after every statement that takes one and compact
//! object literals (`{a: 1}`). Parentheses are inserted wherever operator
//! precedence requires them, so transforms can build trees without
//! `ParenthesizedExpression` wrappers.
//!
//! With `PrinterOptions::retain_lines` every statement is placed on the
//! line it started on in the input: earlier lines are padded with blank
//! lines and statements that shared a line stay on one line.
//!
//! Comments are not preserved.

mod expressions;
mod helpers;
mod literals;
mod statements;

use crate::source_writer::SourceWriter;
use tracing::trace;
use usefront_common::LineMap;
use usefront_parser::parser::node::Node;
use usefront_parser::{NodeArena, NodeIndex};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrinterOptions {
    /// Keep statements on their original source lines.
    pub retain_lines: bool,
}

pub struct Printer<'a> {
    pub(super) arena: &'a NodeArena,
    pub(super) writer: SourceWriter,
    pub(super) options: PrinterOptions,
    /// Line map of the printed source file, for `retain_lines`
    pub(super) line_map: Option<LineMap>,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a NodeArena, options: PrinterOptions) -> Self {
        Printer {
            arena,
            writer: SourceWriter::new(),
            options,
            line_map: None,
        }
    }

    /// Print the tree rooted at `root` (normally the `SourceFile` node).
    pub fn print(mut self, root: NodeIndex) -> String {
        let arena = self.arena;
        if let Some(Node::SourceFile(file)) = arena.get(root) {
            trace!(file = %file.file_name, retain_lines = self.options.retain_lines, "printing");
            if self.options.retain_lines {
                self.line_map = Some(LineMap::build(&file.text));
            }
            self.writer = SourceWriter::with_capacity(file.text.len());
            self.emit_source_file(&file.statements);
        } else {
            self.emit_node(root);
        }
        self.writer.into_output()
    }

    /// Print any node; statements and expressions are both accepted.
    pub fn print_node(arena: &'a NodeArena, index: NodeIndex) -> String {
        let mut printer = Printer::new(arena, PrinterOptions::default());
        printer.emit_node(index);
        printer.writer.into_output()
    }

    pub(super) fn emit_node(&mut self, index: NodeIndex) {
        let Some(node) = self.arena.get(index) else {
            return;
        };
        if is_statement(node) {
            self.emit_statement(index);
        } else {
            self.emit_expression(index);
        }
    }
}

fn is_statement(node: &Node) -> bool {
    matches!(
        node,
        Node::SourceFile(_)
            | Node::VariableStatement(_)
            | Node::FunctionDeclaration(_)
            | Node::Block(_)
            | Node::ExpressionStatement(_)
            | Node::ReturnStatement(_)
            | Node::IfStatement(_)
            | Node::WhileStatement(_)
            | Node::DoStatement(_)
            | Node::ForStatement(_)
            | Node::ForInStatement(_)
            | Node::ForOfStatement(_)
            | Node::BreakStatement(_)
            | Node::ContinueStatement(_)
            | Node::ThrowStatement(_)
            | Node::EmptyStatement
            | Node::ImportDeclaration(_)
            | Node::ExportDeclaration(_)
            | Node::ExportAssignment(_)
    )
}
