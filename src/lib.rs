//! Rewrites React `useState` state into Vue `ref`/`reactive` state.
//!
//! ```
//! use usefront::{TransformOptions, transform};
//!
//! let source = "const [count, setCount] = useState(0);\nsetCount(count + 1);";
//! let output = transform(source, &TransformOptions::default()).unwrap();
//! assert_eq!(output.code, "const count = ref(0);\ncount.value = count + 1;\n");
//! ```
//!
//! The pipeline is parse (`usefront-parser`), rewrite
//! (`usefront_emitter::transforms::use_state`) and print
//! (`usefront_emitter::Printer`). A parse error aborts before anything is
//! rewritten.

pub mod cli;
mod error;
mod options;
pub mod tracing_config;

pub use error::TransformError;
pub use options::{TransformOptions, TransformOutput};
pub use usefront_emitter::transforms::use_state::{
    MismatchReason, RewriteReport, SkippedNode, StateDeclarationInfo, StateKind,
    StateSymbolTable, VisitorSet,
};
pub use usefront_parser::ParseError;

use tracing::debug_span;
use usefront_emitter::transforms::use_state::run_use_state_transform;
use usefront_emitter::{Printer, PrinterOptions};
use usefront_parser::parser::parse_source;
use usefront_parser::{NodeArena, NodeIndex};

/// Parse `source`, rewrite its useState idioms and print the result.
pub fn transform(
    source: &str,
    options: &TransformOptions,
) -> Result<TransformOutput, TransformError> {
    let _span = debug_span!("transform", file = %options.file_name).entered();

    let (mut arena, root) = parse_source(options.file_name.as_str(), source)?;
    let ctx = run_use_state_transform(&mut arena, root, options.visitors);
    let printer_options = PrinterOptions {
        retain_lines: options.retain_lines,
    };
    let code = Printer::new(&arena, printer_options).print(root);

    Ok(TransformOutput {
        code,
        report: ctx.report,
        symbols: ctx.symbols,
    })
}

/// Parse without transforming, for inspecting the syntax tree.
pub fn parse(source: &str, file_name: &str) -> Result<(NodeArena, NodeIndex), TransformError> {
    Ok(parse_source(file_name, source)?)
}
