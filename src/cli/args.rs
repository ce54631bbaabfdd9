use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::VisitorSet;

/// CLI arguments for the usefront binary.
#[derive(Parser, Debug)]
#[command(
    name = "usefront",
    version,
    about = "Rewrite React useState hooks into Vue ref/reactive state"
)]
pub struct CliArgs {
    /// Files or directories to transform. Reads stdin when none are given.
    pub inputs: Vec<PathBuf>,

    /// Write transformed files under this directory, mirroring the input
    /// layout, instead of printing them.
    #[arg(short = 'o', long = "out-dir", alias = "outDir")]
    pub out_dir: Option<PathBuf>,

    /// Keep every statement on the line it started on.
    #[arg(long = "retain-lines", alias = "retainLines")]
    pub retain_lines: bool,

    /// Rewriters to run.
    #[arg(long, value_enum, value_delimiter = ',')]
    pub visitors: Option<Vec<VisitorArg>>,

    /// Path to a usefront.json file. Defaults to ./usefront.json when present.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Report declarations and setter calls that were left unchanged.
    #[arg(long)]
    pub explain: bool,

    /// Print the parsed syntax tree as JSON instead of transforming.
    #[arg(long = "print-ast", alias = "printAst")]
    pub print_ast: bool,

    /// Disable colored diagnostics.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum VisitorArg {
    Declarations,
    CallSites,
}

impl VisitorArg {
    pub fn to_visitor_set(self) -> VisitorSet {
        match self {
            VisitorArg::Declarations => VisitorSet::DECLARATIONS,
            VisitorArg::CallSites => VisitorSet::CALL_SITES,
        }
    }
}

/// Union of the selected visitors.
pub fn visitor_set(visitors: &[VisitorArg]) -> VisitorSet {
    visitors
        .iter()
        .fold(VisitorSet::empty(), |set, visitor| set | visitor.to_visitor_set())
}
