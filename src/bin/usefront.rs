#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;

use usefront::cli::args::CliArgs;
use usefront::cli::driver::{self, FileOutcome, STDIN_FILE_NAME};
use usefront::cli::reporter::Reporter;
use usefront::cli::config;
use usefront_common::LineMap;

const EXIT_SUCCESS: i32 = 0;
/// At least one input could not be read or parsed
const EXIT_PARSE_ERRORS: i32 = 1;
/// Bad arguments, config or inputs
const EXIT_USAGE: i32 = 2;

fn main() -> Result<()> {
    // Only active when USEFRONT_LOG or RUST_LOG is set.
    usefront::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let color = !args.no_color && std::io::stderr().is_terminal();
    colored::control::set_override(color);
    let reporter = Reporter::new(color);

    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let resolved = match config::resolve(&args, &cwd) {
        Ok(resolved) => resolved,
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(EXIT_USAGE);
        }
    };

    if args.print_ast {
        let code = print_ast(&args, &cwd, &reporter)?;
        std::process::exit(code);
    }

    let outcomes = if args.inputs.is_empty() {
        vec![driver::run_stdin(&resolved.transform)?]
    } else {
        match driver::run(
            &args.inputs,
            &resolved.transform,
            resolved.out_dir.as_deref(),
            &cwd,
        ) {
            Ok(run) => run.outcomes,
            Err(err) => {
                eprintln!("error: {err:#}");
                std::process::exit(EXIT_USAGE);
            }
        }
    };

    let print_to_stdout = resolved.out_dir.is_none() || args.inputs.is_empty();
    let mut failures = 0;
    let (mut declarations, mut calls) = (0, 0);
    for outcome in &outcomes {
        match &outcome.result {
            Ok(output) => {
                if print_to_stdout {
                    if outcomes.len() > 1 {
                        println!("// {}", outcome.display_name());
                    }
                    print!("{}", output.code);
                }
                declarations += output.report.declarations_rewritten;
                calls += output.report.calls_rewritten;
                if args.explain {
                    explain(outcome, &reporter);
                }
            }
            Err(err) => {
                failures += 1;
                let message = match err.as_parse_error() {
                    Some(parse_error) => reporter.format_parse_error(parse_error, &outcome.source),
                    None => err.to_string(),
                };
                eprintln!("{message}");
            }
        }
    }

    if args.explain || !print_to_stdout {
        eprintln!(
            "{}",
            reporter.format_summary(outcomes.len(), declarations, calls, failures)
        );
    }

    std::process::exit(if failures > 0 {
        EXIT_PARSE_ERRORS
    } else {
        EXIT_SUCCESS
    });
}

fn explain(outcome: &FileOutcome, reporter: &Reporter) {
    let Ok(output) = &outcome.result else {
        return;
    };
    if output.report.skipped.is_empty() {
        return;
    }
    let line_map = LineMap::build(&outcome.source);
    let file = outcome.display_name();
    for skipped in &output.report.skipped {
        eprintln!(
            "{}",
            reporter.format_skipped(&file, &outcome.source, &line_map, skipped)
        );
    }
}

/// Print the syntax tree of every input as JSON. Returns the exit code.
fn print_ast(args: &CliArgs, cwd: &Path, reporter: &Reporter) -> Result<i32> {
    let mut exit_code = EXIT_SUCCESS;
    let sources: Vec<(String, String)> = if args.inputs.is_empty() {
        let mut source = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut source)
            .context("failed to read stdin")?;
        vec![(STDIN_FILE_NAME.to_string(), source)]
    } else {
        let inputs: Vec<_> = args.inputs.iter().map(|input| cwd.join(input)).collect();
        let files = match driver::collect_inputs(&inputs, cwd) {
            Ok(files) => files,
            Err(err) => {
                eprintln!("error: {err:#}");
                return Ok(EXIT_USAGE);
            }
        };
        let mut sources = Vec::with_capacity(files.len());
        for file in files {
            match std::fs::read_to_string(&file.path) {
                Ok(source) => sources.push((file.path.display().to_string(), source)),
                Err(err) => {
                    exit_code = EXIT_PARSE_ERRORS;
                    eprintln!("{}: failed to read: {err}", file.path.display());
                }
            }
        }
        sources
    };

    for (file_name, source) in &sources {
        match usefront::parse(source, file_name) {
            Ok((arena, root)) => {
                let json = serde_json::json!({
                    "file": file_name,
                    "root": root,
                    "arena": arena,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            Err(err) => {
                exit_code = EXIT_PARSE_ERRORS;
                let message = match err.as_parse_error() {
                    Some(parse_error) => reporter.format_parse_error(parse_error, source),
                    None => err.to_string(),
                };
                eprintln!("{message}");
            }
        }
    }
    Ok(exit_code)
}
