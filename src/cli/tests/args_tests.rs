use super::args::{CliArgs, VisitorArg, visitor_set};
use crate::VisitorSet;
use clap::Parser;
use std::path::PathBuf;

fn parse(args: &[&str]) -> CliArgs {
    let mut argv = vec!["usefront"];
    argv.extend_from_slice(args);
    CliArgs::try_parse_from(argv).expect("arguments should parse")
}

#[test]
fn defaults() {
    let args = parse(&[]);
    assert!(args.inputs.is_empty());
    assert!(args.out_dir.is_none());
    assert!(!args.retain_lines);
    assert!(args.visitors.is_none());
    assert!(!args.explain);
    assert!(!args.print_ast);
}

#[test]
fn inputs_and_flags() {
    let args = parse(&["src", "App.jsx", "--out-dir", "dist", "--retain-lines", "--explain"]);
    assert_eq!(args.inputs, vec![PathBuf::from("src"), PathBuf::from("App.jsx")]);
    assert_eq!(args.out_dir, Some(PathBuf::from("dist")));
    assert!(args.retain_lines);
    assert!(args.explain);
}

#[test]
fn camel_case_aliases() {
    let args = parse(&["--outDir", "out", "--retainLines"]);
    assert_eq!(args.out_dir, Some(PathBuf::from("out")));
    assert!(args.retain_lines);
}

#[test]
fn visitors_are_comma_separated() {
    let args = parse(&["--visitors", "declarations,call-sites"]);
    assert_eq!(
        args.visitors,
        Some(vec![VisitorArg::Declarations, VisitorArg::CallSites])
    );
    assert_eq!(visitor_set(&[VisitorArg::CallSites]), VisitorSet::CALL_SITES);
    assert_eq!(
        visitor_set(&[VisitorArg::Declarations, VisitorArg::CallSites]),
        VisitorSet::all()
    );
}

#[test]
fn unknown_visitor_is_rejected() {
    assert!(CliArgs::try_parse_from(["usefront", "--visitors", "effects"]).is_err());
}
