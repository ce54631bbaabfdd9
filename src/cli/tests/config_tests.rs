use super::args::CliArgs;
use super::config::{
    CONFIG_FILE_NAME, UsefrontConfig, find_config, load_config, parse_config, resolve,
    resolve_options,
};
use crate::VisitorSet;
use clap::Parser;
use std::path::PathBuf;

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["usefront"];
    argv.extend_from_slice(extra);
    CliArgs::try_parse_from(argv).expect("arguments should parse")
}

#[test]
fn parses_camel_case_config() {
    let config = parse_config(
        r#"{"retainLines": true, "visitors": ["declarations", "callSites"], "outDir": "dist"}"#,
    )
    .expect("config should parse");
    assert_eq!(config.retain_lines, Some(true));
    assert_eq!(
        config.visitors,
        Some(vec!["declarations".to_string(), "callSites".to_string()])
    );
    assert_eq!(config.out_dir, Some(PathBuf::from("dist")));
}

#[test]
fn rejects_unknown_fields() {
    assert!(parse_config(r#"{"retain_lines": true}"#).is_err());
    assert!(parse_config("not json").is_err());
}

#[test]
fn empty_config_gives_defaults() {
    let resolved = resolve_options(&args(&[]), &UsefrontConfig::default()).expect("resolve");
    assert_eq!(resolved.transform.visitors, VisitorSet::all());
    assert!(!resolved.transform.retain_lines);
    assert!(resolved.out_dir.is_none());
}

#[test]
fn config_values_apply() {
    let config = UsefrontConfig {
        retain_lines: Some(true),
        visitors: Some(vec!["callSites".to_string()]),
        out_dir: Some(PathBuf::from("dist")),
    };
    let resolved = resolve_options(&args(&[]), &config).expect("resolve");
    assert_eq!(resolved.transform.visitors, VisitorSet::CALL_SITES);
    assert!(resolved.transform.retain_lines);
    assert_eq!(resolved.out_dir, Some(PathBuf::from("dist")));
}

#[test]
fn command_line_overrides_config() {
    let config = UsefrontConfig {
        retain_lines: Some(false),
        visitors: Some(vec!["callSites".to_string()]),
        out_dir: Some(PathBuf::from("dist")),
    };
    let resolved = resolve_options(
        &args(&["--visitors", "declarations", "--retain-lines", "--out-dir", "build"]),
        &config,
    )
    .expect("resolve");
    assert_eq!(resolved.transform.visitors, VisitorSet::DECLARATIONS);
    assert!(resolved.transform.retain_lines);
    assert_eq!(resolved.out_dir, Some(PathBuf::from("build")));
}

#[test]
fn unknown_visitor_name_in_config_is_an_error() {
    let config = UsefrontConfig {
        visitors: Some(vec!["effects".to_string()]),
        ..UsefrontConfig::default()
    };
    let err = resolve_options(&args(&[]), &config).expect_err("should fail");
    assert!(err.to_string().contains("unknown visitor 'effects'"));
}

#[test]
fn finds_and_loads_default_config_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    assert!(find_config(&args(&[]), dir.path()).is_none());

    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, r#"{"retainLines": true}"#).expect("write config");
    assert_eq!(find_config(&args(&[]), dir.path()), Some(path.clone()));
    assert_eq!(
        load_config(&path).expect("load").retain_lines,
        Some(true)
    );

    let resolved = resolve(&args(&[]), dir.path()).expect("resolve");
    assert!(resolved.transform.retain_lines);
}

#[test]
fn explicit_config_path_must_exist() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = resolve(&args(&["--config", "missing.json"]), dir.path()).expect_err("should fail");
    assert!(format!("{err:#}").contains("failed to read config"));
}
