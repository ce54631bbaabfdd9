//! `usefront.json` loading and option resolution.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::args::{CliArgs, visitor_set};
use crate::{TransformOptions, VisitorSet};

pub const CONFIG_FILE_NAME: &str = "usefront.json";

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UsefrontConfig {
    #[serde(default)]
    pub retain_lines: Option<bool>,
    /// `"declarations"`, `"callSites"`
    #[serde(default)]
    pub visitors: Option<Vec<String>>,
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
}

/// Options after merging the config file with command line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub transform: TransformOptions,
    pub out_dir: Option<PathBuf>,
}

pub fn parse_config(text: &str) -> Result<UsefrontConfig> {
    serde_json::from_str(text).context("invalid usefront config")
}

pub fn load_config(path: &Path) -> Result<UsefrontConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("in {}", path.display()))
}

/// Explicit `--config` path, else `usefront.json` in `cwd` if it exists.
pub fn find_config(args: &CliArgs, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = &args.config {
        return Some(cwd.join(path));
    }
    let default = cwd.join(CONFIG_FILE_NAME);
    default.is_file().then_some(default)
}

/// Load the config (if any) and merge it with `args`.
pub fn resolve(args: &CliArgs, cwd: &Path) -> Result<ResolvedOptions> {
    let config = match find_config(args, cwd) {
        Some(path) => {
            debug!(config = %path.display(), "loading config");
            load_config(&path)?
        }
        None => UsefrontConfig::default(),
    };
    resolve_options(args, &config)
}

/// Command line values win over the config file.
pub fn resolve_options(args: &CliArgs, config: &UsefrontConfig) -> Result<ResolvedOptions> {
    let visitors = match (&args.visitors, &config.visitors) {
        (Some(selected), _) => visitor_set(selected),
        (None, Some(names)) => parse_visitor_names(names)?,
        (None, None) => VisitorSet::default(),
    };
    let retain_lines = args.retain_lines || config.retain_lines.unwrap_or(false);

    Ok(ResolvedOptions {
        transform: TransformOptions {
            visitors,
            retain_lines,
            ..TransformOptions::default()
        },
        out_dir: args.out_dir.clone().or_else(|| config.out_dir.clone()),
    })
}

fn parse_visitor_names(names: &[String]) -> Result<VisitorSet> {
    let mut set = VisitorSet::empty();
    for name in names {
        let Some(visitor) = VisitorSet::from_visitor_name(name) else {
            bail!("unknown visitor '{name}' (expected \"declarations\" or \"callSites\")");
        };
        set |= visitor;
    }
    Ok(set)
}
