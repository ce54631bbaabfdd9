//! Input discovery, parallel transformation and output writing.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{ParseError, TransformError, TransformOptions, TransformOutput, transform};

/// Extensions picked up when walking a directory.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx"];

/// File name used for stdin input in diagnostics.
pub const STDIN_FILE_NAME: &str = "<stdin>";

/// A file to transform and where its output goes relative to `--out-dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    pub relative: PathBuf,
}

/// Why a single input produced no output.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("{path}: failed to read: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl FileError {
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            FileError::Read { .. } => None,
            FileError::Transform(error) => error.as_parse_error(),
        }
    }
}

#[derive(Debug)]
pub struct FileOutcome {
    pub input: InputFile,
    /// Empty when the file could not be read
    pub source: String,
    pub result: Result<TransformOutput, FileError>,
}

impl FileOutcome {
    pub fn display_name(&self) -> String {
        self.input.path.display().to_string()
    }
}

#[derive(Debug, Default)]
pub struct RunResult {
    pub outcomes: Vec<FileOutcome>,
    pub written: Vec<PathBuf>,
}

impl RunResult {
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    pub fn has_errors(&self) -> bool {
        self.failures() > 0
    }
}

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Expand files and directories into the list of files to transform.
///
/// Files named explicitly are taken whatever their extension and keep their
/// path relative to `base` (just the file name when outside it); directories
/// contribute their source files, sorted by path, relative to the directory.
pub fn collect_inputs(inputs: &[PathBuf], base: &Path) -> Result<Vec<InputFile>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found = Vec::new();
            for entry in WalkDir::new(input).follow_links(true) {
                let entry =
                    entry.with_context(|| format!("failed to walk {}", input.display()))?;
                let path = entry.path();
                if entry.file_type().is_file() && is_source_file(path) {
                    let relative = path.strip_prefix(input).unwrap_or(path).to_path_buf();
                    found.push(InputFile {
                        path: path.to_path_buf(),
                        relative,
                    });
                }
            }
            found.sort_by(|a, b| a.path.cmp(&b.path));
            files.extend(found);
        } else if input.is_file() {
            let relative = match input.strip_prefix(base) {
                Ok(relative) => relative.to_path_buf(),
                Err(_) => input.file_name().map_or_else(|| input.clone(), PathBuf::from),
            };
            files.push(InputFile {
                path: input.clone(),
                relative,
            });
        } else {
            bail!("input not found: {}", input.display());
        }
    }
    Ok(files)
}

/// Fail when two inputs would be written to the same place under `--out-dir`.
pub fn check_output_collisions(files: &[InputFile]) -> Result<()> {
    let mut targets: FxHashMap<&Path, &Path> = FxHashMap::default();
    for file in files {
        if let Some(first) = targets.insert(&file.relative, &file.path) {
            bail!(
                "{} and {} would both be written to {}",
                first.display(),
                file.path.display(),
                file.relative.display()
            );
        }
    }
    Ok(())
}

/// Transform every file in parallel. Read and parse errors are per-file
/// outcomes.
pub fn transform_files(files: &[InputFile], options: &TransformOptions) -> Vec<FileOutcome> {
    info!(files = files.len(), "transforming");
    files
        .par_iter()
        .map(|input| {
            let display_path = input.path.display().to_string();
            let (source, result) = match std::fs::read_to_string(&input.path) {
                Ok(source) => {
                    let file_options = options.clone().with_file_name(display_path.clone());
                    let result = transform(&source, &file_options).map_err(FileError::from);
                    (source, result)
                }
                Err(source) => {
                    warn!(file = %display_path, error = %source, "read failed");
                    (String::new(), Err(FileError::Read { path: display_path.clone(), source }))
                }
            };
            debug!(file = %display_path, ok = result.is_ok(), "file done");
            FileOutcome {
                input: input.clone(),
                source,
                result,
            }
        })
        .collect()
}

/// Write successful outputs under `out_dir`, mirroring `InputFile::relative`.
pub fn write_outputs(outcomes: &[FileOutcome], out_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for outcome in outcomes {
        let Ok(output) = &outcome.result else {
            continue;
        };
        let target = out_dir.join(&outcome.input.relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&target, &output.code)
            .with_context(|| format!("failed to write {}", target.display()))?;
        debug!(output = %target.display(), "written");
        written.push(target);
    }
    info!(count = written.len(), out_dir = %out_dir.display(), "wrote outputs");
    Ok(written)
}

/// Transform `inputs` (resolved against `cwd`) and write them to `out_dir`
/// when one is given.
pub fn run(
    inputs: &[PathBuf],
    options: &TransformOptions,
    out_dir: Option<&Path>,
    cwd: &Path,
) -> Result<RunResult> {
    let inputs: Vec<PathBuf> = inputs.iter().map(|input| cwd.join(input)).collect();
    let files = collect_inputs(&inputs, cwd)?;
    if out_dir.is_some() {
        check_output_collisions(&files)?;
    }
    let outcomes = transform_files(&files, options);
    let written = match out_dir {
        Some(dir) => write_outputs(&outcomes, &cwd.join(dir))?,
        None => Vec::new(),
    };
    Ok(RunResult { outcomes, written })
}

/// Transform source read from stdin.
pub fn run_stdin(options: &TransformOptions) -> Result<FileOutcome> {
    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .context("failed to read stdin")?;
    Ok(transform_source(source, STDIN_FILE_NAME, options))
}

pub fn transform_source(
    source: String,
    file_name: &str,
    options: &TransformOptions,
) -> FileOutcome {
    let result =
        transform(&source, &options.clone().with_file_name(file_name)).map_err(FileError::from);
    FileOutcome {
        input: InputFile {
            path: PathBuf::from(file_name),
            relative: PathBuf::from(file_name),
        },
        source,
        result,
    }
}
