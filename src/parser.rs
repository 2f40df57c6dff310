//! Parsing of controller sources into syntax trees.
//!
//! Annotated controller files are ordinary Rust source text; they are parsed
//! with `syn` and never compiled. Batch parsing is lenient: a file that fails
//! to parse is logged as a warning and skipped, so partial documentation can
//! still be generated for the rest of the project.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// A successfully parsed source file.
#[derive(Debug)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub syntax_tree: syn::File,
}

/// Parses a single source file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid Rust syntax.
pub fn parse_file(path: &Path) -> Result<ParsedFile> {
    debug!("Parsing file: {}", path.display());

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let syntax_tree = syn::parse_file(&content)
        .with_context(|| format!("Failed to parse Rust syntax in file: {}", path.display()))?;

    Ok(ParsedFile {
        path: path.to_path_buf(),
        syntax_tree,
    })
}

/// Parses a batch of source files, skipping the ones that fail.
pub fn parse_files(paths: &[PathBuf]) -> Vec<ParsedFile> {
    let parsed: Vec<ParsedFile> = paths
        .iter()
        .filter_map(|path| match parse_file(path) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                None
            }
        })
        .collect();

    debug!(
        "Parsing complete: {} of {} files succeeded",
        parsed.len(),
        paths.len()
    );
    parsed
}
