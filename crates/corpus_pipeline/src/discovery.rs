//! Corpus input discovery
//!
//! Resolves a `CorpusSource` into the fixed, ordered part list for a run.
//! Directory listings are sorted by file name so part indices are stable
//! across runs; explicit file lists keep caller order.

use std::path::{Path, PathBuf};

use contracts::{ContractError, CorpusSource};
use tracing::debug;

/// Resolve the corpus source into an ordered list of `.txt` documents
///
/// # Errors
/// Returns `ConfigValidation` when a directory source does not exist.
pub fn resolve_parts(source: &CorpusSource) -> Result<Vec<PathBuf>, ContractError> {
    match source {
        CorpusSource::Directory(dir) => list_directory(dir),
        CorpusSource::Files(paths) => Ok(filter_files(paths)),
    }
}

/// All immediate `.txt` children of `dir`, sorted by path
fn list_directory(dir: &Path) -> Result<Vec<PathBuf>, ContractError> {
    if !dir.is_dir() {
        return Err(ContractError::config_validation(
            "corpus.dir",
            format!("'{}' is not a directory", dir.display()),
        ));
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_txt_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    debug!(dir = %dir.display(), count = paths.len(), "resolved corpus directory");
    Ok(paths)
}

/// Existing `.txt` files from an explicit list, caller order preserved
fn filter_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|path| path.is_file() && has_txt_extension(path))
        .cloned()
        .collect()
}

fn has_txt_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}
