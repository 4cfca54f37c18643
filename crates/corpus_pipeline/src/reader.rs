//! Filesystem document reader

use std::path::Path;

use contracts::{ContractError, DocumentReader};

/// Reads documents as UTF-8 text from the local filesystem
///
/// Any read failure (missing file, permissions, undecodable bytes) is
/// reported as `DocumentRead`; the pipeline recovers by treating the part
/// as empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDocumentReader;

impl DocumentReader for FsDocumentReader {
    fn read(&self, path: &Path) -> Result<String, ContractError> {
        std::fs::read_to_string(path)
            .map_err(|e| ContractError::document_read(path.display().to_string(), e.to_string()))
    }
}
