//! DocumentReader trait - raw text acquisition abstraction

use std::path::Path;

use crate::ContractError;

/// Document reading collaborator
///
/// Failure (missing file, undecodable content) is recovered by the pipeline:
/// the part contributes zero size and no units, and a warning is emitted.
pub trait DocumentReader: Send + Sync {
    /// Read the full text content of `path`
    ///
    /// # Errors
    /// Returns `DocumentRead` with the offending path.
    fn read(&self, path: &Path) -> Result<String, ContractError>;
}
