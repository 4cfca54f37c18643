//! ResultSink trait - export output interface
//!
//! Defines the abstract interface for result sinks.

use crate::{ContractError, UnitResult};

/// Result output trait
///
/// All sink implementations must implement this trait.
#[trait_variant::make(ResultSink: Send)]
pub trait LocalResultSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Write one unit result row
    ///
    /// # Errors
    /// Returns write error (should include context)
    async fn write(&mut self, row: &UnitResult) -> Result<(), ContractError>;

    /// Flush buffer (if any)
    async fn flush(&mut self) -> Result<(), ContractError>;

    /// Close sink
    async fn close(&mut self) -> Result<(), ContractError>;
}
