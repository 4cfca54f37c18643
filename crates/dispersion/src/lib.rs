//! # Dispersion
//!
//! Lexical dispersion metric engine.
//!
//! Responsibilities:
//! - Validate per-unit frequency/size vectors
//! - Derive expected mass shares and local densities
//! - Compute the 16 dispersion metrics as one immutable record
//!
//! ## Usage Example
//!
//! ```ignore
//! use dispersion::DispersionAnalyzer;
//!
//! let analyzer = DispersionAnalyzer::new(
//!     vec![5.0, 0.0, 5.0],   // per-part frequencies
//!     vec![10.0, 10.0, 10.0], // per-part sizes (tokens)
//!     30.0,                   // total corpus size
//! )?;
//!
//! let metrics = analyzer.calculate_all_metrics();
//! assert_eq!(metrics.range, 2);
//! ```

mod analyzer;
pub mod evenness;

pub use analyzer::DispersionAnalyzer;

// Re-export contract types
pub use contracts::{ContractError, DispersionMetrics};
