//! # Export
//!
//! Result export module.
//!
//! Responsibilities:
//! - Consume `UnitResult` rows
//! - Fan-out to multiple sinks (CSV / JSON-lines / log)
//! - Isolate slow or failing sinks without losing rows

pub mod error;
pub mod exporter;
pub mod format;
pub mod handle;
pub mod metrics;
pub mod sinks;

pub use contracts::{ResultSink, UnitResult};
pub use error::ExportError;
pub use exporter::{create_exporter, Exporter};
pub use format::{header, row_values, DEFAULT_PRECISION, METRIC_COLUMNS};
pub use handle::SinkHandle;
pub use metrics::SinkMetrics;
pub use sinks::{CsvSink, JsonlSink, LogSink};
