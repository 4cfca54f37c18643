//! Sink implementations

mod csv;
mod jsonl;
mod log;

pub use csv::{CsvSink, CsvSinkConfig};
pub use jsonl::JsonlSink;
pub use log::LogSink;
