//! JsonlSink - one JSON object per result row

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use contracts::{ContractError, ResultSink, UnitResult};
use tracing::{info, instrument};

/// Sink that writes results as JSON lines
///
/// Rows serialize through serde, so non-finite metric values become JSON
/// `null`; the literal `inf`/`nan` tokens are a property of the tabular
/// CSV export only.
pub struct JsonlSink {
    name: String,
    path: PathBuf,
    writer: BufWriter<File>,
    rows_written: u64,
}

impl JsonlSink {
    /// Create a new JsonlSink
    pub fn new(name: impl Into<String>, path: PathBuf) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let writer = BufWriter::new(File::create(&path)?);

        Ok(Self {
            name: name.into(),
            path,
            writer,
            rows_written: 0,
        })
    }

    /// Create from params map (`path`)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> std::io::Result<Self> {
        let path = params
            .get("path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./corpus_analysis_results.jsonl"));
        Self::new(name, path)
    }
}

impl ResultSink for JsonlSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "jsonl_sink_write", skip(self, row), fields(sink = %self.name, unit = %row.word))]
    async fn write(&mut self, row: &UnitResult) -> Result<(), ContractError> {
        let json = serde_json::to_string(row)
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))?;
        writeln!(self.writer, "{json}")
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))?;
        self.rows_written += 1;
        Ok(())
    }

    #[instrument(name = "jsonl_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        self.writer
            .flush()
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))
    }

    #[instrument(name = "jsonl_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        self.writer
            .flush()
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))?;
        info!(
            sink = %self.name,
            path = %self.path.display(),
            rows = self.rows_written,
            "jsonl export closed"
        );
        Ok(())
    }
}
