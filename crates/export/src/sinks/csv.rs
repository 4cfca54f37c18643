//! CsvSink - writes the tabular result file

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use contracts::{ContractError, ResultSink, UnitResult};
use tracing::{debug, info, instrument};

use crate::format::{self, csv_escape, DEFAULT_PRECISION};

/// Configuration for CsvSink
#[derive(Debug, Clone)]
pub struct CsvSinkConfig {
    /// Output file path
    pub path: PathBuf,

    /// Decimal precision for floating values
    pub precision: usize,
}

impl CsvSinkConfig {
    /// Create config from params map (`path`, `precision`)
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let path = params
            .get("path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./corpus_analysis_results.csv"));
        let precision = params
            .get("precision")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_PRECISION);

        Self { path, precision }
    }
}

/// Sink that writes one CSV row per analyzed unit
pub struct CsvSink {
    name: String,
    config: CsvSinkConfig,
    writer: BufWriter<File>,
    rows_written: u64,
}

impl CsvSink {
    /// Create a new CsvSink and write the header row
    pub fn new(name: impl Into<String>, config: CsvSinkConfig) -> std::io::Result<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(&config.path)?);
        writeln!(writer, "{}", format::header().join(","))?;

        Ok(Self {
            name: name.into(),
            config,
            writer,
            rows_written: 0,
        })
    }

    /// Create from params map (for the exporter factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> std::io::Result<Self> {
        Self::new(name, CsvSinkConfig::from_params(params))
    }

    fn write_row(&mut self, row: &UnitResult) -> std::io::Result<()> {
        let values = format::row_values(row, self.config.precision);
        let line: Vec<_> = values.iter().map(|value| csv_escape(value)).collect();
        writeln!(self.writer, "{}", line.join(","))?;
        self.rows_written += 1;
        Ok(())
    }
}

impl ResultSink for CsvSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "csv_sink_write", skip(self, row), fields(sink = %self.name, unit = %row.word))]
    async fn write(&mut self, row: &UnitResult) -> Result<(), ContractError> {
        self.write_row(row)
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))
    }

    #[instrument(name = "csv_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        self.writer
            .flush()
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))
    }

    #[instrument(name = "csv_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        self.writer
            .flush()
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))?;
        info!(
            sink = %self.name,
            path = %self.config.path.display(),
            rows = self.rows_written,
            "csv export closed"
        );
        debug!(sink = %self.name, "CsvSink closed");
        Ok(())
    }
}
