//! LogSink - logs row summaries via tracing

use contracts::{ContractError, ResultSink, UnitResult};
use tracing::{debug, info, instrument};

/// Sink that logs per-unit summaries for debugging
pub struct LogSink {
    name: String,
    rows_written: u64,
}

impl LogSink {
    /// Create a new LogSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows_written: 0,
        }
    }
}

impl ResultSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "log_sink_write", skip(self, row), fields(sink = %self.name, unit = %row.word))]
    async fn write(&mut self, row: &UnitResult) -> Result<(), ContractError> {
        self.rows_written += 1;
        debug!(
            sink = %self.name,
            word = %row.word,
            pos = %row.pos,
            total_frequency = row.total_frequency,
            range = row.metrics.range,
            dp = ?row.metrics.dp,
            evenness_da = ?row.metrics.evenness_da,
            "unit result"
        );
        Ok(())
    }

    #[instrument(name = "log_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        // Nothing to flush for log sink
        Ok(())
    }

    #[instrument(name = "log_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        info!(sink = %self.name, rows = self.rows_written, "LogSink closed");
        Ok(())
    }
}
