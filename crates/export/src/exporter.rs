//! Exporter - main loop for fan-out to sinks

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use contracts::{SinkConfig, SinkType, UnitResult};

use crate::error::ExportError;
use crate::handle::SinkHandle;
use crate::sinks::{CsvSink, JsonlSink, LogSink};

/// Create a SinkHandle from configuration
#[instrument(
    name = "exporter_create_sink_handle",
    skip(config),
    fields(sink = %config.name, sink_type = ?config.sink_type)
)]
fn create_sink_handle(config: &SinkConfig) -> Result<SinkHandle, ExportError> {
    match config.sink_type {
        SinkType::Csv => {
            let sink = CsvSink::from_params(&config.name, &config.params)
                .map_err(|e| ExportError::sink_creation(&config.name, e.to_string()))?;
            Ok(SinkHandle::spawn(sink, config.queue_capacity))
        }
        SinkType::Jsonl => {
            let sink = JsonlSink::from_params(&config.name, &config.params)
                .map_err(|e| ExportError::sink_creation(&config.name, e.to_string()))?;
            Ok(SinkHandle::spawn(sink, config.queue_capacity))
        }
        SinkType::Log => {
            let sink = LogSink::new(&config.name);
            Ok(SinkHandle::spawn(sink, config.queue_capacity))
        }
    }
}

/// The main Exporter that fans result rows out to sinks
pub struct Exporter {
    handles: Vec<SinkHandle>,
    input_rx: mpsc::Receiver<UnitResult>,
}

impl Exporter {
    /// Create an exporter with custom sink handles (for testing)
    pub fn with_handles(handles: Vec<SinkHandle>, input_rx: mpsc::Receiver<UnitResult>) -> Self {
        Self { handles, input_rx }
    }

    /// Run the exporter main loop
    ///
    /// Consumes rows from input and fans out to all sinks; returns when the
    /// input channel closes and all sinks are flushed.
    #[instrument(name = "exporter_run", skip(self))]
    pub async fn run(mut self) {
        info!(sinks = self.handles.len(), "exporter started");

        let mut row_count: u64 = 0;

        while let Some(row) = self.input_rx.recv().await {
            row_count += 1;
            for handle in &self.handles {
                handle.send(row.clone()).await;
            }

            if row_count.is_multiple_of(500) {
                debug!(rows = row_count, "exporter progress");
            }
        }

        info!(rows = row_count, "exporter input closed, shutting down");

        for handle in self.handles {
            handle.shutdown().await;
        }

        info!("exporter shutdown complete");
    }

    /// Spawn the exporter as a background task
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }
}

/// Convenience function to create an exporter from sink configs
#[instrument(name = "exporter_create", skip(sink_configs, input_rx))]
pub fn create_exporter(
    sink_configs: &[SinkConfig],
    input_rx: mpsc::Receiver<UnitResult>,
) -> Result<Exporter, ExportError> {
    let mut handles = Vec::with_capacity(sink_configs.len());
    for config in sink_configs {
        handles.push(create_sink_handle(config)?);
    }
    Ok(Exporter::with_handles(handles, input_rx))
}
