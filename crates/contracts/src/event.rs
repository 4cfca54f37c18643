//! AnalysisEvent - pipeline progress protocol
//!
//! Emitted by the corpus pipeline and consumed passively by any presentation
//! layer. Ordering guarantee: all `Pass1*` events precede `Pass2Complete`,
//! which precedes all `Pass3*` events, which precede `AnalysisComplete`;
//! exactly one `FinalResults` is emitted per run and it is always last.

use std::sync::Arc;

use serde::Serialize;

use crate::{UnitKey, UnitResult};

/// Event callback type
///
/// Invoked synchronously at each event point. Uses `Arc` to allow sharing
/// the listener across worker threads.
pub type EventCallback = Arc<dyn Fn(AnalysisEvent) + Send + Sync>;

/// Pipeline event stream variants
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisEvent {
    /// Free-form status message (phase banners, terminations)
    Status { message: String },

    /// Phase 1 progress: one event per corpus part
    Pass1Progress {
        current: usize,
        total: usize,
        label: String,
    },

    /// Phase 1 finished; all part sizes are final
    Pass1Complete,

    /// Phase 2 finished; the vocabulary is fully merged
    Pass2Complete,

    /// Phase 3 progress, emitted at batch boundaries
    Pass3Progress {
        current: usize,
        total: usize,
        unit: UnitKey,
    },

    /// Recoverable per-document problem (run continues)
    Warning { message: String },

    /// Recoverable per-unit problem (unit excluded, run continues)
    Error { message: String },

    /// All phases finished
    AnalysisComplete,

    /// Terminal event carrying the result rows (empty on aborted runs)
    FinalResults { results: Vec<UnitResult> },
}

impl AnalysisEvent {
    /// Create a status event
    pub fn status(message: impl Into<String>) -> Self {
        Self::Status {
            message: message.into(),
        }
    }

    /// Create a warning event
    pub fn warning(message: impl Into<String>) -> Self {
        Self::Warning {
            message: message.into(),
        }
    }

    /// Create an error event
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// True for the terminal `FinalResults` variant
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::FinalResults { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_tag() {
        let event = AnalysisEvent::Pass1Progress {
            current: 1,
            total: 3,
            label: "a.txt".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"pass1_progress\""));
        assert!(json.contains("\"total\":3"));
    }

    #[test]
    fn test_terminal_detection() {
        assert!(AnalysisEvent::FinalResults { results: vec![] }.is_terminal());
        assert!(!AnalysisEvent::AnalysisComplete.is_terminal());
    }
}
