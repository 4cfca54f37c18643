//! Event channel bridge
//!
//! Wraps the synchronous `EventCallback` contract in a bounded channel so an
//! async consumer can drain events while the pipeline runs on a worker
//! thread. Ordering is preserved; a full channel applies backpressure to
//! the producer.

use std::sync::Arc;

use async_channel::{bounded, Receiver};
use contracts::{AnalysisEvent, EventCallback};

/// Create a bounded event channel and the callback feeding it
///
/// Dropping the receiver detaches the callback; further events are
/// discarded rather than failing the pipeline.
pub fn channel_events(capacity: usize) -> (EventCallback, Receiver<AnalysisEvent>) {
    let (tx, rx) = bounded(capacity);

    let callback: EventCallback = Arc::new(move |event| {
        let _ = tx.send_blocking(event);
    });

    (callback, rx)
}
