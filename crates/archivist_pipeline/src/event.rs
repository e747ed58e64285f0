//! Progress notifications published while a batch runs.

use crate::BatchReport;
use archivist_core::{ProcessingError, Record};
use std::time::Duration;

/// One step of batch progress.
///
/// Published on a broadcast channel; a presenter that subscribes before
/// calling [`start_batch`](crate::BatchGenerator::start_batch) sees every
/// record as soon as it is appended.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    /// The batch was accepted
    Started {
        /// Distinct identifiers to generate
        total: usize,
    },
    /// The throttle is about to pause before the next call
    Waiting {
        /// Length of the pause
        delay: Duration,
        /// Identifier the pause precedes
        next: String,
    },
    /// A record was generated and appended
    Generated(Record),
    /// Generation failed for one identifier
    Failed(ProcessingError),
    /// The batch ended
    Finished(BatchReport),
}
