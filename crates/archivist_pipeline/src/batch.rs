//! Throttled, serial batch generation.

use crate::flag::FlagGuard;
use crate::{canonicalize, precheck_existing, BatchEvent, RecordLedger};
use archivist_core::{Destination, ProcessingError};
use archivist_interface::{Pacer, RecordGenerator, RecordStore};
use archivist_rate_limit::Throttle;
use derive_getters::Getters;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

const EVENT_CAPACITY: usize = 256;

/// Why a batch did not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum BatchRejection {
    /// No identifiers were supplied
    #[display("No identifiers to generate")]
    Empty,
    /// Another batch is still running
    #[display("A batch is already running")]
    AlreadyRunning,
}

impl std::error::Error for BatchRejection {}

/// Summary of one finished batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct BatchReport {
    /// Distinct identifiers attempted
    attempted: usize,
    /// Records appended
    generated: usize,
    /// Identifiers that ended in a processing error
    failed: usize,
    /// Input tokens skipped as duplicates of earlier ones
    skipped_duplicates: usize,
    /// Throttle pauses taken
    pauses: usize,
}

/// Generates one record per identifier, one call at a time, with a fixed
/// delay between calls.
///
/// Results land in the shared [`RecordLedger`] as they complete. Only one
/// batch may run per generator; a second [`start_batch`](Self::start_batch)
/// while one is in flight is rejected.
pub struct BatchGenerator<G, S, P> {
    generator: G,
    store: S,
    pacer: P,
    delay: Duration,
    ledger: RecordLedger,
    running: AtomicBool,
    events: broadcast::Sender<BatchEvent>,
}

impl<G, S, P> BatchGenerator<G, S, P>
where
    G: RecordGenerator,
    S: RecordStore,
    P: Pacer + Clone,
{
    /// Create a generator writing into `ledger`.
    pub fn new(generator: G, store: S, pacer: P, delay: Duration, ledger: RecordLedger) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            generator,
            store,
            pacer,
            delay,
            ledger,
            running: AtomicBool::new(false),
            events,
        }
    }

    /// The ledger this generator appends to.
    pub fn ledger(&self) -> &RecordLedger {
        &self.ledger
    }

    /// Whether a batch is in flight.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Subscribe to progress events.
    pub fn subscribe(&self) -> broadcast::Receiver<BatchEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: BatchEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// Run one batch over `identifiers` in order.
    ///
    /// Prior records, errors and notice are cleared first. Canonical
    /// duplicates are skipped without using a delay slot. Every failure is
    /// recorded against the identifier as typed and the batch moves on.
    ///
    /// # Errors
    ///
    /// Returns [`BatchRejection::Empty`] for an empty sequence and
    /// [`BatchRejection::AlreadyRunning`] while another batch runs; neither
    /// touches the ledger.
    #[instrument(
        skip(self, identifiers, destination),
        fields(
            provider = self.generator.provider_name(),
            count = identifiers.len(),
        )
    )]
    pub async fn start_batch(
        &self,
        identifiers: &[String],
        destination: Option<&Destination>,
    ) -> Result<BatchReport, BatchRejection> {
        if identifiers.iter().all(|id| id.trim().is_empty()) {
            debug!("Empty batch ignored");
            return Err(BatchRejection::Empty);
        }
        let _running = FlagGuard::acquire(&self.running).ok_or_else(|| {
            warn!("Batch rejected, another batch is running");
            BatchRejection::AlreadyRunning
        })?;

        self.ledger.reset();

        let mut distinct = HashSet::new();
        let canonical_names: Vec<String> = identifiers
            .iter()
            .map(|id| canonicalize(id))
            .filter(|c| !c.is_empty() && distinct.insert(c.clone()))
            .collect();
        info!(distinct = canonical_names.len(), "Batch started");
        self.emit(BatchEvent::Started {
            total: canonical_names.len(),
        });

        let existing = precheck_existing(&self.store, destination, &canonical_names).await;

        let mut throttle = Throttle::new(self.pacer.clone(), self.delay);
        let mut seen = HashSet::new();
        let mut report = BatchReport::default();

        for raw in identifiers {
            let requested = raw.trim();
            let canonical = canonicalize(requested);
            if canonical.is_empty() {
                continue;
            }
            if !seen.insert(canonical) {
                debug!(identifier = %requested, "Skipping duplicate identifier");
                report.skipped_duplicates += 1;
                continue;
            }

            if throttle.will_pause() {
                self.emit(BatchEvent::Waiting {
                    delay: throttle.delay(),
                    next: requested.to_string(),
                });
            }
            throttle.wait_turn().await;
            report.attempted += 1;

            match self.generator.generate(requested).await {
                Ok(record) if self.ledger.contains(record.name()) => {
                    let error = ProcessingError::new(
                        requested,
                        format!("Generated {}, which is already in this batch.", record.name()),
                    );
                    warn!(identifier = %requested, name = %record.name(), "Duplicate record name");
                    self.record_failure(error, &mut report);
                }
                Ok(record) => {
                    let saved = existing.contains(record.name());
                    let record = record.with_saved(saved);
                    debug!(identifier = %requested, name = %record.name(), saved, "Record generated");
                    self.ledger.push(record.clone());
                    report.generated += 1;
                    self.emit(BatchEvent::Generated(record));
                }
                Err(e) => {
                    let error = ProcessingError::new(requested, e.user_message());
                    warn!(identifier = %requested, error = %e, "Generation failed");
                    self.record_failure(error, &mut report);
                }
            }
        }

        report.pauses = throttle.pauses();
        info!(
            generated = report.generated,
            failed = report.failed,
            skipped = report.skipped_duplicates,
            "Batch finished"
        );
        self.emit(BatchEvent::Finished(report.clone()));
        Ok(report)
    }

    fn record_failure(&self, error: ProcessingError, report: &mut BatchReport) {
        self.ledger.push_error(error.clone());
        report.failed += 1;
        self.emit(BatchEvent::Failed(error));
    }
}
