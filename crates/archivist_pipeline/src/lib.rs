//! The Archivist dossier pipeline.
//!
//! A run moves through four stages:
//! 1. [`normalize_text`] / [`normalize_file`] turn raw input into an
//!    [`IdentifierBatch`]
//! 2. [`precheck_existing`] asks the store which names are already persisted
//! 3. [`BatchGenerator::start_batch`] generates one record per identifier,
//!    serially and throttled, appending to a shared [`RecordLedger`]
//! 4. [`SaveReconciler`] persists chosen records and flips their saved flag
//!
//! # Example
//!
//! ```rust,ignore
//! let ledger = RecordLedger::new();
//! let generator = BatchGenerator::new(gemini, store.clone(), TokioPacer, delay, ledger.clone());
//! let reconciler = SaveReconciler::new(store, ledger.clone());
//!
//! let batch = normalize_text("SCP-173, scp-049")?;
//! generator.start_batch(&batch.requested(), Some(&destination)).await?;
//! reconciler.save_all_unsaved(Some(&destination)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod batch;
mod event;
mod flag;
mod ledger;
mod normalizer;
mod precheck;
mod reconciler;

pub use batch::{BatchGenerator, BatchRejection, BatchReport};
pub use event::BatchEvent;
pub use ledger::RecordLedger;
pub use normalizer::{
    canonicalize, load_identifier_file, normalize_file, normalize_text, Identifier,
    IdentifierBatch,
};
pub use precheck::precheck_existing;
pub use reconciler::{SaveOutcome, SaveReconciler};
