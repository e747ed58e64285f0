//! Trait definitions for the Archivist dossier pipeline.
//!
//! The pipeline talks to the outside world only through these traits:
//! a [`RecordGenerator`] that produces records, a [`RecordStore`] that
//! persists them, and a [`Pacer`] that spaces calls out in time.

mod traits;

pub use traits::{MappingAdvisor, Pacer, RecordGenerator, RecordStore, TableInspector, TokioPacer};
