//! Core data types for the Archivist dossier pipeline.
//!
//! This crate provides the foundation data types shared by every Archivist
//! crate: generated records, per-item processing errors, the logical field
//! set and its mapping onto destination columns.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod destination;
mod field;
mod mapping;
mod processing_error;
mod record;

pub use destination::Destination;
pub use field::RecordField;
pub use mapping::{FieldAssignment, FieldMapping, RowPayload};
pub use processing_error::ProcessingError;
pub use record::{Record, RecordBuilder, RecordBuilderError};
