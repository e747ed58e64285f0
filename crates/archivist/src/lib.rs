//! Archivist - SCP dossier generation and archiving
//!
//! Archivist turns a list of SCP designations into structured dossiers with
//! Google Gemini, pacing the calls to stay inside the service quota, and
//! archives the results into a PostgreSQL table of the user's choosing.
//!
//! # Architecture
//!
//! Archivist is organized as a workspace with focused crates:
//!
//! - `archivist_error` - Error types
//! - `archivist_core` - Records, fields and column mappings
//! - `archivist_interface` - Generator, store and pacer traits
//! - `archivist_rate_limit` - Call pacing and configuration
//! - `archivist_models` - Gemini integration
//! - `archivist_database` - PostgreSQL record store
//! - `archivist_pipeline` - Normalizer, batch generator and save reconciler
//!
//! This crate (`archivist`) re-exports everything for convenience and adds
//! the pieces the command-line tool needs: persisted connection
//! [`settings`], table [`analysis`], terminal [`render`]ing and
//! [`telemetry`] setup.

pub use archivist_core::*;
pub use archivist_database::*;
pub use archivist_error::*;
pub use archivist_interface::*;
pub use archivist_models::*;
pub use archivist_pipeline::*;
pub use archivist_rate_limit::*;

pub mod analysis;
pub mod render;
pub mod settings;
pub mod telemetry;

pub use analysis::{analyze_table, MappingSource, TableAnalysis};
pub use settings::Settings;
