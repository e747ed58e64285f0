//! Error types for the Archivist workspace.
//!
//! This crate provides the foundation error types used throughout Archivist.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use archivist_error::{ArchivistResult, ValidationError};
//!
//! fn parse_input(raw: &str) -> ArchivistResult<String> {
//!     if raw.trim().is_empty() {
//!         Err(ValidationError::new("Please enter at least one SCP designation."))?
//!     }
//!     Ok(raw.trim().to_string())
//! }
//!
//! let err = parse_input("   ").unwrap_err();
//! assert_eq!(err.user_message(), "Please enter at least one SCP designation.");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
#[cfg(feature = "database")]
mod database;
mod error;
mod generation;
mod http;
mod save;
mod validation;

pub use config::ConfigError;
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{ArchivistError, ArchivistErrorKind, ArchivistResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use http::HttpError;
pub use save::{SaveError, SaveErrorKind};
pub use validation::ValidationError;
