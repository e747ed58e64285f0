//! Call pacing and configuration.
//!
//! This crate keeps the generation service inside its quota:
//! - [`Throttle`] inserts the fixed inter-call delay between batch steps
//! - [`RequestLimiter`] enforces a requests-per-minute ceiling per client
//! - [`ArchivistConfig`] loads the tunables from layered TOML files

mod config;
mod limiter;
mod throttle;

pub use config::{ArchivistConfig, GeminiConfig, ThrottleConfig};
pub use limiter::RequestLimiter;
pub use throttle::Throttle;
