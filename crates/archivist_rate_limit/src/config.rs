//! Configuration structures for pacing and the generation service.
//!
//! This module provides TOML-based configuration. The configuration system
//! supports:
//! - Bundled defaults (include_str! from archivist.toml)
//! - User overrides (./archivist.toml or ~/.config/archivist/archivist.toml)
//! - Automatic merging with user values taking precedence

use archivist_error::{ArchivistError, ArchivistResult, ConfigError};
use config::{Config, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Spacing between sequential generation calls.
///
/// ```toml
/// [throttle]
/// inter_call_delay_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Deserialize, Serialize)]
pub struct ThrottleConfig {
    /// Seconds to wait between two generation calls
    inter_call_delay_secs: u64,
}

impl ThrottleConfig {
    /// Build a throttle configuration from a delay in seconds.
    pub fn new(inter_call_delay_secs: u64) -> Self {
        Self {
            inter_call_delay_secs,
        }
    }

    /// The delay as a [`Duration`].
    pub fn inter_call_delay(&self) -> Duration {
        Duration::from_secs(self.inter_call_delay_secs)
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self::new(30)
    }
}

/// Gemini generation service settings.
///
/// ```toml
/// [gemini]
/// model = "gemini-2.5-flash"
/// image_model = "imagen-3.0-generate-002"
/// rpm = 10
/// ```
#[derive(Debug, Clone, PartialEq, Getters, Deserialize, Serialize)]
pub struct GeminiConfig {
    /// REST endpoint base, without trailing slash
    endpoint: String,
    /// Text model used for dossier generation and mapping suggestions
    model: String,
    /// Image model used to render the dossier image
    image_model: String,
    /// Whether to request an image for each record
    #[serde(default = "default_true")]
    generate_images: bool,
    /// Requests per minute ceiling, if any
    #[serde(default)]
    rpm: Option<u32>,
    /// Per-request timeout in seconds
    request_timeout_secs: u64,
}

fn default_true() -> bool {
    true
}

impl GeminiConfig {
    /// Per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Return a copy pointed at a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Return a copy with image generation switched on or off.
    pub fn with_images(mut self, generate_images: bool) -> Self {
        self.generate_images = generate_images;
        self
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            image_model: "imagen-3.0-generate-002".to_string(),
            generate_images: true,
            rpm: Some(10),
            request_timeout_secs: 120,
        }
    }
}

/// Top-level Archivist configuration.
///
/// Loads configuration from TOML files with a precedence system:
/// 1. Bundled defaults (include_str! from archivist.toml)
/// 2. User override (~/.config/archivist/archivist.toml, then ./archivist.toml)
///
/// # Example
///
/// ```no_run
/// use archivist_rate_limit::ArchivistConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ArchivistConfig::load()?;
/// println!("Delay: {:?}", config.throttle().inter_call_delay());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Getters, Deserialize, Serialize)]
pub struct ArchivistConfig {
    /// Inter-call pacing
    #[serde(default)]
    throttle: ThrottleConfig,
    /// Generation service
    #[serde(default)]
    gemini: GeminiConfig,
}

impl ArchivistConfig {
    /// Load configuration from a specific file path layered over the bundled
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ArchivistResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ArchivistError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ArchivistError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (archivist.toml shipped with the workspace)
    /// 2. User config in home directory (~/.config/archivist/archivist.toml)
    /// 3. User config in current directory (./archivist.toml)
    ///
    /// User config files are optional and will be silently skipped if not found.
    #[instrument]
    pub fn load() -> ArchivistResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/archivist/archivist.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("archivist").required(false));

        builder
            .build()
            .map_err(|e| {
                ArchivistError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ArchivistError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}

// Bundled default configuration
const DEFAULT_CONFIG: &str = include_str!("../../../archivist.toml");
