//! Persisted connection settings.
//!
//! Settings live in `~/.config/archivist/settings.toml` and hold the
//! database URL, the active table and one field mapping per table that has
//! been connected, so switching back to a table restores its mapping.
//!
//! ```toml
//! table_name = "scp_visualizations"
//!
//! [mappings.scp_visualizations]
//! name = "name"
//! classification = "class"
//! ```

use archivist_core::{Destination, FieldMapping};
use archivist_error::{ArchivistError, ArchivistResult, ConfigError};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Connection settings for the archive destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Settings {
    /// PostgreSQL connection string; `DATABASE_URL` is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    database_url: Option<String>,
    /// Active destination table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    table_name: Option<String>,
    /// Field mapping per table
    #[serde(default)]
    mappings: BTreeMap<String, FieldMapping>,
}

impl Settings {
    /// Default settings location.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_path() -> ArchivistResult<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".config/archivist/settings.toml"))
            .ok_or_else(|| {
                ArchivistError::from(ConfigError::new("Could not determine home directory"))
            })
    }

    /// Load settings from `path`. A missing file yields empty settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> ArchivistResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No settings file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!(
                "Failed to read settings from {}: {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content).map_err(|e| {
            ConfigError::new(format!(
                "Failed to parse settings in {}: {}",
                path.display(),
                e
            ))
            .into()
        })
    }

    /// Write settings to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> ArchivistResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::new(format!(
                    "Failed to create settings directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize settings: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            ConfigError::new(format!(
                "Failed to write settings to {}: {}",
                path.display(),
                e
            ))
        })?;
        debug!("Settings saved");
        Ok(())
    }

    /// Make `table` the active destination with `mapping`.
    ///
    /// `database_url` replaces the stored URL when given.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the table name or mapping is empty;
    /// the settings are left unchanged.
    pub fn connect(
        &mut self,
        database_url: Option<String>,
        table: &str,
        mapping: FieldMapping,
    ) -> ArchivistResult<Destination> {
        let destination = Destination::new(table, mapping)?;
        if let Some(url) = database_url {
            self.database_url = Some(url);
        }
        self.table_name = Some(destination.table_name().clone());
        self.mappings
            .insert(destination.table_name().clone(), destination.mapping().clone());
        info!(table = %destination.table_name(), "Destination connected");
        Ok(destination)
    }

    /// Forget the database URL, the active table and that table's mapping.
    ///
    /// Returns `false` if nothing was connected.
    pub fn disconnect(&mut self) -> bool {
        let had_url = self.database_url.take().is_some();
        let table = self.table_name.take();
        if let Some(table) = &table {
            self.mappings.remove(table);
        }
        had_url || table.is_some()
    }

    /// The active destination, if a table with a non-empty mapping is set.
    pub fn destination(&self) -> Option<Destination> {
        let table = self.table_name.as_ref()?;
        let mapping = self.mappings.get(table)?;
        Destination::new(table.clone(), mapping.clone()).ok()
    }

    /// The stored mapping for `table`, if any.
    pub fn mapping_for(&self, table: &str) -> Option<&FieldMapping> {
        self.mappings.get(table)
    }

    /// The stored URL, falling back to `DATABASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if neither is set.
    pub fn resolve_database_url(&self) -> ArchivistResult<String> {
        if let Some(url) = &self.database_url {
            return Ok(url.clone());
        }
        archivist_database::database_url().map_err(|_| {
            ConfigError::new(
                "No database URL configured. Pass --url to connect or set DATABASE_URL.",
            )
            .into()
        })
    }
}
