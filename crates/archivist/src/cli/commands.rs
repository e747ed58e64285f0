//! CLI command definitions.

use archivist::FieldAssignment;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Archivist - generate SCP Foundation dossiers and archive them in PostgreSQL
#[derive(Parser, Debug)]
#[command(name = "archivist")]
#[command(about = "Generate SCP Foundation dossiers and archive them in PostgreSQL", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (defaults to ~/.config/archivist/settings.toml)
    #[arg(long, global = true, env = "ARCHIVIST_SETTINGS")]
    pub settings: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate dossiers and optionally save them
    Generate(GenerateArgs),

    /// Connect a table and map record fields onto its columns
    Connect(ConnectArgs),

    /// Forget the stored connection and the active table's mapping
    Disconnect,

    /// Show the stored connection settings
    Settings,

    /// Print the CREATE TABLE statement for a compatible table
    Sql {
        /// Table name (defaults to the connected table)
        #[arg(long)]
        table: Option<String>,
    },
}

/// Arguments for `archivist generate`
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// SCP designations, separated by commas or newlines
    pub ids: Vec<String>,

    /// Read designations from a file, one per line
    #[arg(long, short, conflicts_with = "ids")]
    pub file: Option<PathBuf>,

    /// Save the named record after generation (repeatable)
    #[arg(long = "save", value_name = "NAME")]
    pub save: Vec<String>,

    /// Save every unsaved record after generation
    #[arg(long)]
    pub save_all: bool,

    /// Do not ask for confirmation before saving all
    #[arg(long, short)]
    pub yes: bool,
}

/// Arguments for `archivist connect`
#[derive(Args, Debug)]
pub struct ConnectArgs {
    /// Destination table
    #[arg(long)]
    pub table: String,

    /// PostgreSQL connection string (defaults to DATABASE_URL)
    #[arg(long)]
    pub url: Option<String>,

    /// Override one field mapping, e.g. `imageReference=picture_url` (repeatable)
    #[arg(long = "map", value_name = "FIELD=COLUMN")]
    pub map: Vec<FieldAssignment>,

    /// Match columns by name instead of asking Gemini
    #[arg(long)]
    pub no_suggest: bool,
}
