//! Archivist CLI binary.
//!
//! This binary provides command-line access to Archivist:
//! - Generate dossiers for a list of SCP designations and save them
//! - Connect a PostgreSQL table and map record fields onto its columns
//! - Show or clear the stored connection settings

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() {
    use cli::{Cli, Commands};

    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    archivist::telemetry::init_console_telemetry(cli.verbose);

    let settings_path = match cli.settings.clone() {
        Some(path) => path,
        None => match archivist::Settings::default_path() {
            Ok(path) => path,
            Err(e) => {
                eprintln!("Error: {}", e.user_message());
                std::process::exit(1);
            }
        },
    };

    let result = match cli.command {
        Commands::Generate(args) => cli::generate(args, &settings_path).await,
        Commands::Connect(args) => cli::connect(args, &settings_path).await,
        Commands::Disconnect => cli::disconnect(&settings_path),
        Commands::Settings => cli::show_settings(&settings_path),
        Commands::Sql { table } => cli::print_sql(table.as_deref(), &settings_path),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "Command failed");
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }
}
