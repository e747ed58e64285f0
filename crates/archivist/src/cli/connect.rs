//! `archivist connect` handler.

use super::commands::ConnectArgs;
use archivist::render::render_mapping;
use archivist::{
    analyze_table, establish_pool, ArchivistConfig, ArchivistResult, GeminiClient,
    GeminiMappingAdvisor, PgRecordStore, Settings,
};
use std::path::Path;
use tracing::warn;

/// Inspect the table, propose a mapping and store it as the destination.
pub async fn connect(args: ConnectArgs, settings_path: &Path) -> ArchivistResult<()> {
    let mut settings = Settings::load(settings_path)?;
    let url = match &args.url {
        Some(url) => url.clone(),
        None => settings.resolve_database_url()?,
    };

    let store = PgRecordStore::new(establish_pool(&url)?);

    let advisor = if args.no_suggest {
        None
    } else {
        let config = ArchivistConfig::load()?;
        match GeminiClient::new(config.gemini().clone()) {
            Ok(client) => Some(GeminiMappingAdvisor::new(client)),
            Err(e) => {
                warn!(error = %e, "Mapping suggestions unavailable");
                None
            }
        }
    };

    println!("Connection successful. Analyzing table schema...");
    let analysis = analyze_table(&store, advisor.as_ref(), &args.table, &args.map).await?;

    println!(
        "Mapping for '{}' ({}):",
        analysis.table(),
        analysis.source()
    );
    println!("{}", render_mapping(analysis.mapping()));

    settings.connect(args.url, &args.table, analysis.mapping().clone())?;
    settings.save(settings_path)?;
    println!("Settings saved to {}.", settings_path.display());
    Ok(())
}
