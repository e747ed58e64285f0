//! Settings inspection and maintenance commands.

use archivist::render::{mask_url, render_mapping};
use archivist::{create_table_sql, ArchivistResult, Settings};
use std::path::Path;

const DEFAULT_TABLE: &str = "scp_visualizations";

/// Forget the stored connection.
pub fn disconnect(settings_path: &Path) -> ArchivistResult<()> {
    let mut settings = Settings::load(settings_path)?;
    if settings.disconnect() {
        settings.save(settings_path)?;
        println!("Disconnected.");
    } else {
        println!("Not connected.");
    }
    Ok(())
}

/// Print the stored settings with the password hidden.
pub fn show_settings(settings_path: &Path) -> ArchivistResult<()> {
    let settings = Settings::load(settings_path)?;
    println!("Settings file: {}", settings_path.display());
    match settings.database_url() {
        Some(url) => println!("Database URL: {}", mask_url(url)),
        None => println!("Database URL: (from DATABASE_URL)"),
    }
    match settings.table_name() {
        Some(table) => {
            println!("Table: {}", table);
            match settings.mapping_for(table) {
                Some(mapping) => println!("{}", render_mapping(mapping)),
                None => println!("  (no mapping)"),
            }
        }
        None => println!("Table: (not connected)"),
    }
    Ok(())
}

/// Print the CREATE TABLE helper for `table` or the connected table.
pub fn print_sql(table: Option<&str>, settings_path: &Path) -> ArchivistResult<()> {
    let settings = Settings::load(settings_path)?;
    let table = table
        .map(str::to_string)
        .or_else(|| settings.table_name().clone())
        .unwrap_or_else(|| DEFAULT_TABLE.to_string());
    println!("{}", create_table_sql(&table)?);
    Ok(())
}
