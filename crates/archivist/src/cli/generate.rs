//! `archivist generate` handler.

use super::commands::GenerateArgs;
use archivist::render::{render_failures, render_record, render_report};
use archivist::{
    canonicalize, establish_pool, load_identifier_file, normalize_text, ArchivistConfig,
    ArchivistResult, BatchEvent, BatchGenerator, ConfigError, Destination, GeminiClient,
    GeminiRecordGenerator, PgRecordStore, RecordLedger, SaveOutcome, SaveReconciler, Settings,
    TableInspector, TokioPacer, ValidationError,
};
use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

/// Generate dossiers, then apply any requested saves.
pub async fn generate(args: GenerateArgs, settings_path: &Path) -> ArchivistResult<()> {
    let settings = Settings::load(settings_path)?;
    let destination = settings
        .destination()
        .ok_or_else(|| ConfigError::new("Please connect to a database first."))?;

    let batch = match &args.file {
        Some(path) => load_identifier_file(path)?,
        None => normalize_text(&args.ids.join("\n"))?,
    };

    let config = ArchivistConfig::load()?;
    let pool = establish_pool(&settings.resolve_database_url()?)?;
    let store = Arc::new(PgRecordStore::new(pool));

    // Startup probe: an unreachable table means no usable destination
    if let Err(e) = store.table_columns(destination.table_name()).await {
        warn!(error = %e, "Destination probe failed");
        return Err(ConfigError::new(format!(
            "Could not reach table '{}': {}. Please connect to a database first.",
            destination.table_name(),
            e.user_message()
        ))
        .into());
    }

    let client = GeminiClient::new(config.gemini().clone())?;
    let ledger = RecordLedger::new();
    let generator = BatchGenerator::new(
        GeminiRecordGenerator::new(client),
        store.clone(),
        TokioPacer,
        config.throttle().inter_call_delay(),
        ledger.clone(),
    );
    let reconciler = SaveReconciler::new(store, ledger.clone());

    let mut events = generator.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(BatchEvent::Started { total }) => println!("Generating {} dossier(s)...", total),
                Ok(BatchEvent::Waiting { delay, next }) => {
                    println!("Waiting {}s before {}...", delay.as_secs(), next)
                }
                Ok(BatchEvent::Generated(record)) => println!("{}\n", render_record(&record)),
                Ok(BatchEvent::Failed(error)) => eprintln!("Failed: {}", error),
                Ok(BatchEvent::Finished(_)) | Err(RecvError::Closed) => break,
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Progress output fell behind"),
            }
        }
    });

    let outcome = generator
        .start_batch(&batch.requested(), Some(&destination))
        .await;
    drop(generator);
    let _ = printer.await;
    let report = outcome.map_err(|e| ValidationError::new(e.to_string()))?;

    let failures = render_failures(&ledger.errors());
    if !failures.is_empty() {
        eprintln!("{}", failures);
    }
    println!("{}", render_report(&report, ledger.unsaved().len()));

    for requested in &args.save {
        save_one(&reconciler, &ledger, requested, &destination).await;
    }

    if args.save_all {
        save_all(&reconciler, &ledger, &destination, args.yes).await?;
    }

    Ok(())
}

async fn save_one(
    reconciler: &SaveReconciler<Arc<PgRecordStore>>,
    ledger: &RecordLedger,
    requested: &str,
    destination: &Destination,
) {
    // Accept any casing of a generated name
    let wanted = canonicalize(requested);
    let name = ledger
        .records()
        .into_iter()
        .map(|r| r.name().clone())
        .find(|name| canonicalize(name) == wanted)
        .unwrap_or_else(|| requested.to_string());

    match reconciler.save_one(&name, Some(destination)).await {
        Ok(true) => println!("Saved {}.", name),
        Ok(false) => println!("{} is already saved.", name),
        Err(e) => eprintln!("{}", e.user_message()),
    }
}

async fn save_all(
    reconciler: &SaveReconciler<Arc<PgRecordStore>>,
    ledger: &RecordLedger,
    destination: &Destination,
    assume_yes: bool,
) -> ArchivistResult<()> {
    let unsaved = ledger.unsaved().len();
    if unsaved > 0
        && !assume_yes
        && !confirm(&format!(
            "Save {} unsaved item(s) to '{}'?",
            unsaved,
            destination.table_name()
        ))?
    {
        println!("Nothing saved.");
        return Ok(());
    }

    match reconciler.save_all_unsaved(Some(destination)).await? {
        SaveOutcome::Saved { count } => {
            info!(count, "Bulk save complete");
            println!("Saved {} item(s) to '{}'.", count, destination.table_name());
        }
        SaveOutcome::NothingToSave | SaveOutcome::AlreadySaving => {
            if let Some(notice) = ledger.notice() {
                println!("{}", notice);
            }
        }
    }
    Ok(())
}

fn confirm(prompt: &str) -> ArchivistResult<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout()
        .flush()
        .map_err(|e| ValidationError::new(format!("Failed to write prompt: {}", e)))?;
    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| ValidationError::new(format!("Failed to read answer: {}", e)))?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
