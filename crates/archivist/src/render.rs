//! Plain-text rendering for the terminal.

use archivist_core::{FieldMapping, ProcessingError, Record};
use archivist_pipeline::BatchReport;
use std::fmt::Write;
use strum::IntoEnumIterator;

const RULE_WIDTH: usize = 72;
const IMAGE_PREVIEW: usize = 48;

/// A dossier card for one record.
///
/// Inline `data:` images are abbreviated.
///
/// # Examples
///
/// ```
/// use archivist::{render::render_record, RecordBuilder};
///
/// let record = RecordBuilder::default()
///     .name("SCP-173")
///     .classification("Euclid")
///     .containment("Locked container.")
///     .description("Statue.")
///     .image_reference("")
///     .build()
///     .unwrap();
/// let card = render_record(&record);
/// assert!(card.contains("Item #: SCP-173"));
/// assert!(card.contains("Status: Not saved"));
/// ```
pub fn render_record(record: &Record) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Item #: {}", record.name());
    let _ = writeln!(out, "Object Class: {}", record.classification());
    let _ = writeln!(out, "Status: {}", if record.saved() { "Saved" } else { "Not saved" });
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    let _ = writeln!(out, "Special Containment Procedures:\n{}\n", record.containment());
    let _ = writeln!(out, "Description:\n{}", record.description());
    if !record.image_reference().is_empty() {
        let _ = writeln!(out, "\nImage: {}", abbreviate_image(record.image_reference()));
    }
    let _ = write!(out, "{}", rule);
    out
}

fn abbreviate_image(reference: &str) -> String {
    if reference.starts_with("data:") && reference.len() > IMAGE_PREVIEW {
        let preview: String = reference.chars().take(IMAGE_PREVIEW).collect();
        format!("{}... ({} bytes inline)", preview, reference.len())
    } else {
        reference.to_string()
    }
}

/// The per-item failure list, or an empty string when there are none.
pub fn render_failures(errors: &[ProcessingError]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let mut out = format!("Processing failures ({}):", errors.len());
    for error in errors {
        let _ = write!(out, "\n  - {}: {}", error.identifier(), error.message());
    }
    out
}

/// A one-line batch summary.
pub fn render_report(report: &BatchReport, unsaved: usize) -> String {
    let mut out = format!(
        "Generated {} of {} dossier(s)",
        report.generated(),
        report.attempted()
    );
    if *report.failed() > 0 {
        let _ = write!(out, ", {} failed", report.failed());
    }
    if *report.skipped_duplicates() > 0 {
        let _ = write!(out, ", {} duplicate(s) skipped", report.skipped_duplicates());
    }
    let _ = write!(out, ". {} unsaved.", unsaved);
    out
}

/// The mapping as an aligned field/column table. Unmapped fields are shown
/// as such.
pub fn render_mapping(mapping: &FieldMapping) -> String {
    archivist_core::RecordField::iter()
        .map(|field| {
            let column = mapping.column(field).unwrap_or("(not mapped)");
            format!("  {:<24} -> {}", field.label(), column)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Hide the password in a connection URL.
///
/// # Examples
///
/// ```
/// use archivist::render::mask_url;
///
/// assert_eq!(
///     mask_url("postgres://archivist:hunter2@db:5432/scp"),
///     "postgres://archivist:****@db:5432/scp"
/// );
/// assert_eq!(mask_url("postgres://db/scp"), "postgres://db/scp");
/// ```
pub fn mask_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://").map(|i| i + 3) else {
        return url.to_string();
    };
    let rest = &url[scheme_end..];
    let Some(at) = rest.rfind('@') else {
        return url.to_string();
    };
    let credentials = &rest[..at];
    match credentials.find(':') {
        Some(colon) => format!(
            "{}{}:****{}",
            &url[..scheme_end],
            &credentials[..colon],
            &rest[at..]
        ),
        None => url.to_string(),
    }
}
