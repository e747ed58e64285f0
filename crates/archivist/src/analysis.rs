//! Working out how records map onto an existing table.

use archivist_core::{FieldAssignment, FieldMapping};
use archivist_error::{ArchivistResult, ValidationError};
use archivist_interface::{MappingAdvisor, TableInspector};
use derive_getters::Getters;
use tracing::{debug, info, instrument, warn};

/// Where a proposed mapping came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum MappingSource {
    /// The table reported no columns; the default layout is assumed
    #[strum(serialize = "default layout")]
    Default,
    /// Suggested by the mapping advisor
    #[strum(serialize = "AI suggestion")]
    Advisor,
    /// Matched on column names
    #[strum(serialize = "column name matching")]
    Heuristic,
}

/// Columns of a table and the mapping proposed for it.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct TableAnalysis {
    /// Table inspected
    table: String,
    /// Column names in ordinal order
    columns: Vec<String>,
    /// Proposed mapping, with overrides applied
    mapping: FieldMapping,
    /// Origin of the mapping before overrides
    source: MappingSource,
}

/// Inspect `table` and propose a field mapping.
///
/// A table without columns gets the default mapping. Otherwise the advisor
/// is asked first; an advisor failure or an empty suggestion falls back to
/// name matching. Suggested columns that do not exist are dropped.
/// `overrides` are applied last and must name existing columns.
///
/// # Errors
///
/// Returns an error if the table cannot be inspected or an override names
/// an unknown column.
#[instrument(skip(inspector, advisor, overrides), fields(overrides = overrides.len()))]
pub async fn analyze_table<I, A>(
    inspector: &I,
    advisor: Option<&A>,
    table: &str,
    overrides: &[FieldAssignment],
) -> ArchivistResult<TableAnalysis>
where
    I: TableInspector + ?Sized,
    A: MappingAdvisor + ?Sized,
{
    let columns = inspector.table_columns(table).await?;
    debug!(columns = columns.len(), "Inspected table");

    let (mut mapping, source) = if columns.is_empty() {
        (FieldMapping::default_columns(), MappingSource::Default)
    } else {
        let suggested = match advisor {
            Some(advisor) => match advisor.suggest_mapping(&columns).await {
                Ok(mut mapping) => {
                    mapping.retain_columns(&columns);
                    Some(mapping).filter(|m| !m.is_empty())
                }
                Err(e) => {
                    warn!(error = %e, "Mapping advisor failed, matching column names instead");
                    None
                }
            },
            None => None,
        };
        match suggested {
            Some(mapping) => (mapping, MappingSource::Advisor),
            None => (
                FieldMapping::infer_from_columns(&columns),
                MappingSource::Heuristic,
            ),
        }
    };

    for assignment in overrides {
        let column = assignment.column();
        if !column.is_empty() && !columns.is_empty() && !columns.iter().any(|c| c == column) {
            return Err(ValidationError::new(format!(
                "Column '{}' does not exist in table '{}'.",
                column, table
            ))
            .into());
        }
        assignment.apply(&mut mapping);
    }

    info!(%source, mapped = mapping.len(), "Proposed field mapping");
    Ok(TableAnalysis {
        table: table.to_string(),
        columns,
        mapping,
        source,
    })
}
