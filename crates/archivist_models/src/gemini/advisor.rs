//! Column mapping suggestions from Gemini.

use crate::gemini::GeminiClient;
use crate::parse_json;
use archivist_core::{FieldMapping, RecordField};
use archivist_error::ArchivistResult;
use archivist_interface::MappingAdvisor;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

fn field_list() -> String {
    RecordField::iter()
        .map(|f| format!("- \"{}\" ({})", f, f.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt asking which of `columns` holds each record field.
pub fn mapping_prompt(columns: &[String]) -> String {
    format!(
        "A database table has these columns: {}.\n\
         Map each of the following record fields to the best matching column:\n{}\n\
         Respond with a JSON object whose keys are the field keys above and whose \
         values are column names taken verbatim from the list. Omit fields with no \
         plausible column. Output ONLY valid JSON.",
        columns.join(", "),
        field_list()
    )
}

/// Read a suggested mapping, keeping only known fields mapped to existing
/// columns.
///
/// # Errors
///
/// Returns a malformed-response error if the text holds no JSON object.
///
/// # Examples
///
/// ```
/// use archivist_core::RecordField;
/// use archivist_models::parse_mapping_suggestion;
///
/// let columns = vec!["item".to_string(), "body".to_string()];
/// let text = r#"{"name": "item", "description": "body", "classification": "nope"}"#;
/// let mapping = parse_mapping_suggestion(text, &columns).unwrap();
/// assert_eq!(mapping.column(RecordField::Name), Some("item"));
/// assert_eq!(mapping.column(RecordField::Classification), None);
/// ```
pub fn parse_mapping_suggestion(text: &str, columns: &[String]) -> ArchivistResult<FieldMapping> {
    let raw: Map<String, Value> = parse_json(text)?;
    let mut mapping = FieldMapping::new();
    for (key, value) in raw {
        let (Ok(field), Some(column)) = (RecordField::from_str(key.trim()), value.as_str()) else {
            debug!(key = %key, "Ignoring unusable mapping suggestion");
            continue;
        };
        mapping.set(field, column);
    }
    mapping.retain_columns(columns);
    Ok(mapping)
}

/// [`MappingAdvisor`] backed by a Gemini text model.
#[derive(Debug, Clone)]
pub struct GeminiMappingAdvisor {
    client: GeminiClient,
}

impl GeminiMappingAdvisor {
    /// Wrap a client.
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MappingAdvisor for GeminiMappingAdvisor {
    #[instrument(skip(self), fields(column_count = columns.len()))]
    async fn suggest_mapping(&self, columns: &[String]) -> ArchivistResult<FieldMapping> {
        let text = self.client.generate_json_text(&mapping_prompt(columns)).await?;
        let mapping = parse_mapping_suggestion(&text, columns)?;
        debug!(mapped = mapping.len(), "Received mapping suggestion");
        Ok(mapping)
    }
}
