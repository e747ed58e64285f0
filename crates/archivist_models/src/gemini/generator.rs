//! Dossier generation on top of [`GeminiClient`].

use crate::gemini::GeminiClient;
use crate::parse_json;
use archivist_core::{Record, RecordBuilder};
use archivist_error::{ArchivistResult, GenerationError, GenerationErrorKind};
use archivist_interface::RecordGenerator;
use async_trait::async_trait;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Text portion of a dossier as returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct DossierDto {
    /// Item number, e.g. "SCP-173"
    name: String,
    /// Object class
    #[serde(rename = "class", alias = "classification", alias = "objectClass")]
    class: String,
    /// Special containment procedures
    #[serde(alias = "containmentProcedures", alias = "specialContainmentProcedures")]
    containment: String,
    /// Description
    description: String,
}

impl DossierDto {
    /// Combine with an image reference into a [`Record`].
    ///
    /// # Errors
    ///
    /// Returns a malformed-response error if the record cannot be built.
    pub fn into_record(self, image_reference: impl Into<String>) -> ArchivistResult<Record> {
        RecordBuilder::default()
            .name(self.name)
            .classification(self.class)
            .containment(self.containment)
            .description(self.description)
            .image_reference(image_reference)
            .build()
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::MalformedResponse(e.to_string())).into()
            })
    }
}

/// Prompt asking for the text dossier of `identifier`.
pub fn dossier_prompt(identifier: &str) -> String {
    format!(
        "You are an archivist of the SCP Foundation. Write the dossier for {identifier}.\n\
         Respond with a single JSON object with exactly these string keys:\n\
         \"name\": the item number in canonical form (for example \"SCP-173\"),\n\
         \"class\": the object class (Safe, Euclid, Keter, Thaumiel, ...),\n\
         \"containment\": the special containment procedures,\n\
         \"description\": the description.\n\
         Output ONLY valid JSON."
    )
}

fn image_prompt(dossier: &DossierDto) -> String {
    let summary: String = dossier.description.chars().take(600).collect();
    format!(
        "Archival photograph of {} from the SCP Foundation files, object class {}. \
         Clinical, documentary style, no text overlays. Subject: {}",
        dossier.name, dossier.class, summary
    )
}

/// Parse the model's text output into a [`DossierDto`].
///
/// # Errors
///
/// Returns a malformed-response error if no dossier object can be read or
/// its name is blank.
///
/// # Examples
///
/// ```
/// use archivist_models::parse_dossier;
///
/// let text = r#"{"name":"SCP-173","class":"Euclid","containment":"Locked.","description":"Statue."}"#;
/// let dossier = parse_dossier(text, "scp-173").unwrap();
/// assert_eq!(dossier.name(), "SCP-173");
/// ```
pub fn parse_dossier(text: &str, identifier: &str) -> ArchivistResult<DossierDto> {
    let dossier: DossierDto = parse_json(text)?;
    if dossier.name.trim().is_empty() {
        return Err(GenerationError::new(GenerationErrorKind::MalformedResponse(format!(
            "dossier for '{}' has no name",
            identifier
        )))
        .into());
    }
    Ok(DossierDto {
        name: dossier.name.trim().to_string(),
        ..dossier
    })
}

/// [`RecordGenerator`] producing SCP dossiers with Gemini and Imagen.
#[derive(Debug, Clone)]
pub struct GeminiRecordGenerator {
    client: GeminiClient,
}

impl GeminiRecordGenerator {
    /// Wrap a client.
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    /// The underlying client.
    pub fn client(&self) -> &GeminiClient {
        &self.client
    }
}

#[async_trait]
impl RecordGenerator for GeminiRecordGenerator {
    #[instrument(skip(self), fields(provider = "gemini"))]
    async fn generate(&self, identifier: &str) -> ArchivistResult<Record> {
        let text = self
            .client
            .generate_json_text(&dossier_prompt(identifier))
            .await?;
        let dossier = parse_dossier(&text, identifier)?;
        debug!(name = %dossier.name, "Parsed dossier text");

        let image_reference = if *self.client.config().generate_images() {
            self.client.generate_image(&image_prompt(&dossier)).await?
        } else {
            String::new()
        };

        dossier.into_record(image_reference)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}
