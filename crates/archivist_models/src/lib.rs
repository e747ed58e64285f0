//! Generation service integrations for Archivist.
//!
//! The only provider is Google Gemini, reached over its REST API:
//! - [`GeminiRecordGenerator`] turns an SCP designation into a [`Record`](archivist_core::Record)
//! - [`GeminiMappingAdvisor`] proposes a field-to-column mapping for a table
//!
//! Both share a [`GeminiClient`], which owns the HTTP client, the API key and
//! a per-minute request limiter.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extraction;
mod gemini;

pub use extraction::{extract_json, parse_json};
pub use gemini::{
    dossier_prompt, mapping_prompt, parse_dossier, parse_mapping_suggestion, Candidate, Content,
    DossierDto, GeminiClient, GeminiMappingAdvisor, GeminiRecordGenerator,
    GenerateContentRequest, GenerateContentResponse, Part, PredictRequest, PredictResponse,
    Prediction, PromptFeedback,
};
