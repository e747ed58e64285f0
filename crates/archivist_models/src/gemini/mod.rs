//! Google Gemini REST integration.

mod advisor;
mod client;
mod dto;
mod generator;

pub use advisor::{mapping_prompt, parse_mapping_suggestion, GeminiMappingAdvisor};
pub use client::GeminiClient;
pub use dto::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part, PredictRequest,
    PredictResponse, Prediction, PromptFeedback,
};
pub use generator::{dossier_prompt, parse_dossier, DossierDto, GeminiRecordGenerator};
