//! Wire types for the Gemini `generateContent` and Imagen `predict` endpoints.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Content block in a request or a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Content {
    /// Author role ("user" or "model")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    /// Ordered parts
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    /// A single-part user message.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

/// One part of a content block. Only text parts are used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Part {
    /// Text payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

/// Body of a `models/{model}:generateContent` call.
///
/// # Examples
///
/// ```
/// use archivist_models::GenerateContentRequest;
///
/// let body = serde_json::to_value(GenerateContentRequest::json_prompt("hi")).unwrap();
/// assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
/// assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A single-turn prompt asking for a JSON response.
    pub fn json_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user_text(prompt)],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
            }),
        }
    }
}

/// Why the prompt itself was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Block reason (e.g. "SAFETY")
    #[serde(default)]
    block_reason: Option<String>,
}

/// One generated candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content, absent when the candidate was filtered
    #[serde(default)]
    content: Option<Content>,
    /// Finish reason (e.g. "STOP", "SAFETY")
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Response of a `generateContent` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidates, usually one
    #[serde(default)]
    candidates: Vec<Candidate>,
    /// Prompt-level feedback
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

const BLOCKING_FINISH_REASONS: &[&str] = &["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII"];

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Reason the prompt or the first candidate was blocked, if it was.
    pub fn block_reason(&self) -> Option<&str> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Some(reason);
        }
        self.candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
            .filter(|reason| BLOCKING_FINISH_REASONS.contains(reason))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PredictInstance {
    prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
    aspect_ratio: String,
}

/// Body of an Imagen `models/{model}:predict` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    instances: Vec<PredictInstance>,
    parameters: PredictParameters,
}

impl PredictRequest {
    /// Request a single square image.
    pub fn single_image(prompt: impl Into<String>) -> Self {
        Self {
            instances: vec![PredictInstance {
                prompt: prompt.into(),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: "1:1".to_string(),
            },
        }
    }
}

/// One generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Base64 image bytes
    #[serde(default)]
    bytes_base64_encoded: Option<String>,
    /// Image MIME type, PNG when absent
    #[serde(default)]
    mime_type: Option<String>,
}

impl Prediction {
    /// The image as a `data:` URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use archivist_models::PredictResponse;
    ///
    /// let response: PredictResponse =
    ///     serde_json::from_str(r#"{"predictions":[{"bytesBase64Encoded":"AAAA"}]}"#).unwrap();
    /// assert_eq!(
    ///     response.first_image_url().as_deref(),
    ///     Some("data:image/png;base64,AAAA")
    /// );
    /// ```
    pub fn data_url(&self) -> Option<String> {
        let bytes = self.bytes_base64_encoded.as_deref()?;
        if bytes.is_empty() {
            return None;
        }
        let mime = self.mime_type.as_deref().unwrap_or("image/png");
        Some(format!("data:{};base64,{}", mime, bytes))
    }
}

/// Response of an Imagen `predict` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PredictResponse {
    /// Generated images
    #[serde(default)]
    predictions: Vec<Prediction>,
}

impl PredictResponse {
    /// Data URL of the first image that carries bytes.
    pub fn first_image_url(&self) -> Option<String> {
        self.predictions.iter().find_map(Prediction::data_url)
    }
}
