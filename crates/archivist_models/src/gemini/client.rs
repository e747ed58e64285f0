//! HTTP client for the Gemini REST API.

use crate::gemini::{GenerateContentRequest, GenerateContentResponse, PredictRequest, PredictResponse};
use archivist_error::{ArchivistResult, GenerationError, GenerationErrorKind, HttpError};
use archivist_rate_limit::{GeminiConfig, RequestLimiter};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, warn};

/// Authenticated Gemini client.
///
/// Every request first takes a slot from the client's [`RequestLimiter`], so
/// clones of one client share a single per-minute quota.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    config: GeminiConfig,
    limiter: RequestLimiter,
}

impl GeminiClient {
    /// Creates a client using the `GEMINI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API key is not set in the environment
    /// - The HTTP client cannot be initialized
    #[instrument(skip_all)]
    pub fn new(config: GeminiConfig) -> ArchivistResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::MissingApiKey))?;
        Self::with_api_key(api_key, config)
    }

    /// Creates a client with a specific API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip_all)]
    pub fn with_api_key(api_key: impl Into<String>, config: GeminiConfig) -> ArchivistResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::ClientCreation(e.to_string()))
            })?;
        let limiter = RequestLimiter::new(*config.rpm());
        debug!(model = %config.model(), rpm = ?config.rpm(), "Created Gemini client");

        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
            limiter,
        })
    }

    /// Service settings this client was built with.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Run a single-turn prompt that should answer with JSON, returning the
    /// raw response text.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, a blocked
    /// prompt, or a response with no text.
    #[instrument(skip(self, prompt), fields(model = %self.config.model()))]
    pub async fn generate_json_text(&self, prompt: &str) -> ArchivistResult<String> {
        let body = GenerateContentRequest::json_prompt(prompt);
        let response: GenerateContentResponse =
            self.post(self.config.model(), "generateContent", &body).await?;

        if let Some(reason) = response.block_reason() {
            warn!(reason, "Gemini blocked the request");
            return Err(GenerationError::new(GenerationErrorKind::Blocked(reason.to_string())).into());
        }

        response.text().ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::EmptyResponse(
                self.config.model().to_string(),
            ))
            .into()
        })
    }

    /// Render one image for `prompt` and return it as a `data:` URL.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// response without image bytes.
    #[instrument(skip(self, prompt), fields(model = %self.config.image_model()))]
    pub async fn generate_image(&self, prompt: &str) -> ArchivistResult<String> {
        let body = PredictRequest::single_image(prompt);
        let response: PredictResponse =
            self.post(self.config.image_model(), "predict", &body).await?;

        response.first_image_url().ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::EmptyResponse(
                self.config.image_model().to_string(),
            ))
            .into()
        })
    }

    async fn post<B, R>(&self, model: &str, method: &str, body: &B) -> ArchivistResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let target = format!("{}:{}", model, method);
        let url = format!(
            "{}/models/{}",
            self.config.endpoint().trim_end_matches('/'),
            target
        );
        self.limiter.acquire().await;
        debug!(url = %url, "Sending Gemini API request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| HttpError::new(&target, e.to_string()))?;

        if !response.status().is_success() {
            let status_code = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            warn!(status_code, "Gemini API returned an error status");
            return Err(GenerationError::new(GenerationErrorKind::HttpStatus {
                status_code,
                message,
            })
            .into());
        }

        response.json::<R>().await.map_err(|e| {
            GenerationError::new(GenerationErrorKind::MalformedResponse(format!(
                "Failed to parse response: {}",
                e
            )))
            .into()
        })
    }
}
