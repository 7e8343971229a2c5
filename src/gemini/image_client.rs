use crate::{
    config::GeminiConfig,
    error::{EmojiMixError, Result},
    models::{AspectRatio, GenerationConfig, ImagePayload, Prompt},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{emoji_instruction, ImageGenerator};

/// Gemini `generateContent` client for single emoji images.
#[derive(Clone)]
pub struct GeminiImageClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiImageClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn generate_impl(&self, config: &GenerationConfig) -> Result<Option<ImagePayload>> {
        let body = GeminiRequest::from_config(config);

        log::info!("Generating emoji with model: {}", self.config.model);
        log::debug!("Prompt: {}", config.prompt);

        let mut request = self.client.post(self.endpoint()).json(&body);
        // No key: send anyway and let the service reject the call.
        if let Some(api_key) = &self.config.api_key {
            request = request.header("x-goog-api-key", api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(EmojiMixError::from_status(status.as_u16(), &text));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&text)
            .map_err(|e| EmojiMixError::MalformedResponse(e.to_string()))?;

        gemini_response.into_image()
    }
}

#[async_trait]
impl ImageGenerator for GeminiImageClient {
    async fn generate(&self, prompt: &Prompt) -> Result<Option<ImagePayload>> {
        self.generate_impl(&GenerationConfig::new(prompt.clone()))
            .await
    }

    fn name(&self) -> &str {
        "Gemini (Google)"
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiTextPart>,
}

#[derive(Debug, Serialize)]
struct GeminiTextPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    image_config: GeminiImageConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiImageConfig {
    aspect_ratio: AspectRatio,
}

impl GeminiRequest {
    fn from_config(config: &GenerationConfig) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiTextPart {
                    text: emoji_instruction(&config.prompt),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                image_config: GeminiImageConfig {
                    aspect_ratio: config.aspect_ratio,
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponsePart {
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    data: Option<String>,
}

impl GeminiResponse {
    /// First inline image of the first candidate, if there is one.
    fn into_image(self) -> Result<Option<ImagePayload>> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            log::warn!("Prompt blocked by Gemini: {}", reason);
            return Ok(None);
        }

        let Some(candidate) = self.candidates.into_iter().next() else {
            log::warn!("Gemini response contained no candidates");
            return Ok(None);
        };

        let finish_reason = candidate.finish_reason;
        let inline = candidate
            .content
            .into_iter()
            .flat_map(|content| content.parts)
            .filter_map(|part| part.inline_data)
            .find(|inline| inline.data.as_deref().map_or(false, |d| !d.is_empty()));

        match inline {
            Some(InlineData {
                mime_type,
                data: Some(data),
            }) => ImagePayload::from_base64(&data, mime_type.as_deref()).map(Some),
            _ => {
                log::warn!(
                    "Gemini response had no image part (finish reason: {})",
                    finish_reason.as_deref().unwrap_or("unknown")
                );
                Ok(None)
            }
        }
    }
}
