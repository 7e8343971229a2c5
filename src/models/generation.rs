use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ImagePayload, Prompt};
use crate::error::{EmojiMixError, Result};

/// The only aspect ratio the service is asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
        }
    }
}

/// Recognized options of one remote call. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct GenerationConfig {
    pub prompt: Prompt,
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
}

impl GenerationConfig {
    pub fn new(prompt: Prompt) -> Self {
        Self {
            prompt,
            aspect_ratio: AspectRatio::Square,
        }
    }
}

/// One in-flight attempt, alive from an accepted trigger until the join resolves.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub id: Uuid,
    pub prompt: Prompt,
    pub started_at: DateTime<Utc>,
}

impl GenerationRequest {
    pub fn new(prompt: Prompt) -> Self {
        Self {
            id: Uuid::new_v4(),
            prompt,
            started_at: Utc::now(),
        }
    }

    pub fn config(&self) -> GenerationConfig {
        GenerationConfig::new(self.prompt.clone())
    }
}

#[derive(Debug)]
pub enum GenerationOutcome {
    Success(ImagePayload),
    /// The call succeeded but carried no usable image part.
    NoImage,
    Failure(EmojiMixError),
}

impl From<Result<Option<ImagePayload>>> for GenerationOutcome {
    fn from(result: Result<Option<ImagePayload>>) -> Self {
        match result {
            Ok(Some(payload)) => GenerationOutcome::Success(payload),
            Ok(None) => GenerationOutcome::NoImage,
            Err(e) => GenerationOutcome::Failure(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serializes_camel_case() {
        let config = GenerationConfig::new(Prompt::parse("robot cat").unwrap());
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "prompt": "robot cat", "aspectRatio": "1:1" })
        );
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        let err = serde_json::from_str::<GenerationConfig>(
            r#"{ "prompt": "cat", "aspectRatio": "1:1", "seed": 42 }"#,
        );
        assert!(err.is_err());

        let err = serde_json::from_str::<GenerationConfig>(r#"{ "prompt": "cat", "aspectRatio": "16:9" }"#);
        assert!(err.is_err());

        let config: GenerationConfig = serde_json::from_str(r#"{ "prompt": "cat" }"#).unwrap();
        assert_eq!(config.aspect_ratio, AspectRatio::Square);
    }

    #[test]
    fn test_outcome_from_result() {
        let payload = ImagePayload::new(vec![1], "image/png");
        assert!(matches!(
            GenerationOutcome::from(Ok(Some(payload))),
            GenerationOutcome::Success(_)
        ));
        assert!(matches!(
            GenerationOutcome::from(Ok(None)),
            GenerationOutcome::NoImage
        ));
        assert!(matches!(
            GenerationOutcome::from(Err(EmojiMixError::Auth("bad key".into()))),
            GenerationOutcome::Failure(EmojiMixError::Auth(_))
        ));
    }

    #[test]
    fn test_requests_get_distinct_ids() {
        let prompt = Prompt::parse("x").unwrap();
        let a = GenerationRequest::new(prompt.clone());
        let b = GenerationRequest::new(prompt);
        assert_ne!(a.id, b.id);
        assert_eq!(a.config().prompt.as_str(), "x");
    }
}
