#[derive(Debug, thiserror::Error)]
pub enum EmojiMixError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Markers Gemini puts in the body when it rejects a key with a 400.
const INVALID_KEY_MARKERS: [&str; 2] = ["API_KEY_INVALID", "API key not valid"];

impl EmojiMixError {
    /// Maps a non-success HTTP status and its body to an error.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = body.trim();
        let message = if message.is_empty() {
            "empty response body".to_string()
        } else {
            message.chars().take(500).collect()
        };

        match status {
            401 | 403 => EmojiMixError::Auth(message),
            400 if INVALID_KEY_MARKERS.iter().any(|m| body.contains(m)) => {
                EmojiMixError::Auth(message)
            }
            _ => EmojiMixError::Api { status, message },
        }
    }
}

pub type Result<T> = std::result::Result<T, EmojiMixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_auth() {
        let err = EmojiMixError::from_status(403, "API key not valid");
        assert!(matches!(err, EmojiMixError::Auth(ref m) if m == "API key not valid"));
        assert!(matches!(
            EmojiMixError::from_status(401, ""),
            EmojiMixError::Auth(_)
        ));
    }

    #[test]
    fn test_from_status_invalid_key_on_bad_request() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT","details":[{"reason":"API_KEY_INVALID"}]}}"#;
        assert!(matches!(
            EmojiMixError::from_status(400, body),
            EmojiMixError::Auth(_)
        ));
        assert!(matches!(
            EmojiMixError::from_status(400, r#"{"error":{"message":"Invalid JSON payload"}}"#),
            EmojiMixError::Api { status: 400, .. }
        ));
    }

    #[test]
    fn test_from_status_api() {
        let err = EmojiMixError::from_status(500, "  boom \n");
        assert_eq!(err.to_string(), "API error: 500 - boom");

        let err = EmojiMixError::from_status(503, "");
        assert_eq!(err.to_string(), "API error: 503 - empty response body");
    }

    #[test]
    fn test_from_status_truncates_long_bodies() {
        let body = "x".repeat(2000);
        match EmojiMixError::from_status(400, &body) {
            EmojiMixError::Api { message, .. } => assert_eq!(message.len(), 500),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
