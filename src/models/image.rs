use crate::error::{EmojiMixError, Result};
use base64::Engine;
use std::path::{Path, PathBuf};

use super::Prompt;

pub const DEFAULT_MIME_TYPE: &str = "image/png";
const DOWNLOAD_PREFIX: &str = "emoji-mix-";
const DOWNLOAD_EXTENSION: &str = "png";

fn is_file_name_safe(c: char) -> bool {
    !c.is_control() && !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
}

/// Decoded image bytes plus the media type the service declared for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl ImagePayload {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }

    /// Decodes base64 text as returned in an inline image part. A missing or
    /// blank media type becomes `image/png`.
    pub fn from_base64(encoded: &str, mime_type: Option<&str>) -> Result<Self> {
        let data = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| EmojiMixError::MalformedResponse(format!("invalid image data: {}", e)))?;

        let mime_type = mime_type
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MIME_TYPE);

        Ok(Self::new(data, mime_type))
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    /// `emoji-mix-<prompt>.png`. Runs of whitespace and of characters that
    /// are not allowed in file names (path separators included) become one `-`,
    /// so the result is always a single path component.
    pub fn download_file_name(prompt: &Prompt) -> String {
        let cleaned: String = prompt
            .as_str()
            .chars()
            .map(|c| if is_file_name_safe(c) { c } else { ' ' })
            .collect();
        let stem = cleaned.split_whitespace().collect::<Vec<_>>().join("-");
        format!("{}{}.{}", DOWNLOAD_PREFIX, stem, DOWNLOAD_EXTENSION)
    }

    pub fn save(&self, dir: impl AsRef<Path>, prompt: &Prompt) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(Self::download_file_name(prompt));
        std::fs::write(&path, &self.data)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base64_defaults_mime_type() {
        let payload = ImagePayload::from_base64("AQID", None).unwrap();
        assert_eq!(payload.data, vec![1, 2, 3]);
        assert_eq!(payload.mime_type, "image/png");

        let payload = ImagePayload::from_base64("AQID", Some("  ")).unwrap();
        assert_eq!(payload.mime_type, "image/png");

        let payload = ImagePayload::from_base64("AQID", Some("image/webp")).unwrap();
        assert_eq!(payload.mime_type, "image/webp");
    }

    #[test]
    fn test_from_base64_rejects_garbage() {
        let err = ImagePayload::from_base64("not base64!!", None).unwrap_err();
        assert!(matches!(err, EmojiMixError::MalformedResponse(_)));
    }

    #[test]
    fn test_data_uri() {
        let payload = ImagePayload::new(vec![1, 2, 3], "image/jpeg");
        assert_eq!(payload.to_data_uri(), "data:image/jpeg;base64,AQID");
    }

    #[test]
    fn test_download_file_name() {
        let prompt = Prompt::parse("robot   cat\tin space").unwrap();
        assert_eq!(
            ImagePayload::download_file_name(&prompt),
            "emoji-mix-robot-cat-in-space.png"
        );
    }

    #[test]
    fn test_download_file_name_strips_separators() {
        let cases = [
            ("cat/dog mashup", "emoji-mix-cat-dog-mashup.png"),
            ("a\\b: c", "emoji-mix-a-b-c.png"),
            ("../../etc/passwd", "emoji-mix-..-..-etc-passwd.png"),
            ("tab\u{0}null\u{7}bell", "emoji-mix-tab-null-bell.png"),
            ("what? <yes>|*no*", "emoji-mix-what-yes-no.png"),
        ];
        for (raw, expected) in cases {
            let name = ImagePayload::download_file_name(&Prompt::parse(raw).unwrap());
            assert_eq!(name, expected, "{raw:?}");
            assert!(!name.contains('/') && !name.contains('\\'));
        }
    }

    #[test]
    fn test_save_prompt_with_slash() {
        let dir = std::env::temp_dir().join(format!("emojimix-{}", uuid::Uuid::new_v4()));
        let prompt = Prompt::parse("cat/dog mashup").unwrap();
        let payload = ImagePayload::new(vec![1, 2], "image/png");

        let path = payload.save(&dir, &prompt).unwrap();
        assert_eq!(path, dir.join("emoji-mix-cat-dog-mashup.png"));
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_writes_bytes() {
        let dir = std::env::temp_dir().join(format!("emojimix-{}", uuid::Uuid::new_v4()));
        let prompt = Prompt::parse("alien pizza").unwrap();
        let payload = ImagePayload::new(vec![9, 8, 7], "image/png");

        let path = payload.save(&dir, &prompt).unwrap();
        assert!(path.ends_with("emoji-mix-alien-pizza.png"));
        assert_eq!(std::fs::read(&path).unwrap(), vec![9, 8, 7]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
