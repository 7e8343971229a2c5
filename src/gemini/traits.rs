use crate::{
    error::Result,
    models::{ImagePayload, Prompt},
};
use async_trait::async_trait;

/// Anything that can turn a prompt into an image.
///
/// `Ok(None)` means the call succeeded but no image came back. Transport and
/// service failures are returned as errors, never swallowed.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &Prompt) -> Result<Option<ImagePayload>>;

    fn name(&self) -> &str;
}
