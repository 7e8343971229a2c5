pub mod image_client;
pub mod traits;

pub use image_client::GeminiImageClient;
pub use traits::ImageGenerator;

/// Instruction wrapped around every user prompt.
pub fn emoji_instruction(prompt: &crate::models::Prompt) -> String {
    format!(
        "Create a single, high-quality vector art style emoji based on the concept: \"{}\". \
         The style must be identical to standard flat emojis: bold outlines, vibrant colors, isolated on a white background. \
         Do not add realistic shading. Make it cute and expressive. Just one single object/character.",
        prompt
    )
}
