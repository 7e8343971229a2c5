//! Emoji mashups from a short phrase.
//!
//! A [`GenerationController`] takes raw user input, asks an
//! [`ImageGenerator`] (normally [`GeminiImageClient`]) for a flat emoji-style
//! image, and keeps the loading state up for at least
//! [`FLOOR_DURATION`](gate::FLOOR_DURATION) no matter how fast the service
//! answers. Front ends read [`DisplayState`] and the progress fraction.
//!
//! ```no_run
//! use emojimix::{GeminiConfig, GeminiImageClient, GenerationController};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = GeminiImageClient::new(GeminiConfig::from_env());
//!     let controller = GenerationController::new(Arc::new(client));
//!
//!     controller.trigger("robot cat");
//!     let state = controller.settled().await;
//!     println!("{:?}", state.name());
//! }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod gate;
pub mod gemini;
pub mod i18n;
pub mod logger;
pub mod models;
pub mod presentation;

pub use config::{AppConfig, GeminiConfig};
pub use controller::GenerationController;
pub use error::{EmojiMixError, Result};
pub use gate::{MinimumDurationGate, FLOOR_DURATION};
pub use gemini::{GeminiImageClient, ImageGenerator};
pub use i18n::{Locale, Settings, Theme};
pub use models::{
    DisplayState, ErrorCause, GenerationConfig, GenerationOutcome, GenerationRequest,
    ImagePayload, Prompt,
};
