use super::{ImagePayload, Prompt};
use crate::i18n::Locale;

/// The two user-facing failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCause {
    /// The service answered without an image.
    Generic,
    /// The call itself failed.
    Connection,
}

impl ErrorCause {
    pub fn message(&self, locale: Locale) -> &'static str {
        let t = locale.translations();
        match self {
            ErrorCause::Generic => t.error_generic,
            ErrorCause::Connection => t.error_connection,
        }
    }
}

/// What the front end shows. Written only by the generation controller.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplayState {
    #[default]
    Idle,
    Loading {
        progress: f64,
    },
    Result {
        image: ImagePayload,
        prompt: Prompt,
    },
    Error(ErrorCause),
}

impl DisplayState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DisplayState::Loading { .. })
    }

    pub fn progress(&self) -> f64 {
        match self {
            DisplayState::Idle => 0.0,
            DisplayState::Loading { progress } => *progress,
            DisplayState::Result { .. } | DisplayState::Error(_) => 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DisplayState::Idle => "idle",
            DisplayState::Loading { .. } => "loading",
            DisplayState::Result { .. } => "result",
            DisplayState::Error(_) => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_by_state() {
        assert_eq!(DisplayState::Idle.progress(), 0.0);
        assert_eq!(DisplayState::Loading { progress: 0.4 }.progress(), 0.4);
        assert_eq!(DisplayState::Error(ErrorCause::Generic).progress(), 1.0);
        assert!(DisplayState::Loading { progress: 0.0 }.is_loading());
        assert!(!DisplayState::default().is_loading());
    }

    #[test]
    fn test_error_cause_messages() {
        assert_eq!(
            ErrorCause::Generic.message(Locale::En),
            "Could not generate emoji. Try again."
        );
        assert_eq!(
            ErrorCause::Connection.message(Locale::Pt),
            "Ocorreu um erro ao conectar com o Google AI."
        );
    }
}
