//! Terminal rendering of the display state.

use crate::i18n::{Settings, Theme};
use crate::models::DisplayState;
use colored::*;

pub const BAR_WIDTH: usize = 40;

/// A fixed-width text bar, e.g. `[██████░░░░]  60%`.
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (fraction * width as f64).round() as usize;
    format!(
        "[{}{}] {:>3}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        (fraction * 100.0).floor() as u32
    )
}

fn accent(text: &str, theme: Theme) -> ColoredString {
    match theme {
        Theme::Light => text.blue(),
        Theme::Dark => text.bright_cyan(),
    }
}

fn muted(text: &str, theme: Theme) -> ColoredString {
    match theme {
        Theme::Light => text.bright_black(),
        Theme::Dark => text.white(),
    }
}

fn failure(text: &str, theme: Theme) -> ColoredString {
    match theme {
        Theme::Light => text.red(),
        Theme::Dark => text.bright_red(),
    }
}

/// Single status line for `state`, without a trailing newline.
pub fn render_state(state: &DisplayState, settings: &Settings) -> String {
    let t = settings.translations();
    let theme = settings.theme;

    match state {
        DisplayState::Idle => muted(t.input_placeholder, theme).to_string(),
        DisplayState::Loading { progress } => format!(
            "{} {}",
            accent(&progress_bar(*progress, BAR_WIDTH), theme),
            muted(t.loading_message, theme)
        ),
        DisplayState::Result { image, prompt } => format!(
            "{} {} ({} bytes, {})",
            accent(prompt.as_str(), theme).bold(),
            muted(&format!("· {}", t.generated_by), theme),
            image.size(),
            image.mime_type
        ),
        DisplayState::Error(cause) => failure(cause.message(settings.locale), theme).to_string(),
    }
}

pub fn render_header(settings: &Settings) -> String {
    let t = settings.translations();
    format!(
        "{}\n{}",
        accent(t.app_title, settings.theme).bold(),
        muted(t.footer, settings.theme)
    )
}

pub fn render_settings(settings: &Settings) -> String {
    let t = settings.translations();
    format!(
        "{}\n  {}: {}\n  {}: {}",
        accent(t.settings_title, settings.theme).bold(),
        t.language_label,
        settings.locale,
        t.theme_label,
        settings.theme.label(settings.locale)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use crate::models::{ErrorCause, ImagePayload, Prompt};

    fn plain(settings: Settings) -> Settings {
        colored::control::set_override(false);
        settings
    }

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0.0, 4), "[░░░░]   0%");
        assert_eq!(progress_bar(0.5, 4), "[██░░]  50%");
        assert_eq!(progress_bar(1.0, 4), "[████] 100%");
        assert_eq!(progress_bar(3.0, 4), "[████] 100%");
        assert_eq!(progress_bar(f64::NAN, 4), "[░░░░]   0%");
    }

    #[test]
    fn test_render_error_uses_locale() {
        let settings = plain(Settings::new().with_locale(Locale::En));
        let line = render_state(&DisplayState::Error(ErrorCause::Connection), &settings);
        assert_eq!(line, "An error occurred connecting to Google AI.");
    }

    #[test]
    fn test_render_result_mentions_prompt() {
        let settings = plain(Settings::new().with_theme(Theme::Dark));
        let state = DisplayState::Result {
            image: ImagePayload::new(vec![0; 10], "image/png"),
            prompt: Prompt::parse("robot cat").unwrap(),
        };
        let line = render_state(&state, &settings);
        assert!(line.contains("robot cat"));
        assert!(line.contains("Gerado com Google Emoji Mix"));
        assert!(line.contains("10 bytes"));
    }

    #[test]
    fn test_render_settings_lists_choices() {
        let settings = plain(Settings::new().with_locale(Locale::En).with_theme(Theme::Dark));
        let text = render_settings(&settings);
        assert!(text.contains("Language: en"));
        assert!(text.contains("Theme: Dark"));
    }
}
