use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Pt,
    En,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Every user-facing string of the front end, for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translations {
    pub app_title: &'static str,
    pub input_placeholder: &'static str,
    pub generate_button: &'static str,
    pub generating_button: &'static str,
    pub loading_message: &'static str,
    pub error_generic: &'static str,
    pub error_connection: &'static str,
    pub generated_by: &'static str,
    pub download_image: &'static str,
    pub footer: &'static str,
    pub settings_title: &'static str,
    pub language_label: &'static str,
    pub theme_label: &'static str,
    pub theme_light: &'static str,
    pub theme_dark: &'static str,
    pub back: &'static str,
}

const PT: Translations = Translations {
    app_title: "Google Emoji Mix",
    input_placeholder: "Ex: Gato robô, Pizza alienígena...",
    generate_button: "Gerar Emoji",
    generating_button: "Gerando...",
    loading_message: "Misturando emojis... (Aguarde 15s)",
    error_generic: "Não foi possível gerar o emoji. Tente novamente.",
    error_connection: "Ocorreu um erro ao conectar com o Google AI.",
    generated_by: "Gerado com Google Emoji Mix",
    download_image: "Baixar Imagem",
    footer: "Feito com Google Gemini API",
    settings_title: "Configurações",
    language_label: "Idioma",
    theme_label: "Tema",
    theme_light: "Claro",
    theme_dark: "Escuro",
    back: "Voltar",
};

const EN: Translations = Translations {
    app_title: "Google Emoji Mix",
    input_placeholder: "Ex: Robot cat, Alien pizza...",
    generate_button: "Generate Emoji",
    generating_button: "Generating...",
    loading_message: "Mixing emojis... (Wait 15s)",
    error_generic: "Could not generate emoji. Try again.",
    error_connection: "An error occurred connecting to Google AI.",
    generated_by: "Generated with Google Emoji Mix",
    download_image: "Download Image",
    footer: "Made with Google Gemini API",
    settings_title: "Settings",
    language_label: "Language",
    theme_label: "Theme",
    theme_light: "Light",
    theme_dark: "Dark",
    back: "Back",
};

impl Locale {
    pub fn translations(&self) -> &'static Translations {
        match self {
            Locale::Pt => &PT,
            Locale::En => &EN,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Pt => "pt",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pt" | "pt-br" => Ok(Locale::Pt),
            "en" | "en-us" => Ok(Locale::En),
            other => Err(format!("unknown locale: {}", other)),
        }
    }
}

impl Theme {
    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        let t = locale.translations();
        match self {
            Theme::Light => t.theme_light,
            Theme::Dark => t.theme_dark,
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

/// In-memory user preferences. Nothing is persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub locale: Locale,
    pub theme: Theme,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn translations(&self) -> &'static Translations {
        self.locale.translations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locale_is_portuguese() {
        let settings = Settings::new();
        assert_eq!(settings.locale, Locale::Pt);
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.translations().generate_button, "Gerar Emoji");
    }

    #[test]
    fn test_error_messages_are_distinct() {
        for locale in [Locale::Pt, Locale::En] {
            let t = locale.translations();
            assert_ne!(t.error_generic, t.error_connection);
        }
    }

    #[test]
    fn test_parse_locale_and_theme() {
        assert_eq!("EN".parse::<Locale>(), Ok(Locale::En));
        assert_eq!(" pt-br ".parse::<Locale>(), Ok(Locale::Pt));
        assert!("fr".parse::<Locale>().is_err());

        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_theme_label_follows_locale() {
        assert_eq!(Theme::Dark.label(Locale::Pt), "Escuro");
        assert_eq!(Theme::Dark.label(Locale::En), "Dark");
        assert!(Theme::Dark.is_dark());
    }
}
