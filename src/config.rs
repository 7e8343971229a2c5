use crate::i18n::{Locale, Settings, Theme};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini: GeminiConfig,
    pub settings: Settings,
    pub output_dir: PathBuf,
    pub tick_interval: Option<Duration>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("API_KEY")
            .or_else(|_| env::var("GEMINI_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        GeminiConfig {
            api_key,
            model,
            base_url,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            gemini: GeminiConfig::default(),
            settings: Settings::default(),
            output_dir: PathBuf::from("."),
            tick_interval: None,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the whole configuration from the environment. Unparseable values
    /// are logged and replaced by their defaults.
    pub fn from_env() -> Self {
        let locale = match env::var("EMOJIMIX_LOCALE") {
            Ok(raw) => raw.parse::<Locale>().unwrap_or_else(|e| {
                log::warn!("{}, falling back to {}", e, Locale::default());
                Locale::default()
            }),
            Err(_) => Locale::default(),
        };
        let theme = match env::var("EMOJIMIX_THEME") {
            Ok(raw) => raw.parse::<Theme>().unwrap_or_else(|e| {
                log::warn!("{}, falling back to light", e);
                Theme::default()
            }),
            Err(_) => Theme::default(),
        };
        let output_dir = env::var("EMOJIMIX_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        let tick_interval = env::var("EMOJIMIX_TICK_MS")
            .ok()
            .and_then(|ms| ms.parse::<u64>().ok())
            .map(Duration::from_millis);

        AppConfig {
            gemini: GeminiConfig::from_env(),
            settings: Settings::new().with_locale(locale).with_theme(theme),
            output_dir,
            tick_interval,
        }
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = config;
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_tick_interval(mut self, tick: Duration) -> Self {
        self.tick_interval = Some(tick);
        self
    }

    /// Logs configuration problems. A missing credential does not stop the
    /// application; requests will fail at the remote service instead.
    pub fn check(&self) -> bool {
        if self.gemini.has_credentials() {
            true
        } else {
            log::error!(
                "Configuration error: API_KEY environment variable is missing, image requests will be rejected"
            );
            false
        }
    }
}
