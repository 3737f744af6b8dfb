use std::env;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: Option<u16>,
    pub gemini: Option<GeminiConfig>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            model: None,
            base_url: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("API_KEY").ok();
        let model = env::var("MODEL_NAME").ok();
        let base_url = env::var("GEMINI_BASE_URL").ok();

        GeminiConfig {
            api_key,
            model,
            base_url,
        }
    }

    pub fn with_credentials(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: None,
            gemini: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let port = env::var("PORT").ok().and_then(|port| port.parse().ok());

        Config {
            port,
            gemini: Some(GeminiConfig::from_env()),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = Some(config);
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.gemini
            .as_ref()
            .and_then(|g| g.api_key.as_deref())
            .map_or(false, |key| !key.is_empty())
    }
}
