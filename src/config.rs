use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Deserialize, Clone)]
pub struct Config {
    /// OpenAI API key
    pub openai_api_key: String,

    /// OpenAI API base URL
    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,

    /// Chat completion model identifier
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Output token budget for a single completion
    #[serde(default = "default_openai_max_tokens")]
    pub openai_max_tokens: u32,

    /// Sampling temperature for a single completion
    #[serde(default = "default_openai_temperature")]
    pub openai_temperature: f32,

    /// Time budget for the completion call, in seconds
    #[serde(default = "default_openai_timeout_secs")]
    pub openai_timeout_secs: u64,

    /// iTunes Search/Lookup API base URL
    #[serde(default = "default_itunes_api_url")]
    pub itunes_api_url: String,

    /// Storefront country used for every store search
    #[serde(default = "default_store_country")]
    pub store_country: String,

    /// Time budget for a single store search or lookup, in seconds
    #[serde(default = "default_store_timeout_secs")]
    pub store_timeout_secs: u64,

    /// Time budget for an image reachability probe, in seconds
    #[serde(default = "default_image_timeout_secs")]
    pub image_timeout_secs: u64,

    /// Refresh and probe icon URLs after reconciliation
    #[serde(default)]
    pub verify_icons: bool,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_openai_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4".to_string()
}

fn default_openai_max_tokens() -> u32 {
    1000
}

fn default_openai_temperature() -> f32 {
    0.7
}

fn default_openai_timeout_secs() -> u64 {
    60
}

fn default_itunes_api_url() -> String {
    "https://itunes.apple.com".to_string()
}

fn default_store_country() -> String {
    "KR".to_string()
}

fn default_store_timeout_secs() -> u64 {
    5
}

fn default_image_timeout_secs() -> u64 {
    3
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn openai_timeout(&self) -> Duration {
        Duration::from_secs(self.openai_timeout_secs)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &"<redacted>")
            .field("openai_api_url", &self.openai_api_url)
            .field("openai_model", &self.openai_model)
            .field("openai_max_tokens", &self.openai_max_tokens)
            .field("openai_temperature", &self.openai_temperature)
            .field("openai_timeout_secs", &self.openai_timeout_secs)
            .field("itunes_api_url", &self.itunes_api_url)
            .field("store_country", &self.store_country)
            .field("store_timeout_secs", &self.store_timeout_secs)
            .field("image_timeout_secs", &self.image_timeout_secs)
            .field("verify_icons", &self.verify_icons)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}
