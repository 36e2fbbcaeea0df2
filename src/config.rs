use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// SerpAPI key used for live shopping search (may be overridden per request)
    #[serde(default)]
    pub serpapi_api_key: Option<String>,

    /// SerpAPI search endpoint
    #[serde(default = "default_serpapi_url")]
    pub serpapi_url: String,

    /// Timeout for every outbound request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Seed for query construction; the same seed yields the same queries
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,

    /// Environment label reported by the meta endpoint
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_serpapi_url() -> String {
    "https://serpapi.com/search.json".to_string()
}

fn default_request_timeout_secs() -> u64 {
    20
}

fn default_random_seed() -> u64 {
    42
}

fn default_environment() -> String {
    "dev".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serpapi_api_key: None,
            serpapi_url: default_serpapi_url(),
            request_timeout_secs: default_request_timeout_secs(),
            random_seed: default_random_seed(),
            environment: default_environment(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Configured SerpAPI key, ignoring blank values
    pub fn serpapi_key(&self) -> Option<&str> {
        self.serpapi_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
