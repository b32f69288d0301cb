use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the remote recommendation service
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Timeout of the startup health check, in milliseconds
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Timeout applied to remote search, browse and recommend calls
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Delay before local recommendations are returned when never connected
    #[serde(default = "default_fallback_delay_ms")]
    pub fallback_delay_ms: u64,

    /// Queries shorter than this are not searched
    #[serde(default = "default_min_search_chars")]
    pub min_search_chars: usize,

    /// Maximum number of entries taken from the remote browse list
    #[serde(default = "default_browse_limit")]
    pub browse_limit: usize,

    /// JSON catalog file; the built-in sample catalog is used when unset
    #[serde(default)]
    pub catalog_path: Option<String>,

    #[serde(default = "default_reprobe_max_attempts")]
    pub reprobe_max_attempts: u32,

    #[serde(default = "default_reprobe_base_delay_ms")]
    pub reprobe_base_delay_ms: u64,

    #[serde(default = "default_reprobe_max_delay_ms")]
    pub reprobe_max_delay_ms: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_backend_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_probe_timeout_ms() -> u64 {
    3000
}

fn default_request_timeout_ms() -> u64 {
    3000
}

fn default_fallback_delay_ms() -> u64 {
    1000
}

fn default_min_search_chars() -> usize {
    3
}

fn default_browse_limit() -> usize {
    50
}

fn default_reprobe_max_attempts() -> u32 {
    5
}

fn default_reprobe_base_delay_ms() -> u64 {
    500
}

fn default_reprobe_max_delay_ms() -> u64 {
    8000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            probe_timeout_ms: default_probe_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            fallback_delay_ms: default_fallback_delay_ms(),
            min_search_chars: default_min_search_chars(),
            browse_limit: default_browse_limit(),
            catalog_path: None,
            reprobe_max_attempts: default_reprobe_max_attempts(),
            reprobe_base_delay_ms: default_reprobe_base_delay_ms(),
            reprobe_max_delay_ms: default_reprobe_max_delay_ms(),
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

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
