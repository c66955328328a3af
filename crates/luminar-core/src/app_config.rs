use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Path to the inventory table. `None` means the service starts with an
    /// empty dataset (degraded but usable).
    pub inventory_path: Option<PathBuf>,
    pub geocoder_base_url: String,
    /// Base URL of the illustration service. `None` falls back to locally
    /// synthesized placeholder images.
    pub image_base_url: Option<String>,
    pub http_timeout_secs: u64,
    pub user_agent: String,
}
