use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default relay used when a direct fetch is blocked or fails.
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.allorigins.win/raw";

/// Relay fallback settings (optional `[relay]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// When false, only the direct attempt is made.
    pub enabled: bool,
    /// Relay endpoint; the target URL is appended as a query parameter.
    pub endpoint: String,
    /// Name of the query parameter carrying the encoded target URL.
    pub query_param: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_RELAY_ENDPOINT.to_string(),
            query_param: "url".to_string(),
        }
    }
}

/// HTTP transfer settings (optional `[http]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Connect timeout in seconds (None = libcurl default).
    pub connect_timeout_secs: Option<u64>,
    /// Whole-transfer timeout in seconds (None = wait indefinitely).
    pub timeout_secs: Option<u64>,
    /// Maximum redirects followed per request.
    pub max_redirections: u32,
    /// Optional User-Agent header.
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: None,
            timeout_secs: None,
            max_redirections: 10,
            user_agent: None,
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Global configuration loaded from `~/.config/replica/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplicaConfig {
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("replica")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ReplicaConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] but for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<ReplicaConfig> {
    if !path.exists() {
        let default_cfg = ReplicaConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: ReplicaConfig = toml::from_str(&data)?;
    Ok(cfg)
}
