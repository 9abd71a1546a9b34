//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and `FITWELL_*` environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::flows::OAuthProvider;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub oauth: OAuthConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub serve: ServeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// FitWell backend the clients talk to
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Host of the OAuth code exchange, when it differs from `base_url`
    #[serde(default)]
    pub oauth_base_url: Option<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl ApiConfig {
    /// Base URL of the OAuth exchange endpoint
    pub fn oauth_base(&self) -> &str {
        self.oauth_base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(&self.base_url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            oauth_base_url: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// OAuth provider client settings
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthConfig {
    #[serde(default)]
    pub client_id: String,

    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,

    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,
}

fn default_redirect_uri() -> String {
    OAuthProvider::default().redirect_uri
}

fn default_authorize_url() -> String {
    OAuthProvider::default().authorize_url
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            redirect_uri: default_redirect_uri(),
            authorize_url: default_authorize_url(),
        }
    }
}

impl OAuthConfig {
    pub fn provider(&self) -> OAuthProvider {
        OAuthProvider {
            authorize_url: self.authorize_url.clone(),
            client_id: self.client_id.clone(),
            redirect_uri: self.redirect_uri.clone(),
        }
    }
}

/// Where the CLI keeps its session
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

fn default_db_path() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("fitwell").join("session.db").to_string_lossy().to_string())
        .unwrap_or_else(|| "./fitwell_data/session.db".to_string())
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

/// Static host for the web UI
#[derive(Debug, Clone, Deserialize)]
pub struct ServeConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Built UI directory (the `dist/` output of the UI build)
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8084
}

fn default_static_dir() -> String {
    "./fitwell-ui/dist".to_string()
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            cors_origins: vec![
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load an explicit file, or search the default locations
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        for path in Self::default_paths() {
            if path.exists() {
                match Self::load_with_env(&path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Config file locations, in search order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("fitwell").join("config.toml")),
            Some(PathBuf::from("/etc/fitwell/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(url) = var("FITWELL_API_URL") {
            self.api.base_url = url;
        }
        if let Some(url) = var("FITWELL_OAUTH_API_URL") {
            self.api.oauth_base_url = Some(url);
        }
        if let Some(secs) = var("FITWELL_REQUEST_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse() {
                self.api.request_timeout_secs = s;
            }
        }

        // OAuth overrides
        if let Some(id) = var("FITWELL_OAUTH_CLIENT_ID") {
            self.oauth.client_id = id;
        }
        if let Some(uri) = var("FITWELL_OAUTH_REDIRECT_URI") {
            self.oauth.redirect_uri = uri;
        }

        // Session overrides
        if let Some(path) = var("FITWELL_SESSION_DB") {
            self.session.db_path = path;
        }

        // Serve overrides
        if let Some(host) = var("FITWELL_SERVE_HOST") {
            self.serve.host = host;
        }
        if let Some(port) = var("FITWELL_SERVE_PORT") {
            if let Ok(p) = port.parse() {
                self.serve.port = p;
            }
        }
        if let Some(dir) = var("FITWELL_STATIC_DIR") {
            self.serve.static_dir = dir;
        }

        // Logging overrides
        if let Some(level) = var("FITWELL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("FITWELL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# FitWell Configuration
#
# Environment variables override these settings:
# - FITWELL_API_URL
# - FITWELL_OAUTH_API_URL
# - FITWELL_REQUEST_TIMEOUT_SECS
# - FITWELL_OAUTH_CLIENT_ID
# - FITWELL_OAUTH_REDIRECT_URI
# - FITWELL_SESSION_DB
# - FITWELL_SERVE_HOST
# - FITWELL_SERVE_PORT
# - FITWELL_STATIC_DIR
# - FITWELL_LOG_LEVEL
# - FITWELL_LOG_FORMAT

[api]
# FitWell backend
base_url = "http://localhost:8080"

# Host of the OAuth code exchange (defaults to base_url)
# oauth_base_url = "https://auth.example.com"

# Request timeout in seconds
request_timeout_secs = 30

[oauth]
# Kakao REST API key
client_id = ""

# Must match the redirect URI registered with the provider
redirect_uri = "http://localhost:8084/oauth/callback"

authorize_url = "https://kauth.kakao.com/oauth/authorize"

[session]
# SQLite file holding the CLI session (default: <data dir>/fitwell/session.db)
# db_path = "/home/me/.local/share/fitwell/session.db"

[serve]
# Web UI host
host = "0.0.0.0"
port = 8084

# Built UI directory
static_dir = "./fitwell-ui/dist"

# Allowed CORS origins
cors_origins = ["http://localhost:8080", "http://127.0.0.1:8080"]

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_generated_default_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();

        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.oauth_base(), "http://localhost:8080");
        assert_eq!(config.serve.port, 8084);
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.oauth.authorize_url, "https://kauth.kakao.com/oauth/authorize");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::parse("[api]\nbase_url = \"https://api.fitwell.test\"\n").unwrap();

        assert_eq!(config.api.base_url, "https://api.fitwell.test");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.serve.host, "0.0.0.0");
    }

    #[test]
    fn test_oauth_base_override() {
        let mut api = ApiConfig::default();
        api.oauth_base_url = Some("https://auth.test".into());
        assert_eq!(api.oauth_base(), "https://auth.test");

        api.oauth_base_url = Some("  ".into());
        assert_eq!(api.oauth_base(), api.base_url);
    }

    #[test]
    fn test_load_reports_path_on_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = 1").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { path: p, .. } if p == path));

        let missing = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[session]\ndb_path = \"/tmp/s.db\"\n[oauth]\nclient_id = \"kakao-key\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.session.db_path, "/tmp/s.db");
        assert_eq!(config.oauth.provider().client_id, "kakao-key");
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("FITWELL_API_URL", "https://api.prod"),
            ("FITWELL_SERVE_PORT", "9000"),
            ("FITWELL_REQUEST_TIMEOUT_SECS", "not-a-number"),
            ("FITWELL_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "https://api.prod");
        assert_eq!(config.serve.port, 9000);
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.logging.format, "json");
    }
}
