//! Application configuration.
//!
//! An embedded TOML document provides the defaults; build-time variables
//! `ACFI_API_URL`, `ACFI_FALLBACK_MODE` and `ACFI_LOG_LEVEL` override it.
//! Loaded once in `App` and passed down, never read from globals.

use serde::Deserialize;
use thiserror::Error;

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
# empty: derived from the page location
base_url = ""
chat_top_k = 50
page_size = 100
recent_chats_limit = 10
activity_days = 7

[ui]
fallback_mode = "live"

[logging]
level = "debug"
"#;

const BACKEND_PORT: u16 = 8000;
const API_PREFIX: &str = "/api/v1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuração inválida: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("valor inválido para {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_top_k")]
    pub chat_top_k: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_recent_chats")]
    pub recent_chats_limit: u32,
    #[serde(default = "default_activity_days")]
    pub activity_days: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            chat_top_k: default_top_k(),
            page_size: default_page_size(),
            recent_chats_limit: default_recent_chats(),
            activity_days: default_activity_days(),
        }
    }
}

fn default_top_k() -> u32 {
    contracts::domain::a003_chat_message::DEFAULT_TOP_K
}

fn default_page_size() -> u32 {
    100
}

fn default_recent_chats() -> u32 {
    10
}

fn default_activity_days() -> u32 {
    7
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FallbackMode {
    /// Errors surface as-is
    #[default]
    Live,
    /// Failed reads are replaced with local placeholder data
    Fixtures,
}

impl FallbackMode {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(FallbackMode::Live),
            "fixtures" | "mock" | "offline" => Ok(FallbackMode::Fixtures),
            _ => Err(ConfigError::InvalidValue {
                key: "ui.fallback_mode",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct UiConfig {
    #[serde(default)]
    pub fallback_mode: FallbackMode,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_level() }
    }
}

fn default_level() -> String {
    "debug".to_string()
}

/// Build-time overrides, `None` when the variable was not set
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvOverrides<'a> {
    pub api_url: Option<&'a str>,
    pub fallback_mode: Option<&'a str>,
    pub log_level: Option<&'a str>,
}

impl EnvOverrides<'static> {
    pub fn from_build_env() -> Self {
        Self {
            api_url: option_env!("ACFI_API_URL"),
            fallback_mode: option_env!("ACFI_FALLBACK_MODE"),
            log_level: option_env!("ACFI_LOG_LEVEL"),
        }
    }
}

impl AppConfig {
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn apply(mut self, env: EnvOverrides<'_>) -> Result<Self, ConfigError> {
        if let Some(url) = env.api_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        if let Some(mode) = env.fallback_mode {
            self.ui.fallback_mode = FallbackMode::parse(mode)?;
        }
        if let Some(level) = env.log_level {
            self.logging.level = level.trim().to_string();
        }
        // validated here so a typo fails at start-up
        self.log_level()?;
        Ok(self)
    }

    pub fn log_level(&self) -> Result<log::Level, ConfigError> {
        self.logging
            .level
            .parse::<log::Level>()
            .map_err(|_| ConfigError::InvalidValue {
                key: "logging.level",
                value: self.logging.level.clone(),
            })
    }

    /// Configured base URL, else derived from `location`
    pub fn base_url_or(&self, location: impl FnOnce() -> Option<(String, String)>) -> String {
        if !self.api.base_url.is_empty() {
            return self.api.base_url.trim_end_matches('/').to_string();
        }
        let (protocol, hostname) =
            location().unwrap_or_else(|| ("http:".to_string(), "localhost".to_string()));
        derive_base_url(&protocol, &hostname)
    }

    pub fn base_url(&self) -> String {
        self.base_url_or(browser_location)
    }
}

/// Load the embedded defaults plus build-time overrides
pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::parse(DEFAULT_CONFIG)?.apply(EnvOverrides::from_build_env())
}

/// `{protocol}//{hostname}:8000/api/v1`
pub fn derive_base_url(protocol: &str, hostname: &str) -> String {
    format!("{}//{}:{}{}", protocol, hostname, BACKEND_PORT, API_PREFIX)
}

fn browser_location() -> Option<(String, String)> {
    let location = web_sys::window()?.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location.hostname().unwrap_or_else(|_| "127.0.0.1".to_string());
    Some((protocol, hostname))
}
