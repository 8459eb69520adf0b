use serde::Deserialize;

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub client: ClientConfig,
    pub logging: Option<LoggingConfig>,
}

/// ================================
/// Partner API client
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClientConfig {
    /// defaults to the production Partner API host
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// JSON file holding a credential from a previous run;
    /// read at startup, rewritten after each command
    pub credential_file: Option<String>,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}
