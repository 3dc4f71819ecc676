use crate::presentation::config::LoggingSettings;

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub level: String,
}

impl TracingConfig {
    /// Settings file values, with `LOG_FORMAT=json` still forcing JSON output.
    pub fn from_settings(environment: &str, logging: &LoggingSettings) -> Self {
        let defaults = Self::default();
        Self {
            environment: environment.to_string(),
            json_format: logging.enable_json || defaults.json_format,
            level: logging.level.clone(),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            level: "info".to_string(),
        }
    }
}
