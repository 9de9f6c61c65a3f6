use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable prefix, e.g. `GLOBALSTREAM_NLP__CONTEXT_TTL_SECONDS=600`.
pub const ENV_PREFIX: &str = "GLOBALSTREAM";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub nlp: NlpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional file, then the environment.
    ///
    /// Later sources override earlier ones.
    pub fn load_with(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("nlp.context_ttl_seconds", 300)?
            .set_default("nlp.max_input_chars", 1000)?
            .set_default("logging.level", "warn")?
            .set_default("logging.json", false)?;

        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

/// Language understanding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NlpConfig {
    /// How long a conversation context stays valid after its last update
    #[serde(default = "default_context_ttl_seconds")]
    pub context_ttl_seconds: u64,
    /// Longest utterance accepted by the guarded entry point
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
    /// Seed for response selection; unset means thread-local randomness
    #[serde(default)]
    pub response_seed: Option<u64>,
}

impl NlpConfig {
    pub fn new() -> Self {
        Self {
            context_ttl_seconds: default_context_ttl_seconds(),
            max_input_chars: default_max_input_chars(),
            response_seed: None,
        }
    }

    pub fn with_context_ttl(mut self, seconds: u64) -> Self {
        self.context_ttl_seconds = seconds;
        self
    }

    pub fn with_max_input_chars(mut self, max: usize) -> Self {
        self.max_input_chars = max;
        self
    }

    pub fn with_response_seed(mut self, seed: u64) -> Self {
        self.response_seed = Some(seed);
        self
    }

    pub fn context_ttl(&self) -> Duration {
        Duration::from_secs(self.context_ttl_seconds)
    }
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_context_ttl_seconds() -> u64 {
    300 // 5 minutes
}

fn default_max_input_chars() -> usize {
    1000
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nlp_config_defaults() {
        let config = NlpConfig::default();

        assert_eq!(config.context_ttl_seconds, 300);
        assert_eq!(config.context_ttl(), Duration::from_secs(300));
        assert_eq!(config.max_input_chars, 1000);
        assert!(config.response_seed.is_none());
    }

    #[test]
    fn test_nlp_config_builder() {
        let config = NlpConfig::new()
            .with_context_ttl(60)
            .with_max_input_chars(200)
            .with_response_seed(7);

        assert_eq!(config.context_ttl(), Duration::from_secs(60));
        assert_eq!(config.max_input_chars, 200);
        assert_eq!(config.response_seed, Some(7));
    }

    #[test]
    fn test_logging_config_builder() {
        let config = LoggingConfig::new().with_level("debug").with_json(true);

        assert_eq!(config.level, "debug");
        assert!(config.json);
    }

    #[test]
    fn test_load_uses_defaults() {
        let config = AppConfig::load_with(None).unwrap();

        assert!(config.nlp.context_ttl_seconds > 0);
        assert!(config.nlp.max_input_chars > 0);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let document = r#"{"nlp": {"response_seed": 42}}"#;
        let config: AppConfig = serde_json::from_str(document).unwrap();

        assert_eq!(config.nlp.response_seed, Some(42));
        assert_eq!(config.nlp.context_ttl_seconds, 300);
        assert_eq!(config.logging.level, "warn");
    }
}
