use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct WidgetConfig {
    pub ticket: TicketConfig,
    pub cache: CacheSection,
    pub sync: SyncSection,
    pub bridge: BridgeSection,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TicketConfig {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSection {
    pub prefix: String,
    /// Durable tier file; empty keeps both tiers in memory.
    #[serde(default)]
    pub durable_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncSection {
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BridgeSection {
    pub host_principal: String,
    pub embedded_principal: String,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl WidgetConfig {
    /// Load configuration.
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. Built-in defaults
    /// 2. config/widget.toml (if present)
    /// 3. Environment variables with a TRIAGE_ prefix
    pub fn load() -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder()
            .set_default("ticket.id", "T-1001")?
            .set_default("cache.prefix", "triage:")?
            .set_default("cache.durable_path", "")?
            .set_default("sync.debounce_ms", 250)?
            .set_default("bridge.host_principal", "host:widget")?
            .set_default("bridge.embedded_principal", "embedded:panel")?
            .set_default(
                "bridge.allowed_origins",
                vec!["host:widget".to_string(), "embedded:panel".to_string()],
            )?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .add_source(File::with_name("config/widget").required(false))
            .add_source(
                Environment::default()
                    .prefix("TRIAGE")
                    .separator("_")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Load config from a specific path (useful for testing).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));
        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_structure() {
        let toml = r#"
            [ticket]
            id = "T-42"

            [cache]
            prefix = "triage:"
            durable_path = "/tmp/triage-cache.json"

            [sync]
            debounce_ms = 100

            [bridge]
            host_principal = "host:widget"
            embedded_principal = "embedded:panel"
            allowed_origins = ["host:widget", "embedded:panel"]

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config: WidgetConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.ticket.id, "T-42");
        assert_eq!(config.sync.debounce_ms, 100);
        assert_eq!(config.bridge.allowed_origins.len(), 2);
    }

    #[test]
    fn test_defaults_load() {
        let config = WidgetConfig::load().unwrap();
        assert_eq!(config.cache.prefix, "triage:");
        assert!(config.cache.durable_path.is_empty());
    }
}
