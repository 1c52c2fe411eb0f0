//! Settings for the validate CLI

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// CLI configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateConfig {
    /// Tracing filter directive
    pub log_level: String,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl ValidateConfig {
    /// Create a new ValidateConfig from environment variables
    ///
    /// # Environment Variables
    /// - `VALIDATE_LOG_LEVEL`: tracing filter directive (default: info)
    /// - `VALIDATE_PRETTY`: pretty-print JSON output (default: true)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix("VALIDATE"))
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("log_level", "info")?
            .set_default("pretty", true)?
            .add_source(environment)
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let source = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<config::Map<String, String>>();
        Environment::with_prefix("VALIDATE").source(Some(source))
    }

    #[test]
    fn test_defaults() {
        let config = ValidateConfig::from_environment(environment(&[]))
            .expect("Failed to create config");
        assert_eq!(config.log_level, "info");
        assert!(config.pretty);
    }

    #[test]
    fn test_environment_overrides() {
        let config = ValidateConfig::from_environment(environment(&[
            ("VALIDATE_LOG_LEVEL", "schemas=debug"),
            ("VALIDATE_PRETTY", "false"),
            ("OTHER_PRETTY", "true"),
        ]))
        .expect("Failed to create config");

        assert_eq!(config.log_level, "schemas=debug");
        assert!(!config.pretty);
    }
}
