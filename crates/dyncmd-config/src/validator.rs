//! Runtime validation of loaded configuration.

use crate::loader::ConfigError;
use crate::schema::Config;
use dyncmd_common::fold_key;
use dyncmd_common::logging::build_filter;
use std::collections::HashSet;
use tracing::warn;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    ///
    /// Manager and logging settings must be usable as-is. Command records are
    /// only inspected for duplicate names, which are reported but not fatal:
    /// the batch loader skips the later duplicate on its own.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        config
            .manager
            .namespace()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        if config.manager.table_lock_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "manager.table_lock_timeout_ms must be greater than zero".to_string(),
            ));
        }

        build_filter(&config.logging.level)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        config
            .logging
            .to_logging_config()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        let mut seen = HashSet::new();
        for record in &config.commands {
            let key = fold_key(&record.name);
            if !key.is_empty() && !seen.insert(key) {
                warn!("Duplicate command record '{}' in configuration", record.name);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CommandRecord;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_bad_namespace() {
        let mut config = Config::default();
        config.manager.namespace = "my plugin".to_string();
        assert!(ConfigValidator::validate(&config).is_err());

        config.manager.namespace = String::new();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = Config::default();
        config.manager.table_lock_timeout_ms = 0;
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("table_lock_timeout_ms"));
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_duplicate_records_are_not_fatal() {
        let mut config = Config::default();
        config.commands = vec![
            CommandRecord::new("Flip", "coinflip"),
            CommandRecord::new("flip", "coinflip"),
        ];
        assert!(ConfigValidator::validate(&config).is_ok());
    }
}
