//! Default values for every configuration section.

use crate::schema::{Config, LoggingSettings, ManagerSettings};

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "dyncmd";

/// Table lock timeout used when none is configured.
pub const DEFAULT_TABLE_LOCK_TIMEOUT_MS: u64 = 500;

impl Default for Config {
    fn default() -> Self {
        Self {
            manager: ManagerSettings::default(),
            logging: LoggingSettings::default(),
            commands: Vec::new(),
        }
    }
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            table_lock_timeout_ms: DEFAULT_TABLE_LOCK_TIMEOUT_MS,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}
