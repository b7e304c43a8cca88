//! Configuration schema definitions using serde.

use dyncmd_common::logging::{LogFormat, LoggingConfig};
use dyncmd_common::{DynCmdError, Namespace, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure for dyncmd.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Command manager settings.
    pub manager: ManagerSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// Command records registered at startup, in file order.
    pub commands: Vec<CommandRecord>,
}

/// Command manager settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ManagerSettings {
    /// Owning namespace used to build `namespace:name` keys.
    pub namespace: String,
    /// How long a batch operation may wait for the shared table lock.
    pub table_lock_timeout_ms: u64,
}

impl ManagerSettings {
    /// The validated, folded namespace.
    pub fn namespace(&self) -> Result<Namespace> {
        Namespace::new(&self.namespace)
    }

    /// The table lock timeout as a [`Duration`].
    pub const fn table_lock_timeout(&self) -> Duration {
        Duration::from_millis(self.table_lock_timeout_ms)
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive string.
    pub level: String,
    /// One of `pretty`, `compact`, `json`.
    pub format: String,
    /// Optional log file; stdout when absent.
    pub file_path: Option<String>,
}

impl LoggingSettings {
    /// Converts the file-level settings into a subscriber configuration.
    pub fn to_logging_config(&self) -> Result<LoggingConfig> {
        let format = LogFormat::parse(&self.format).ok_or_else(|| {
            DynCmdError::config(format!("unknown log format '{}'", self.format))
        })?;

        Ok(LoggingConfig {
            level: self.level.clone(),
            format,
            file_path: self.file_path.clone(),
            ..LoggingConfig::default()
        })
    }
}

/// One command as described by a configuration file.
///
/// Handler references are identifiers looked up in the component table at
/// load time; nothing here is resolved yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct CommandRecord {
    /// Primary command name.
    pub name: String,
    /// Identifier of the executor component. Mandatory for loading.
    pub executor: Option<String>,
    /// Short description.
    pub description: Option<String>,
    /// Usage line; `/<name>` when absent.
    pub usage: Option<String>,
    /// Permission node required to run the command.
    pub permission: Option<String>,
    /// Message shown when the permission check fails.
    #[serde(alias = "permissionMessage")]
    pub permission_message: Option<String>,
    /// Alternative labels.
    pub aliases: Vec<String>,
    /// Identifier of the tab completer component.
    #[serde(alias = "tabCompleter")]
    pub tab_completer: Option<String>,
    /// Group the command joins once registered.
    pub group: Option<String>,
}

impl CommandRecord {
    /// Creates a record with just a name and an executor reference.
    pub fn new(name: impl Into<String>, executor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            executor: Some(executor.into()),
            ..Self::default()
        }
    }
}
