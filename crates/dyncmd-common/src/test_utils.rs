//! Test utilities and shared test helpers for dyncmd.
//!
//! Available to this crate's own tests and, through the `testing` feature,
//! to the other workspace crates.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "testing")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write `contents` to a file named `file_name` inside `dir` and return its path.
#[cfg(feature = "testing")]
pub fn write_temp_file(
    dir: &tempfile::TempDir,
    file_name: &str,
    contents: &str,
) -> std::path::PathBuf {
    let path = dir.path().join(file_name);
    std::fs::write(&path, contents).expect("Failed to write temporary file");
    path
}

/// Configuration-related test fixtures.
pub mod config_fixtures {
    /// A minimal YAML configuration with the three-command batch used across tests.
    pub fn sample_config_yaml() -> &'static str {
        r#"
manager:
  namespace: "CoinFlip"
  table_lock_timeout_ms: 250

logging:
  level: "debug"
  format: "compact"

commands:
  - name: "coinflip"
    executor: "coinflip"
    description: "Flip a coin against another player"
    aliases: ["cf", "flip"]
    tabCompleter: "coinflip"
    group: "economy"
  - name: "broken"
    description: "No executor on purpose"
  - name: "cfadmin"
    executor: "admin"
    permission: "coinflip.admin"
    permissionMessage: "You cannot do that."
    group: "admin"
"#
    }

    /// The same configuration as [`sample_config_yaml`] expressed in TOML.
    pub fn sample_config_toml() -> &'static str {
        r#"
[manager]
namespace = "CoinFlip"
table_lock_timeout_ms = 250

[logging]
level = "debug"
format = "compact"

[[commands]]
name = "coinflip"
executor = "coinflip"
description = "Flip a coin against another player"
aliases = ["cf", "flip"]
tabCompleter = "coinflip"
group = "economy"

[[commands]]
name = "broken"
description = "No executor on purpose"

[[commands]]
name = "cfadmin"
executor = "admin"
permission = "coinflip.admin"
permissionMessage = "You cannot do that."
group = "admin"
"#
    }
}
