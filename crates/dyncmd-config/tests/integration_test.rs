//! Integration tests for dyncmd-config crate.

use dyncmd_common::test_utils::{config_fixtures, create_temp_dir, write_temp_file};
use dyncmd_config::{Config, ConfigCache, ConfigError, ConfigLoader};

fn assert_sample_records(config: &Config) {
    assert_eq!(config.manager.namespace, "CoinFlip");
    assert_eq!(config.manager.table_lock_timeout_ms, 250);
    assert_eq!(config.logging.format, "compact");
    assert_eq!(config.commands.len(), 3);

    let coinflip = &config.commands[0];
    assert_eq!(coinflip.name, "coinflip");
    assert_eq!(coinflip.executor.as_deref(), Some("coinflip"));
    assert_eq!(coinflip.aliases, vec!["cf".to_string(), "flip".to_string()]);
    assert_eq!(coinflip.tab_completer.as_deref(), Some("coinflip"));
    assert_eq!(coinflip.group.as_deref(), Some("economy"));
    assert!(coinflip.usage.is_none());

    let broken = &config.commands[1];
    assert_eq!(broken.name, "broken");
    assert!(broken.executor.is_none());
    assert!(broken.aliases.is_empty());

    let admin = &config.commands[2];
    assert_eq!(admin.permission.as_deref(), Some("coinflip.admin"));
    assert_eq!(admin.permission_message.as_deref(), Some("You cannot do that."));
}

#[test]
fn test_load_yaml_config() {
    let dir = create_temp_dir();
    let path = write_temp_file(&dir, "dyncmd.yaml", config_fixtures::sample_config_yaml());

    let config = ConfigLoader::load_config(&path).unwrap();
    assert_sample_records(&config);
}

#[test]
fn test_load_toml_config() {
    let dir = create_temp_dir();
    let path = write_temp_file(&dir, "dyncmd.toml", config_fixtures::sample_config_toml());

    let config = ConfigLoader::load_config(&path).unwrap();
    assert_sample_records(&config);
}

#[test]
fn test_yaml_and_toml_agree() {
    let dir = create_temp_dir();
    let yaml = write_temp_file(&dir, "a.yml", config_fixtures::sample_config_yaml());
    let toml = write_temp_file(&dir, "a.toml", config_fixtures::sample_config_toml());

    assert_eq!(
        ConfigLoader::load_config(yaml).unwrap(),
        ConfigLoader::load_config(toml).unwrap()
    );
}

#[test]
fn test_missing_file_reports_path() {
    let dir = create_temp_dir();
    let path = dir.path().join("absent.yaml");

    match ConfigLoader::load_config(&path) {
        Err(ConfigError::IoError { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected IoError, got {other:?}"),
    }
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = create_temp_dir();
    let path = write_temp_file(&dir, "bad.yaml", "manager:\n  namespace: \"a:b\"\n");

    assert!(matches!(
        ConfigLoader::load_config(&path),
        Err(ConfigError::ValidationError(_))
    ));
}

#[test]
fn test_config_error_converts_into_common_error() {
    let err: dyncmd_common::DynCmdError = ConfigError::ValidationError("nope".into()).into();
    assert!(matches!(err, dyncmd_common::DynCmdError::Config { .. }));
}

#[test]
fn test_config_cache() {
    let config = Config::default();
    let cache = ConfigCache::new(config.clone());

    assert_eq!(cache.get().manager.namespace, config.manager.namespace);
    assert!(cache.source().is_none());

    let mut new_config = config;
    new_config.manager.namespace = "casino".to_string();
    cache.update(new_config);

    assert_eq!(cache.get().manager.namespace, "casino");
}

#[test]
fn test_config_cache_reload() {
    let dir = create_temp_dir();
    let path = write_temp_file(&dir, "dyncmd.yaml", config_fixtures::sample_config_yaml());

    let cache = ConfigCache::from_file(&path).unwrap();
    assert_eq!(cache.get().commands.len(), 3);

    std::fs::write(
        &path,
        "manager:\n  namespace: \"CoinFlip\"\ncommands:\n  - name: \"solo\"\n    executor: \"coinflip\"\n",
    )
    .unwrap();
    let reloaded = cache.reload().unwrap();
    assert_eq!(reloaded.commands.len(), 1);
    assert_eq!(reloaded.commands[0].name, "solo");

    std::fs::write(&path, "commands: [not, a, record").unwrap();
    assert!(cache.reload().is_err());
    assert_eq!(cache.get().commands[0].name, "solo");
}

#[test]
fn test_record_serializes_to_snake_case() {
    let config = ConfigLoader::parse(
        config_fixtures::sample_config_yaml(),
        dyncmd_config::ConfigFormat::Yaml,
    )
    .unwrap();
    let json = serde_json::to_value(&config.commands[2]).unwrap();
    assert_eq!(json["permission_message"], "You cannot do that.");
}
