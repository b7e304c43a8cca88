//! Shared fixtures for dyncmd-core integration tests.

#![allow(dead_code)]

use dyncmd_common::test_utils::{config_fixtures, init_test_logging};
use dyncmd_config::{Config, ConfigFormat, ConfigLoader};
use dyncmd_core::{
    CommandExecutor, CommandManager, CommandMap, CommandSender, Component, ComponentRegistry,
    Namespace, TabCompleter,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts invocations and accepts any call with at least `min_args` arguments.
#[derive(Debug, Default)]
pub struct CountingExecutor {
    pub calls: AtomicUsize,
    pub min_args: usize,
}

impl CommandExecutor for CountingExecutor {
    fn on_command(&self, _: &CommandSender, _: &str, args: &[&str]) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        args.len() >= self.min_args
    }
}

/// Executor and completer in one type, like a typical coin flip handler.
#[derive(Debug, Default)]
pub struct CoinFlip;

impl CommandExecutor for CoinFlip {
    fn on_command(&self, sender: &CommandSender, _: &str, args: &[&str]) -> bool {
        matches!(sender, CommandSender::Player(_)) && args.len() == 2
    }
}

impl TabCompleter for CoinFlip {
    fn on_tab_complete(&self, _: &CommandSender, _: &str, args: &[&str]) -> Vec<String> {
        match args {
            [] | [_] => Vec::new(),
            [_, side] => ["heads", "tails"]
                .into_iter()
                .filter(|s| s.starts_with(side))
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Completer-only component.
#[derive(Debug, Default)]
pub struct Suggest;

impl TabCompleter for Suggest {
    fn on_tab_complete(&self, _: &CommandSender, _: &str, _: &[&str]) -> Vec<String> {
        vec!["all".to_string()]
    }
}

pub fn accept(_: &CommandSender, _: &str, _: &[&str]) -> bool {
    true
}

/// Component table: `coinflip` provides both capabilities, `admin` only
/// executes, `tab-only` only completes.
pub fn components() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    registry
        .register("coinflip", || Component::both(CoinFlip))
        .register("admin", || Component::executor(accept))
        .register("tab-only", || Component::tab_completer(Suggest));
    registry
}

pub fn namespace() -> Namespace {
    Namespace::new("CoinFlip").unwrap()
}

/// A fresh table plus a manager bound to it.
pub fn setup() -> (CommandMap, CommandManager) {
    init_test_logging();
    let table = CommandMap::new();
    let manager = CommandManager::with_host(namespace(), table.clone());
    (table, manager)
}

pub fn sample_config() -> Config {
    ConfigLoader::parse(config_fixtures::sample_config_yaml(), ConfigFormat::Yaml).unwrap()
}

pub fn shared_counter(min_args: usize) -> Arc<CountingExecutor> {
    Arc::new(CountingExecutor {
        calls: AtomicUsize::new(0),
        min_args,
    })
}
