//! In-process shared command table.

use crate::descriptor::CommandDescriptor;
use crate::handler::CommandSender;
use dyncmd_common::{fold_key, DynCmdError, Namespace, Result};
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Registry-side object installed under every key of one command.
#[derive(Debug)]
pub struct HostCommand {
    namespace: Namespace,
    descriptor: CommandDescriptor,
}

impl HostCommand {
    /// Wraps a descriptor for installation under `namespace`.
    pub fn new(namespace: Namespace, descriptor: CommandDescriptor) -> Self {
        Self {
            namespace,
            descriptor,
        }
    }

    /// Owning namespace.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The descriptor this command was installed from.
    pub fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    /// Whether `other` is the same logical command (namespace and primary name).
    pub fn same_command(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.descriptor.key() == other.descriptor.key()
    }

    /// Runs the executor.
    pub fn execute(&self, sender: &CommandSender, label: &str, args: &[&str]) -> bool {
        self.descriptor.executor().on_command(sender, label, args)
    }

    /// Asks the tab completer, if any, for suggestions.
    pub fn tab_complete(&self, sender: &CommandSender, label: &str, args: &[&str]) -> Vec<String> {
        self.descriptor
            .tab_completer()
            .map(|completer| completer.on_tab_complete(sender, label, args))
            .unwrap_or_default()
    }
}

type Entries = HashMap<String, Arc<HostCommand>>;

/// Shared command table keyed by folded label.
///
/// Cloning yields another handle to the same table. Every mutation takes
/// the write lock once, so a batch is never interleaved with another
/// writer.
#[derive(Debug, Clone, Default)]
pub struct CommandMap {
    entries: Arc<RwLock<Entries>>,
}

impl CommandMap {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `command` under all of its keys, or under none.
    ///
    /// Fails when any key is already bound to a different command or when
    /// the lock cannot be taken within `timeout`. Keys already bound to the
    /// same logical command are overwritten.
    pub fn register(&self, command: Arc<HostCommand>, timeout: Duration) -> Result<usize> {
        let keys = command.descriptor().literal_keys(command.namespace());
        let mut entries = self.entries.try_write_for(timeout).ok_or_else(|| {
            DynCmdError::table_access(format!("write lock not acquired within {timeout:?}"))
        })?;

        let conflicts: Vec<&str> = keys
            .iter()
            .filter(|key| {
                entries
                    .get(key.as_str())
                    .is_some_and(|bound| !bound.same_command(&command))
            })
            .map(String::as_str)
            .collect();

        if !conflicts.is_empty() {
            return Err(DynCmdError::registration_failed(
                command.descriptor().name(),
                format!("keys already bound to another command: {}", conflicts.join(", ")),
            ));
        }

        for key in &keys {
            entries.insert(key.clone(), command.clone());
        }
        debug!("Installed {} keys for '{}'", keys.len(), command.descriptor().name());
        Ok(keys.len())
    }

    /// Removes every key in `keys` under one write lock.
    ///
    /// Missing keys are skipped. Returns how many keys were actually bound.
    pub fn remove_all(&self, keys: &BTreeSet<String>, timeout: Duration) -> Result<usize> {
        let mut entries = self.entries.try_write_for(timeout).ok_or_else(|| {
            DynCmdError::table_access(format!("write lock not acquired within {timeout:?}"))
        })?;

        Ok(keys
            .iter()
            .filter(|key| entries.remove(&fold_key(key)).is_some())
            .count())
    }

    /// Resolves a label, folding it first.
    pub fn lookup(&self, label: &str) -> Option<Arc<HostCommand>> {
        self.entries.read().get(&fold_key(label)).cloned()
    }

    /// Removes a single label; the host side of the primitive table contract.
    pub fn remove(&self, label: &str) -> Option<Arc<HostCommand>> {
        self.entries.write().remove(&fold_key(label))
    }

    /// Runs `f` with read access to every binding.
    pub fn with_entries<R>(&self, f: impl FnOnce(&HashMap<String, Arc<HostCommand>>) -> R) -> R {
        f(&self.entries.read())
    }

    /// Bound keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether no key is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// A host application that may or may not expose its command table.
pub trait CommandHost: Send {
    /// The shared table, if the host currently exposes one.
    fn command_map(&self) -> Option<CommandMap>;
}

impl CommandHost for CommandMap {
    fn command_map(&self) -> Option<CommandMap> {
        Some(self.clone())
    }
}

/// Host whose table can be attached and detached at runtime.
#[derive(Debug, Clone, Default)]
pub struct HostHandle {
    map: Arc<Mutex<Option<CommandMap>>>,
}

impl HostHandle {
    /// A host already exposing `map`.
    pub fn attached(map: CommandMap) -> Self {
        Self {
            map: Arc::new(Mutex::new(Some(map))),
        }
    }

    /// A host exposing nothing yet.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Starts exposing `map`.
    pub fn attach(&self, map: CommandMap) {
        *self.map.lock() = Some(map);
    }

    /// Stops exposing the table.
    pub fn detach(&self) {
        *self.map.lock() = None;
    }
}

impl CommandHost for HostHandle {
    fn command_map(&self) -> Option<CommandMap> {
        self.map.lock().clone()
    }
}
