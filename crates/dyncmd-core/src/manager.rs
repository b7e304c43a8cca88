//! Command manager: the only writer of the host command table.
//!
//! The manager owns two indexes:
//!
//! - the local index, folded name → [`CommandHandle`], holding every
//!   command this manager installed;
//! - the group index, folded group → set of folded names, whose members
//!   always exist in the local index.
//!
//! Registration goes adapter first, then indexes; removal goes adapter
//! first, then local pruning. Local pruning happens even when the table
//! purge fails, so the indexes never point at commands the caller asked
//! to forget.

use crate::builder::CommandBuilder;
use crate::descriptor::CommandDescriptor;
use crate::handle::CommandHandle;
use crate::handler::CommandExecutor;
use crate::registry::{CommandHost, CommandMapAdapter, RegistryAdapter};
use dyncmd_common::{fold_key, DynCmdError, Namespace, Result, NAMESPACE_SEPARATOR};
use dyncmd_config::ManagerSettings;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Registers, groups and retracts commands for one namespace.
pub struct CommandManager {
    namespace: Namespace,
    adapter: Box<dyn RegistryAdapter>,
    commands: HashMap<String, CommandHandle>,
    groups: HashMap<String, HashSet<String>>,
}

impl CommandManager {
    /// Creates a manager over `adapter`.
    ///
    /// The adapter is resolved lazily on the first mutation.
    pub fn new(namespace: Namespace, adapter: impl RegistryAdapter + 'static) -> Self {
        Self {
            namespace,
            adapter: Box::new(adapter),
            commands: HashMap::new(),
            groups: HashMap::new(),
        }
    }

    /// Creates a manager over the table exposed by `host`.
    pub fn with_host(namespace: Namespace, host: impl CommandHost + 'static) -> Self {
        Self::new(namespace, CommandMapAdapter::new(host))
    }

    /// Creates a manager from configuration settings.
    pub fn from_settings(
        settings: &ManagerSettings,
        host: impl CommandHost + 'static,
    ) -> Result<Self> {
        let namespace = settings.namespace()?;
        let adapter = CommandMapAdapter::with_timeout(host, settings.table_lock_timeout());
        Ok(Self::new(namespace, adapter))
    }

    /// The namespace prefix used for qualified keys.
    pub const fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Starts building a command named `name`.
    pub fn command(
        &mut self,
        name: impl Into<String>,
        executor: impl CommandExecutor + 'static,
    ) -> CommandBuilder<'_> {
        CommandBuilder::new(self, name, Arc::new(executor))
    }

    /// Starts building a command around an already shared executor.
    pub fn command_with(
        &mut self,
        name: impl Into<String>,
        executor: Arc<dyn CommandExecutor>,
    ) -> CommandBuilder<'_> {
        CommandBuilder::new(self, name, executor)
    }

    // Registration

    pub(crate) fn commit(&mut self, descriptor: CommandDescriptor) -> Result<()> {
        let name = descriptor.name();
        if name.is_empty() {
            return Err(DynCmdError::invalid_descriptor(
                name,
                "command name must not be empty",
            ));
        }
        if !is_plain_label(name) {
            return Err(DynCmdError::invalid_descriptor(
                name,
                format!("command name must not contain whitespace or '{NAMESPACE_SEPARATOR}'"),
            ));
        }
        if let Some(alias) = descriptor.aliases().iter().find(|a| !is_plain_label(a)) {
            return Err(DynCmdError::invalid_descriptor(
                name,
                format!("alias '{alias}' must not contain whitespace or '{NAMESPACE_SEPARATOR}'"),
            ));
        }

        let key = descriptor.key();
        if self.commands.contains_key(&key) {
            return Err(DynCmdError::registration_failed(
                name,
                "a command with this name is already registered",
            ));
        }

        self.ensure_resolved()?;
        let host = self.adapter.register(&self.namespace, &descriptor)?;

        if let Some(group) = descriptor.group() {
            self.groups
                .entry(fold_key(group))
                .or_default()
                .insert(key.clone());
        }
        self.commands.insert(key, CommandHandle::new(host));

        if descriptor.aliases().is_empty() {
            info!("Registered command '{}'", descriptor.name());
        } else {
            info!(
                "Registered command '{}' with aliases [{}]",
                descriptor.name(),
                descriptor.aliases().join(", ")
            );
        }
        Ok(())
    }

    fn ensure_resolved(&mut self) -> Result<()> {
        if self.adapter.is_resolved() {
            return Ok(());
        }
        self.adapter.resolve()
    }

    // Unregistration

    /// Removes a command with all of its keys and group memberships.
    ///
    /// If the table purge fails the command is still dropped from both
    /// indexes and the purge error is returned.
    pub fn unregister_command(&mut self, name: &str) -> Result<()> {
        let key = fold_key(name);
        let Some(handle) = self.commands.get(&key) else {
            warn!("Cannot unregister '{}': not registered", name);
            return Err(DynCmdError::not_registered(name));
        };
        let label = handle.name().to_string();
        let keys = handle.descriptor().literal_keys(&self.namespace);

        if let Err(err) = self.ensure_resolved() {
            error!("Cannot unregister '{}': {}", label, err);
            return Err(err);
        }

        debug!("Purging keys for '{}': {:?}", label, keys);
        let purge = self.adapter.remove_all(&keys);

        for members in self.groups.values_mut() {
            members.remove(&key);
        }
        self.commands.remove(&key);

        match purge {
            Ok(removed) => {
                info!("Unregistered command '{}' ({} keys removed)", label, removed);
                Ok(())
            }
            Err(err) => {
                error!(
                    "Unregistered command '{}' locally but the table purge failed: {}",
                    label, err
                );
                Err(err)
            }
        }
    }

    /// Unregisters every member of `group` and drops the group.
    ///
    /// Returns how many members were unregistered cleanly.
    pub fn unregister_command_group(&mut self, group: &str) -> usize {
        let group_key = fold_key(group);
        let Some(members) = self.groups.get(&group_key) else {
            warn!("Cannot unregister group '{}': no such group", group);
            return 0;
        };

        let mut members: Vec<String> = members.iter().cloned().collect();
        members.sort_unstable();

        let mut removed = 0;
        for member in &members {
            if self.unregister_command(member).is_ok() {
                removed += 1;
            }
        }
        self.groups.remove(&group_key);

        info!(
            "Unregistered group '{}' ({}/{} commands removed)",
            group,
            removed,
            members.len()
        );
        removed
    }

    /// Unregisters every command and clears the group index.
    pub fn unregister_all_commands(&mut self) -> usize {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort_unstable();

        let mut removed = 0;
        for name in &names {
            if self.unregister_command(name).is_ok() {
                removed += 1;
            }
        }
        self.groups.clear();

        info!("Unregistered {}/{} commands", removed, names.len());
        removed
    }

    // Group membership

    /// Adds a registered command to `group`, creating the group if needed.
    pub fn add_command_to_group(&mut self, name: &str, group: &str) -> Result<()> {
        let key = fold_key(name);
        if !self.commands.contains_key(&key) {
            warn!("Cannot add '{}' to group '{}': not registered", name, group);
            return Err(DynCmdError::not_registered(name));
        }

        let group_key = fold_key(group);
        if group_key.is_empty() {
            return Err(DynCmdError::invalid_descriptor(
                name,
                "group name must not be empty",
            ));
        }

        if self.groups.entry(group_key).or_default().insert(key) {
            info!("Added command '{}' to group '{}'", name, group);
        }
        Ok(())
    }

    /// Removes a command from `group`; the group itself stays even if empty.
    pub fn remove_command_from_group(&mut self, name: &str, group: &str) -> bool {
        let removed = self
            .groups
            .get_mut(&fold_key(group))
            .is_some_and(|members| members.remove(&fold_key(name)));
        if removed {
            info!("Removed command '{}' from group '{}'", name, group);
        }
        removed
    }

    // Queries

    /// Handle for `name`, if registered.
    pub fn get_command(&self, name: &str) -> Option<CommandHandle> {
        self.commands.get(&fold_key(name)).cloned()
    }

    /// Every registered command, sorted by folded name.
    pub fn get_all_commands(&self) -> Vec<CommandHandle> {
        let mut handles: Vec<(&String, &CommandHandle)> = self.commands.iter().collect();
        handles.sort_unstable_by(|a, b| a.0.cmp(b.0));
        handles.into_iter().map(|(_, h)| h.clone()).collect()
    }

    /// Whether `name` is registered by this manager.
    pub fn is_command_registered(&self, name: &str) -> bool {
        self.commands.contains_key(&fold_key(name))
    }

    /// Number of registered commands.
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Members of `group`, sorted by folded name.
    ///
    /// Members missing from the local index are reported and skipped.
    pub fn get_commands_by_group(&self, group: &str) -> Vec<CommandHandle> {
        let Some(members) = self.groups.get(&fold_key(group)) else {
            return Vec::new();
        };

        let mut members: Vec<&String> = members.iter().collect();
        members.sort_unstable();

        members
            .into_iter()
            .filter_map(|member| {
                let handle = self.commands.get(member);
                if handle.is_none() {
                    error!(
                        "Group '{}' references unindexed command '{}'",
                        group, member
                    );
                }
                handle.cloned()
            })
            .collect()
    }

    /// Every group name, including empty groups.
    pub fn get_all_groups(&self) -> BTreeSet<String> {
        self.groups.keys().cloned().collect()
    }

    /// Checks both indexes against each other and against the host table.
    ///
    /// Every literal key of every indexed command must resolve to the exact
    /// object installed for it, and every group member must be indexed.
    pub fn verify_integrity(&self) -> Result<()> {
        for (key, handle) in &self.commands {
            for literal in handle.descriptor().literal_keys(&self.namespace) {
                let bound = self.adapter.lookup(&literal);
                if !bound.is_some_and(|bound| Arc::ptr_eq(&bound, handle.host_command())) {
                    return Err(DynCmdError::index_corrupted(format!(
                        "key '{literal}' of command '{key}' is not bound to it in the host table"
                    )));
                }
            }
        }

        for (group, members) in &self.groups {
            if let Some(member) = members.iter().find(|m| !self.commands.contains_key(*m)) {
                return Err(DynCmdError::index_corrupted(format!(
                    "group '{group}' references unindexed command '{member}'"
                )));
            }
        }
        Ok(())
    }
}

/// Labels become table keys verbatim, so they may not look qualified.
fn is_plain_label(label: &str) -> bool {
    !label.contains(NAMESPACE_SEPARATOR) && !label.contains(char::is_whitespace)
}

impl fmt::Debug for CommandManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandManager")
            .field("namespace", &self.namespace)
            .field("commands", &self.commands.len())
            .field("groups", &self.get_all_groups())
            .finish_non_exhaustive()
    }
}
