//! Fluent construction of a command, bound to its manager.

use crate::descriptor::CommandDescriptor;
use crate::handler::{CommandExecutor, TabCompleter};
use crate::manager::CommandManager;
use dyncmd_common::{DynCmdError, Result};
use std::sync::Arc;
use tracing::{error, warn};

/// Builder returned by [`CommandManager::command`].
///
/// Nothing touches the host table until [`register`](Self::register).
#[must_use = "a command builder does nothing until `register` is called"]
pub struct CommandBuilder<'m> {
    manager: &'m mut CommandManager,
    name: String,
    executor: Arc<dyn CommandExecutor>,
    tab_completer: Option<Arc<dyn TabCompleter>>,
    description: String,
    usage: Option<String>,
    permission: Option<String>,
    permission_message: Option<String>,
    aliases: Vec<String>,
    group: Option<String>,
}

impl<'m> CommandBuilder<'m> {
    pub(crate) fn new(
        manager: &'m mut CommandManager,
        name: impl Into<String>,
        executor: Arc<dyn CommandExecutor>,
    ) -> Self {
        Self {
            manager,
            name: name.into(),
            executor,
            tab_completer: None,
            description: String::new(),
            usage: None,
            permission: None,
            permission_message: None,
            aliases: Vec::new(),
            group: None,
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the usage line; defaults to `/<name>`.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Sets the required permission node.
    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Sets the message shown when the permission check fails.
    pub fn permission_message(mut self, message: impl Into<String>) -> Self {
        self.permission_message = Some(message.into());
        self
    }

    /// Replaces the alias list.
    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Attaches a tab completer.
    pub fn tab_completer(self, completer: impl TabCompleter + 'static) -> Self {
        self.tab_completer_arc(Arc::new(completer))
    }

    /// Attaches an already shared tab completer.
    pub fn tab_completer_arc(mut self, completer: Arc<dyn TabCompleter>) -> Self {
        self.tab_completer = Some(completer);
        self
    }

    /// Joins `group` once registered.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Installs the command in the host table and the manager's indexes.
    ///
    /// Either every key is installed and indexed, or nothing changes.
    pub fn register(self) -> Result<()> {
        let descriptor = CommandDescriptor::new(
            self.name,
            self.executor,
            self.tab_completer,
            self.description,
            self.usage,
            self.permission,
            self.permission_message,
            self.aliases,
            self.group,
        );
        let name = descriptor.name().to_string();

        self.manager.commit(descriptor).inspect_err(|err| match err {
            DynCmdError::InvalidDescriptor { .. } => {
                warn!("Rejected command '{}': {}", name, err);
            }
            _ => error!("Failed to register command '{}': {}", name, err),
        })
    }
}
