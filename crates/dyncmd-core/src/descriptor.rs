//! Immutable description of one command to register.

use crate::handler::{CommandExecutor, TabCompleter};
use dyncmd_common::{fold_key, qualified_key, Namespace};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Everything needed to install one command.
///
/// Built by [`CommandBuilder`](crate::CommandBuilder); the name keeps its
/// original casing for display while every key derived from it is folded.
#[derive(Clone)]
pub struct CommandDescriptor {
    name: String,
    executor: Arc<dyn CommandExecutor>,
    tab_completer: Option<Arc<dyn TabCompleter>>,
    description: String,
    usage: String,
    permission: Option<String>,
    permission_message: Option<String>,
    aliases: Vec<String>,
    group: Option<String>,
}

impl CommandDescriptor {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: String,
        executor: Arc<dyn CommandExecutor>,
        tab_completer: Option<Arc<dyn TabCompleter>>,
        description: String,
        usage: Option<String>,
        permission: Option<String>,
        permission_message: Option<String>,
        aliases: Vec<String>,
        group: Option<String>,
    ) -> Self {
        let name = name.trim().to_string();
        let usage = non_empty(usage).unwrap_or_else(|| format!("/{name}"));

        let mut seen = BTreeSet::new();
        seen.insert(fold_key(&name));
        let aliases = aliases
            .into_iter()
            .map(|alias| alias.trim().to_string())
            .filter(|alias| !alias.is_empty() && seen.insert(fold_key(alias)))
            .collect();

        Self {
            name,
            executor,
            tab_completer,
            description,
            usage,
            permission: non_empty(permission),
            permission_message: non_empty(permission_message),
            aliases,
            group: non_empty(group),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Folded primary key.
    pub fn key(&self) -> String {
        fold_key(&self.name)
    }

    /// The executor capability.
    pub fn executor(&self) -> &Arc<dyn CommandExecutor> {
        &self.executor
    }

    /// The tab completion capability, if any.
    pub fn tab_completer(&self) -> Option<&Arc<dyn TabCompleter>> {
        self.tab_completer.as_ref()
    }

    /// Short description; may be empty.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Usage line.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Required permission node.
    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    /// Message shown when the permission check fails.
    pub fn permission_message(&self) -> Option<&str> {
        self.permission_message.as_deref()
    }

    /// Aliases in declaration order, without blanks or duplicates of the name.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Group joined at registration time.
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Every literal key this command occupies in the host table.
    ///
    /// Bare and `namespace:`-qualified forms of the name and of each alias.
    pub fn literal_keys(&self, namespace: &Namespace) -> BTreeSet<String> {
        std::iter::once(self.name.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .flat_map(|label| [fold_key(label), qualified_key(namespace, label)])
            .collect()
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("usage", &self.usage)
            .field("permission", &self.permission)
            .field("permission_message", &self.permission_message)
            .field("aliases", &self.aliases)
            .field("group", &self.group)
            .field("tab_completer", &self.tab_completer.is_some())
            .finish_non_exhaustive()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
