//! Loading commands from configuration records.

use crate::handler::{CommandExecutor, ComponentRegistry, TabCompleter};
use crate::manager::CommandManager;
use dyncmd_common::{DynCmdError, Result};
use dyncmd_config::CommandRecord;
use std::sync::Arc;
use tracing::{info, warn};

impl CommandManager {
    /// Registers every valid record and returns how many succeeded.
    ///
    /// A record is skipped when its name is empty or its executor reference
    /// is missing, unknown, or not an executor. An unusable tab completer
    /// reference is ignored. One record never aborts the rest.
    pub fn load_from_descriptor_batch(
        &mut self,
        records: &[CommandRecord],
        components: &ComponentRegistry,
    ) -> usize {
        let mut loaded = 0;
        for record in records {
            let outcome = resolve_executor(record, components)
                .and_then(|executor| self.register_record(record, executor, components));
            match outcome {
                Ok(()) => loaded += 1,
                Err(err @ DynCmdError::InvalidDescriptor { .. }) => {
                    warn!("Skipping command record '{}': {}", record.name, err);
                }
                // Registration failures were already logged by the builder.
                Err(_) => {}
            }
        }

        info!("Loaded {}/{} command records", loaded, records.len());
        loaded
    }

    /// Unregisters everything, then loads `records` afresh.
    pub fn reload_from_records(
        &mut self,
        records: &[CommandRecord],
        components: &ComponentRegistry,
    ) -> usize {
        let dropped = self.unregister_all_commands();
        let loaded = self.load_from_descriptor_batch(records, components);
        info!("Reloaded commands: {} dropped, {} loaded", dropped, loaded);
        loaded
    }

    fn register_record(
        &mut self,
        record: &CommandRecord,
        executor: Arc<dyn CommandExecutor>,
        components: &ComponentRegistry,
    ) -> Result<()> {
        let mut builder = self
            .command_with(record.name.as_str(), executor)
            .aliases(record.aliases.iter().cloned());

        if let Some(description) = &record.description {
            builder = builder.description(description.as_str());
        }
        if let Some(usage) = &record.usage {
            builder = builder.usage(usage.as_str());
        }
        if let Some(permission) = &record.permission {
            builder = builder.permission(permission.as_str());
        }
        if let Some(message) = &record.permission_message {
            builder = builder.permission_message(message.as_str());
        }
        if let Some(completer) = resolve_tab_completer(record, components) {
            builder = builder.tab_completer_arc(completer);
        }
        if let Some(group) = &record.group {
            builder = builder.group(group.as_str());
        }

        builder.register()
    }
}

fn resolve_executor(
    record: &CommandRecord,
    components: &ComponentRegistry,
) -> Result<Arc<dyn CommandExecutor>> {
    if record.name.trim().is_empty() {
        return Err(DynCmdError::invalid_descriptor(
            &record.name,
            "record has no command name",
        ));
    }

    let reference = record
        .executor
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| DynCmdError::invalid_descriptor(&record.name, "no executor reference"))?;

    let component = components.create(reference).ok_or_else(|| {
        DynCmdError::invalid_descriptor(
            &record.name,
            format!("unknown executor component '{reference}'"),
        )
    })?;

    component.as_executor().ok_or_else(|| {
        DynCmdError::invalid_descriptor(
            &record.name,
            format!("component '{reference}' is not an executor"),
        )
    })
}

fn resolve_tab_completer(
    record: &CommandRecord,
    components: &ComponentRegistry,
) -> Option<Arc<dyn TabCompleter>> {
    let reference = record
        .tab_completer
        .as_deref()
        .filter(|id| !id.trim().is_empty())?;

    let completer = components
        .create(reference)
        .and_then(|component| component.as_tab_completer());
    if completer.is_none() {
        warn!(
            "Ignoring tab completer '{}' for '{}': not a tab completer component",
            reference, record.name
        );
    }
    completer
}
