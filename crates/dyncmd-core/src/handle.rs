//! Local index entry for a registered command.

use crate::descriptor::CommandDescriptor;
use crate::registry::HostCommand;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Reference to the registry entry created for one command.
#[derive(Debug, Clone)]
pub struct CommandHandle {
    host: Arc<HostCommand>,
    registered_at: DateTime<Utc>,
}

impl CommandHandle {
    pub(crate) fn new(host: Arc<HostCommand>) -> Self {
        Self {
            host,
            registered_at: Utc::now(),
        }
    }

    /// Display name of the command.
    pub fn name(&self) -> &str {
        self.host.descriptor().name()
    }

    /// Aliases installed with the command.
    pub fn aliases(&self) -> &[String] {
        self.host.descriptor().aliases()
    }

    /// The descriptor the command was registered from.
    pub fn descriptor(&self) -> &CommandDescriptor {
        self.host.descriptor()
    }

    /// When the registration succeeded.
    pub const fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// The object bound in the host table.
    pub const fn host_command(&self) -> &Arc<HostCommand> {
        &self.host
    }
}
