//! Narrow interface between the manager and the host command table.

use super::command_map::{CommandHost, CommandMap, HostCommand};
use crate::descriptor::CommandDescriptor;
use dyncmd_common::{DynCmdError, Namespace, Result};
use dyncmd_config::DEFAULT_TABLE_LOCK_TIMEOUT_MS;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Operations the manager needs from the host registry.
///
/// `resolve` may be called repeatedly; after a failure nothing is cached
/// and the next call tries again.
#[cfg_attr(test, mockall::automock)]
pub trait RegistryAdapter: Send {
    /// Whether a table handle is currently held.
    fn is_resolved(&self) -> bool;

    /// Obtains the host's table handle.
    fn resolve(&mut self) -> Result<()>;

    /// Installs `descriptor` under every literal key for `namespace`.
    fn register(
        &mut self,
        namespace: &Namespace,
        descriptor: &CommandDescriptor,
    ) -> Result<Arc<HostCommand>>;

    /// Deletes every key in `keys` in one pass; absent keys are ignored.
    fn remove_all(&mut self, keys: &BTreeSet<String>) -> Result<usize>;

    /// The entry currently bound to `key`.
    fn lookup(&self, key: &str) -> Option<Arc<HostCommand>>;
}

/// [`RegistryAdapter`] backed by a [`CommandHost`].
#[derive(Debug)]
pub struct CommandMapAdapter<H> {
    host: H,
    map: Option<CommandMap>,
    lock_timeout: Duration,
}

impl<H: CommandHost> CommandMapAdapter<H> {
    /// Creates an unresolved adapter with the default lock timeout.
    pub fn new(host: H) -> Self {
        Self::with_timeout(host, Duration::from_millis(DEFAULT_TABLE_LOCK_TIMEOUT_MS))
    }

    /// Creates an unresolved adapter with a custom lock timeout.
    pub const fn with_timeout(host: H, lock_timeout: Duration) -> Self {
        Self {
            host,
            map: None,
            lock_timeout,
        }
    }

    /// The lock timeout applied to batch mutations.
    pub const fn lock_timeout(&self) -> Duration {
        self.lock_timeout
    }

    fn map(&self) -> Result<&CommandMap> {
        self.map
            .as_ref()
            .ok_or_else(|| DynCmdError::registry_unavailable("command table not resolved"))
    }
}

impl<H: CommandHost> RegistryAdapter for CommandMapAdapter<H> {
    fn is_resolved(&self) -> bool {
        self.map.is_some()
    }

    fn resolve(&mut self) -> Result<()> {
        if self.map.is_some() {
            return Ok(());
        }

        match self.host.command_map() {
            Some(map) => {
                debug!("Resolved host command table ({} keys bound)", map.len());
                self.map = Some(map);
                Ok(())
            }
            None => {
                warn!("Host does not expose a command table yet");
                Err(DynCmdError::registry_unavailable(
                    "host does not expose a command table",
                ))
            }
        }
    }

    fn register(
        &mut self,
        namespace: &Namespace,
        descriptor: &CommandDescriptor,
    ) -> Result<Arc<HostCommand>> {
        let map = self.map()?;
        let command = Arc::new(HostCommand::new(namespace.clone(), descriptor.clone()));

        match map.register(command.clone(), self.lock_timeout) {
            Ok(_) => Ok(command),
            Err(err @ DynCmdError::RegistrationFailed { .. }) => Err(err),
            Err(err) => Err(DynCmdError::registration_failed_with_source(
                descriptor.name(),
                "host table rejected the command",
                err,
            )),
        }
    }

    fn remove_all(&mut self, keys: &BTreeSet<String>) -> Result<usize> {
        self.map()?.remove_all(keys, self.lock_timeout)
    }

    fn lookup(&self, key: &str) -> Option<Arc<HostCommand>> {
        self.map.as_ref().and_then(|map| map.lookup(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{CommandExecutor, CommandSender};
    use crate::registry::HostHandle;

    fn descriptor(name: &str) -> CommandDescriptor {
        let executor: Arc<dyn CommandExecutor> =
            Arc::new(|_: &CommandSender, _: &str, _: &[&str]| true);
        CommandDescriptor::new(
            name.to_string(),
            executor,
            None,
            String::new(),
            None,
            None,
            None,
            Vec::new(),
            None,
        )
    }

    #[test]
    fn unresolved_adapter_refuses_work() {
        let mut adapter = CommandMapAdapter::new(HostHandle::detached());
        let ns = Namespace::new("coinflip").unwrap();

        assert!(!adapter.is_resolved());
        assert!(matches!(
            adapter.resolve(),
            Err(DynCmdError::RegistryUnavailable { .. })
        ));
        assert!(matches!(
            adapter.register(&ns, &descriptor("coinflip")),
            Err(DynCmdError::RegistryUnavailable { .. })
        ));
        assert!(matches!(
            adapter.remove_all(&BTreeSet::new()),
            Err(DynCmdError::RegistryUnavailable { .. })
        ));
        assert!(adapter.lookup("coinflip").is_none());
    }

    #[test]
    fn lock_timeout_defaults_from_config() {
        let adapter = CommandMapAdapter::new(CommandMap::new());
        assert_eq!(
            adapter.lock_timeout(),
            Duration::from_millis(DEFAULT_TABLE_LOCK_TIMEOUT_MS)
        );

        let adapter = CommandMapAdapter::with_timeout(CommandMap::new(), Duration::from_millis(5));
        assert_eq!(adapter.lock_timeout(), Duration::from_millis(5));
    }

    #[test]
    fn resolve_retries_after_attach() {
        let host = HostHandle::detached();
        let mut adapter = CommandMapAdapter::new(host.clone());
        assert!(adapter.resolve().is_err());

        host.attach(CommandMap::new());
        adapter.resolve().unwrap();
        assert!(adapter.is_resolved());
    }

    #[test]
    fn register_and_remove_through_adapter() {
        let map = CommandMap::new();
        let mut adapter = CommandMapAdapter::with_timeout(map.clone(), Duration::from_millis(20));
        let ns = Namespace::new("coinflip").unwrap();
        adapter.resolve().unwrap();

        let installed = adapter.register(&ns, &descriptor("Flip")).unwrap();
        assert_eq!(installed.descriptor().name(), "Flip");
        assert!(Arc::ptr_eq(&installed, &adapter.lookup("coinflip:flip").unwrap()));

        let keys = installed.descriptor().literal_keys(&ns);
        assert_eq!(adapter.remove_all(&keys).unwrap(), 2);
        assert!(map.is_empty());
    }

    #[test]
    fn lock_timeout_is_wrapped_as_registration_failure() {
        let map = CommandMap::new();
        let mut adapter = CommandMapAdapter::with_timeout(map.clone(), Duration::from_millis(10));
        let ns = Namespace::new("coinflip").unwrap();
        adapter.resolve().unwrap();

        let err = map.with_entries(|_| adapter.register(&ns, &descriptor("flip")).unwrap_err());
        assert!(matches!(err, DynCmdError::RegistrationFailed { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}
