//! Handler capabilities and the component table used by batch loading.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Who invoked a command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommandSender {
    /// The host's own console.
    Console,
    /// A named user of the host.
    Player(String),
}

impl CommandSender {
    /// Display name of the sender.
    pub fn name(&self) -> &str {
        match self {
            Self::Console => "CONSOLE",
            Self::Player(name) => name,
        }
    }
}

/// Capability of running a command.
///
/// `label` is the key the command was invoked under (name or alias). The
/// return value tells the host whether the invocation was well-formed.
pub trait CommandExecutor: Send + Sync {
    /// Runs the command.
    fn on_command(&self, sender: &CommandSender, label: &str, args: &[&str]) -> bool;
}

/// Capability of suggesting completions for a partially typed command.
pub trait TabCompleter: Send + Sync {
    /// Returns candidate completions for the last argument.
    fn on_tab_complete(&self, sender: &CommandSender, label: &str, args: &[&str]) -> Vec<String>;
}

impl<F> CommandExecutor for F
where
    F: Fn(&CommandSender, &str, &[&str]) -> bool + Send + Sync,
{
    fn on_command(&self, sender: &CommandSender, label: &str, args: &[&str]) -> bool {
        self(sender, label, args)
    }
}

/// Instance produced by a component factory.
///
/// A component may provide either capability or both; batch loading checks
/// which ones are present before wiring it into a command.
#[derive(Clone, Default)]
pub struct Component {
    executor: Option<Arc<dyn CommandExecutor>>,
    tab_completer: Option<Arc<dyn TabCompleter>>,
}

impl Component {
    /// A component that can only execute.
    pub fn executor(executor: impl CommandExecutor + 'static) -> Self {
        Self {
            executor: Some(Arc::new(executor)),
            tab_completer: None,
        }
    }

    /// A component that can only complete.
    pub fn tab_completer(completer: impl TabCompleter + 'static) -> Self {
        Self {
            executor: None,
            tab_completer: Some(Arc::new(completer)),
        }
    }

    /// A component providing both capabilities from one instance.
    pub fn both<T>(handler: T) -> Self
    where
        T: CommandExecutor + TabCompleter + 'static,
    {
        let handler = Arc::new(handler);
        Self {
            executor: Some(handler.clone()),
            tab_completer: Some(handler),
        }
    }

    /// The executor capability, if provided.
    pub fn as_executor(&self) -> Option<Arc<dyn CommandExecutor>> {
        self.executor.clone()
    }

    /// The tab completion capability, if provided.
    pub fn as_tab_completer(&self) -> Option<Arc<dyn TabCompleter>> {
        self.tab_completer.clone()
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("executor", &self.executor.is_some())
            .field("tab_completer", &self.tab_completer.is_some())
            .finish()
    }
}

type ComponentFactory = Box<dyn Fn() -> Component + Send + Sync>;

/// Identifier → factory table consulted when loading command records.
///
/// Populated once at startup; every record reference is resolved against it.
#[derive(Default)]
pub struct ComponentRegistry {
    factories: HashMap<String, ComponentFactory>,
}

impl ComponentRegistry {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under `id`, replacing any previous one.
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Component + Send + Sync + 'static,
    {
        self.factories.insert(id.into(), Box::new(factory));
        self
    }

    /// Builds a fresh component for `id`.
    pub fn create(&self, id: &str) -> Option<Component> {
        self.factories.get(id.trim()).map(|factory| factory())
    }

    /// Whether `id` is known.
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id.trim())
    }

    /// Known identifiers, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Completer;

    impl TabCompleter for Completer {
        fn on_tab_complete(&self, _: &CommandSender, _: &str, _: &[&str]) -> Vec<String> {
            vec!["heads".into(), "tails".into()]
        }
    }

    struct Both;

    impl CommandExecutor for Both {
        fn on_command(&self, _: &CommandSender, _: &str, args: &[&str]) -> bool {
            !args.is_empty()
        }
    }

    impl TabCompleter for Both {
        fn on_tab_complete(&self, _: &CommandSender, _: &str, _: &[&str]) -> Vec<String> {
            vec!["both".into()]
        }
    }

    #[test]
    fn closure_executor() {
        let exec = |sender: &CommandSender, label: &str, _: &[&str]| {
            sender.name() == "CONSOLE" && label == "cf"
        };
        assert!(exec.on_command(&CommandSender::Console, "cf", &[]));
        assert!(!exec.on_command(&CommandSender::Player("alex".into()), "cf", &[]));
    }

    #[test]
    fn component_capabilities() {
        let only_exec = Component::executor(|_: &CommandSender, _: &str, _: &[&str]| true);
        assert!(only_exec.as_executor().is_some());
        assert!(only_exec.as_tab_completer().is_none());

        let only_tab = Component::tab_completer(Completer);
        assert!(only_tab.as_executor().is_none());
        assert!(only_tab.as_tab_completer().is_some());

        let both = Component::both(Both);
        let exec = both.as_executor().unwrap();
        let tab = both.as_tab_completer().unwrap();
        assert!(exec.on_command(&CommandSender::Console, "x", &["a"]));
        assert_eq!(tab.on_tab_complete(&CommandSender::Console, "x", &[]), vec!["both"]);
    }

    #[test]
    fn registry_creates_fresh_components() {
        let mut registry = ComponentRegistry::new();
        registry
            .register("both", || Component::both(Both))
            .register("tab", || Component::tab_completer(Completer));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.ids(), vec!["both", "tab"]);
        assert!(registry.contains(" both "));
        assert!(registry.create("both").is_some());
        assert!(registry.create("missing").is_none());
        assert!(!registry.is_empty());
    }
}
