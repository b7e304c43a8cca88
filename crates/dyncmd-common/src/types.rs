//! Key folding and the namespace newtype used to form qualified command keys.

use crate::error::{DynCmdError, Result};
use std::fmt;

/// Separator between a namespace and a command label in a qualified key.
pub const NAMESPACE_SEPARATOR: char = ':';

/// Folds a command, alias or group name into its lookup key.
pub fn fold_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Builds the `namespace:label` form of a key.
pub fn qualified_key(namespace: &Namespace, label: &str) -> String {
    format!("{}{}{}", namespace.as_str(), NAMESPACE_SEPARATOR, fold_key(label))
}

/// The owning application's identifier, always stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace(String);

impl Namespace {
    /// Validates and folds a namespace identifier.
    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let raw = raw.as_ref();
        let folded = fold_key(raw);

        if folded.is_empty() {
            return Err(DynCmdError::invalid_namespace(raw, "namespace cannot be empty"));
        }
        if folded.contains(NAMESPACE_SEPARATOR) {
            return Err(DynCmdError::invalid_namespace(
                raw,
                format!("namespace cannot contain '{NAMESPACE_SEPARATOR}'"),
            ));
        }
        if folded.chars().any(char::is_whitespace) {
            return Err(DynCmdError::invalid_namespace(
                raw,
                "namespace cannot contain whitespace",
            ));
        }

        Ok(Self(folded))
    }

    /// The folded identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Namespace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
