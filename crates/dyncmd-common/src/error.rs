//! Error types and utilities for dyncmd

use thiserror::Error;

/// Result type alias for dyncmd operations
pub type Result<T> = std::result::Result<T, DynCmdError>;

/// Boxed error used as the `source` of wrapped failures
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for dyncmd operations
#[derive(Error, Debug)]
pub enum DynCmdError {
    /// The host's shared command table could not be obtained
    #[error("Command registry unavailable: {message}")]
    RegistryUnavailable { message: String },

    /// The host refused to install a command
    #[error("Registration of '{name}' failed: {message}")]
    RegistrationFailed {
        name: String,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// The shared command table could not be mutated
    #[error("Command table access failed: {message}")]
    TableAccessFailed { message: String },

    /// The manager holds no record of the named command
    #[error("Command '{name}' is not registered")]
    NotRegistered { name: String },

    /// A descriptor or batch record cannot be turned into a command
    #[error("Invalid command descriptor '{name}': {message}")]
    InvalidDescriptor { name: String, message: String },

    /// The manager's own indexes disagree with each other or with the host
    #[error("Command index corrupted: {message}")]
    IndexCorrupted { message: String },

    /// Namespace identifiers must be usable as a key prefix
    #[error("Invalid namespace '{namespace}': {message}")]
    InvalidNamespace { namespace: String, message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl DynCmdError {
    /// Create a registry unavailable error
    pub fn registry_unavailable(msg: impl Into<String>) -> Self {
        Self::RegistryUnavailable {
            message: msg.into(),
        }
    }

    /// Create a registration failure for the given command
    pub fn registration_failed(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::RegistrationFailed {
            name: name.into(),
            message: msg.into(),
            source: None,
        }
    }

    /// Create a registration failure wrapping an underlying cause
    pub fn registration_failed_with_source(
        name: impl Into<String>,
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::RegistrationFailed {
            name: name.into(),
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a table access failure
    pub fn table_access(msg: impl Into<String>) -> Self {
        Self::TableAccessFailed {
            message: msg.into(),
        }
    }

    /// Create a not-registered error
    pub fn not_registered(name: impl Into<String>) -> Self {
        Self::NotRegistered { name: name.into() }
    }

    /// Create an invalid descriptor error
    pub fn invalid_descriptor(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            name: name.into(),
            message: msg.into(),
        }
    }

    /// Create an index corruption error
    pub fn index_corrupted(msg: impl Into<String>) -> Self {
        Self::IndexCorrupted {
            message: msg.into(),
        }
    }

    /// Create an invalid namespace error
    pub fn invalid_namespace(namespace: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::InvalidNamespace {
            namespace: namespace.into(),
            message: msg.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether a later call may succeed without any change on the caller's side.
    ///
    /// Registry and table failures depend on host state; everything else is
    /// a property of the request itself.
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RegistryUnavailable { .. } | Self::TableAccessFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_display_formatting() {
        let error = DynCmdError::not_registered("coinflip");
        assert_eq!(error.to_string(), "Command 'coinflip' is not registered");

        let error = DynCmdError::registration_failed("flip", "name taken by other");
        assert_eq!(
            error.to_string(),
            "Registration of 'flip' failed: name taken by other"
        );

        let error = DynCmdError::table_access("lock timed out");
        assert_eq!(error.to_string(), "Command table access failed: lock timed out");

        let error = DynCmdError::invalid_descriptor("cf", "missing executor");
        assert_eq!(
            error.to_string(),
            "Invalid command descriptor 'cf': missing executor"
        );
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let wrapped = DynCmdError::config_with_source("Config loading failed", io_error);

        assert!(wrapped.to_string().contains("Configuration error"));
        assert!(wrapped.source().is_some());

        let plain = DynCmdError::config("missing field");
        assert!(plain.source().is_none());
    }

    #[test]
    fn test_registration_failure_chain() {
        let root = io::Error::new(io::ErrorKind::AlreadyExists, "bound elsewhere");
        let error = DynCmdError::registration_failed_with_source("cf", "host rejected", root);

        let source = error.source().expect("source should be preserved");
        assert_eq!(source.to_string(), "bound elsewhere");
    }

    #[test]
    fn test_transient_classification() {
        assert!(DynCmdError::registry_unavailable("no map").is_transient());
        assert!(DynCmdError::table_access("busy").is_transient());
        assert!(!DynCmdError::not_registered("x").is_transient());
        assert!(!DynCmdError::invalid_descriptor("x", "y").is_transient());
        assert!(!DynCmdError::index_corrupted("z").is_transient());
    }
}
