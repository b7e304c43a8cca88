//! Access to the host's shared command table.
//!
//! [`CommandMap`] is the in-process table a host hands out; the
//! [`RegistryAdapter`] trait is the only way the manager touches it.

pub mod adapter;
pub mod command_map;

pub use adapter::*;
pub use command_map::*;
