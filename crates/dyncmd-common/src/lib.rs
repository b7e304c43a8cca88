//! # dyncmd Common
//!
//! Shared error types, key helpers and logging setup for dyncmd.
//!
//! This crate provides the foundational types used across all other crates
//! in the dyncmd workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use types::*;
