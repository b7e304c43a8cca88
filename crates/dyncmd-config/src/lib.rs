//! # dyncmd Config
//!
//! Manager settings and command descriptor records for dyncmd.
//!
//! This crate loads, validates and caches the configuration that feeds the
//! command manager: the owning namespace, logging setup, and the batch of
//! command records to register at startup.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use cache::*;
pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
