//! # dyncmd Core
//!
//! Runtime command registration over a shared host command table.
//!
//! The [`CommandManager`] is the only writer of the host table. It keeps a
//! local index of everything it installed and a group index on top of it,
//! so that a command can later be retracted together with its namespaced
//! key, every alias, and every group membership.
//!
//! ```rust,ignore
//! let table = CommandMap::new();
//! let mut manager = CommandManager::with_host(Namespace::new("CoinFlip")?, table.clone());
//!
//! manager
//!     .command("coinflip", CoinFlipExecutor::default())
//!     .aliases(["cf", "flip"])
//!     .group("economy")
//!     .register()?;
//!
//! manager.unregister_command_group("economy");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod builder;
pub mod descriptor;
pub mod handle;
pub mod handler;
pub mod manager;
pub mod registry;

pub use builder::CommandBuilder;
pub use descriptor::CommandDescriptor;
pub use handle::CommandHandle;
pub use handler::*;
pub use manager::CommandManager;
pub use registry::*;

pub use dyncmd_common::{DynCmdError, Namespace, Result};
pub use dyncmd_config::CommandRecord;
