//! Embeddable command trees: registration, routing, permission gates, and
//! tab completion.
//!
//! Hosts build trees of named [`Command`]s, hand the roots to a
//! [`CommandRegistry`], and feed tokenized input lines to
//! [`Command::route`]. The library walks the tree, enforces each node's
//! permission gate through the host's [`CommandContext`], runs the
//! [`Executor`] where the walk lands, and reports a [`CommandResult`] plus
//! ready-to-print usage text on bad invocations. [`Command::complete`]
//! walks the same tree to produce tab-completion candidates.
//!
//! # Architecture
//!
//! - [`name`]: namespaced command identities (`"namespace:name"`)
//! - [`handler`]: dispatch results, the host context trait, and the
//!   executor / completer capability traits
//! - [`command`]: the tree node and its routing and completion walks
//! - [`builder`]: fluent construction of command nodes
//! - [`registry`]: top-level registration and label lookup
//!
//! The crate performs no I/O of its own. Everything sender-facing goes
//! through the [`CommandContext`] the host implements, which also keeps
//! the whole library synchronous and runtime-agnostic.

pub mod builder;
pub mod command;
pub mod handler;
pub mod name;
pub mod registry;

pub use builder::CommandBuilder;
pub use command::{Command, HelpText, NAME_PLACEHOLDER};
pub use handler::{CommandContext, CommandResult, Executor, TabCompleter};
pub use name::{CommandName, InvalidCommandName};
pub use registry::CommandRegistry;
