//! Dispatch outcomes, the host-facing context trait, and the capability
//! traits commands carry.
//!
//! The library never talks to the outside world directly. Everything it
//! needs from the host -- who is invoking, what they are allowed to do, how
//! to reach them -- comes in through a [`CommandContext`] implementation,
//! and everything a command does goes out through the [`Executor`] and
//! [`TabCompleter`] capabilities attached to its node.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::command::Command;

/// Outcome of one dispatch attempt.
///
/// Routing reports permission and usage failures itself; executors report
/// everything else. The variants carry no payload so results stay `Copy`
/// and trivially comparable across the recursion in
/// [`Command::route`](crate::Command::route).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandResult {
    /// The command ran to completion.
    Success,
    /// A permission gate rejected the sender.
    PermissionDenied,
    /// The invocation did not match what the command expects.
    UsageError,
    /// The command started but failed while running.
    RuntimeError,
}

impl CommandResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CommandResult::Success)
    }

    /// Stable key the host can map to a user-facing message. `None` for
    /// [`CommandResult::Success`].
    pub fn message_key(&self) -> Option<&'static str> {
        match self {
            CommandResult::Success => None,
            CommandResult::PermissionDenied => Some("error.permission"),
            CommandResult::UsageError => Some("error.usage"),
            CommandResult::RuntimeError => Some("error.runtime"),
        }
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CommandResult::Success => "success",
            CommandResult::PermissionDenied => "permission denied",
            CommandResult::UsageError => "usage error",
            CommandResult::RuntimeError => "runtime error",
        };
        write!(f, "{s}")
    }
}

/// Per-invocation view of the sender, implemented by the host.
///
/// `S` is the host's own sender type -- a player handle, a session, a plain
/// `String`, whatever identifies who is typing. The library only ever holds
/// `&S`, so the host keeps full ownership of its sender model.
pub trait CommandContext<S> {
    /// The sender this invocation runs on behalf of.
    fn sender(&self) -> &S;

    /// Display name of the sender, for logs and messages.
    fn sender_name(&self) -> String;

    /// Whether the sender holds the named permission.
    fn has_permission(&self, permission: &str) -> bool;

    /// Deliver a line of text back to the sender.
    fn send_message(&self, text: &str);

    /// Check an optional permission gate. `None` means unrestricted and
    /// always passes.
    fn allows(&self, permission: Option<&str>) -> bool {
        permission.map_or(true, |p| self.has_permission(p))
    }
}

/// Execution behavior attached to a command node.
///
/// Implemented automatically for closures of the matching shape, so simple
/// commands can be wired up inline:
///
/// ```
/// # use trellis::{Command, CommandContext, CommandResult};
/// # let mut command = Command::<String>::new("demo:ping".parse().unwrap());
/// command.set_executor(
///     |ctx: &dyn CommandContext<String>, _cmd: &Command<String>, _label: &str, _args: &[String]| {
///         ctx.send_message("pong");
///         CommandResult::Success
///     },
/// );
/// ```
pub trait Executor<S>: Send + Sync {
    /// Run the command. `label` is the token the command was invoked under
    /// (an alias reaches the executor unchanged) and `args` are the tokens
    /// after it.
    fn execute(
        &self,
        ctx: &dyn CommandContext<S>,
        command: &Command<S>,
        label: &str,
        args: &[String],
    ) -> CommandResult;
}

impl<S, F> Executor<S> for F
where
    F: Fn(&dyn CommandContext<S>, &Command<S>, &str, &[String]) -> CommandResult + Send + Sync,
{
    fn execute(
        &self,
        ctx: &dyn CommandContext<S>,
        command: &Command<S>,
        label: &str,
        args: &[String],
    ) -> CommandResult {
        self(ctx, command, label, args)
    }
}

/// Completion behavior attached to a command node.
///
/// Returns candidate strings for the argument currently being typed. An
/// empty vector means "no suggestions"; a command with no completer at all
/// behaves exactly the same way. Implemented automatically for closures of
/// the matching shape.
pub trait TabCompleter<S>: Send + Sync {
    fn complete(
        &self,
        ctx: &dyn CommandContext<S>,
        command: &Command<S>,
        label: &str,
        args: &[String],
    ) -> Vec<String>;
}

impl<S, F> TabCompleter<S> for F
where
    F: Fn(&dyn CommandContext<S>, &Command<S>, &str, &[String]) -> Vec<String> + Send + Sync,
{
    fn complete(
        &self,
        ctx: &dyn CommandContext<S>,
        command: &Command<S>,
        label: &str,
        args: &[String],
    ) -> Vec<String> {
        self(ctx, command, label, args)
    }
}
