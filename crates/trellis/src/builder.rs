//! Fluent construction of command nodes.

use crate::command::{Command, HelpText};
use crate::handler::{Executor, TabCompleter};
use crate::name::CommandName;

/// Fluent builder for a [`Command`].
///
/// Static and dynamic help text are tracked separately until
/// [`CommandBuilder::build`]. When both were provided, the dynamic form
/// wins, no matter which call came last.
pub struct CommandBuilder<S> {
    name: CommandName,
    usage: String,
    usage_fn: Option<Box<dyn Fn(&S) -> String + Send + Sync>>,
    description: String,
    description_fn: Option<Box<dyn Fn(&S) -> String + Send + Sync>>,
    aliases: Vec<String>,
    permission: Option<String>,
    executor: Option<Box<dyn Executor<S>>>,
    completer: Option<Box<dyn TabCompleter<S>>>,
    children: Vec<Command<S>>,
}

impl<S> CommandBuilder<S> {
    pub fn new(name: CommandName) -> Self {
        Self {
            name,
            usage: String::new(),
            usage_fn: None,
            description: String::new(),
            description_fn: None,
            aliases: Vec::new(),
            permission: None,
            executor: None,
            completer: None,
            children: Vec::new(),
        }
    }

    /// Static usage text; may contain
    /// [`NAME_PLACEHOLDER`](crate::NAME_PLACEHOLDER).
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Per-sender usage text. Takes precedence over
    /// [`CommandBuilder::usage`] regardless of call order.
    pub fn usage_fn(mut self, usage: impl Fn(&S) -> String + Send + Sync + 'static) -> Self {
        self.usage_fn = Some(Box::new(usage));
        self
    }

    /// Static description text; may contain
    /// [`NAME_PLACEHOLDER`](crate::NAME_PLACEHOLDER).
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Per-sender description text. Takes precedence over
    /// [`CommandBuilder::description`] regardless of call order.
    pub fn description_fn(
        mut self,
        description: impl Fn(&S) -> String + Send + Sync + 'static,
    ) -> Self {
        self.description_fn = Some(Box::new(description));
        self
    }

    pub fn aliases<I, T>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    pub fn executor(mut self, executor: impl Executor<S> + 'static) -> Self {
        self.executor = Some(Box::new(executor));
        self
    }

    pub fn completer(mut self, completer: impl TabCompleter<S> + 'static) -> Self {
        self.completer = Some(Box::new(completer));
        self
    }

    /// Queue a sub-command. Attachment happens at build time under the
    /// usual [`Command::add_child`] rules, so a colliding child is dropped
    /// silently.
    pub fn child(mut self, child: Command<S>) -> Self {
        self.children.push(child);
        self
    }

    pub fn build(self) -> Command<S> {
        let mut command = Command::new(self.name);
        command.set_usage(&self.usage);
        if let Some(f) = self.usage_fn {
            command.usage = HelpText::Dynamic(f);
        }
        command.set_description(&self.description);
        if let Some(f) = self.description_fn {
            command.description = HelpText::Dynamic(f);
        }
        command.set_aliases(self.aliases);
        if let Some(permission) = self.permission {
            command.set_permission(permission);
        }
        command.executor = self.executor;
        command.completer = self.completer;
        for child in self.children {
            command.add_child(child);
        }
        command
    }
}
