//! The command tree node plus its routing and completion walks.
//!
//! A [`Command`] owns its sub-commands outright, so a tree is a plain value
//! the host can move, store, and drop like any other. Dispatch descends the
//! tree one token at a time: each level matches the next token against its
//! children (name segment or alias, case-insensitive), applies the child's
//! permission gate before recursing, and treats an unmatched token as an
//! ordinary argument for the node it stopped at. Completion follows the same
//! shape but collects candidates instead of executing.

use std::fmt;

use crate::handler::{CommandContext, CommandResult, Executor, TabCompleter};
use crate::name::CommandName;

/// Placeholder token in usage and description text, replaced with the
/// owning command's name segment.
pub const NAME_PLACEHOLDER: &str = "<command>";

/// Usage or description text for a command.
///
/// Static text has [`NAME_PLACEHOLDER`] substituted once, when it is set.
/// Dynamic text is recomputed per sender and substituted after every call,
/// so the closure may keep emitting the placeholder.
pub enum HelpText<S> {
    Static(String),
    Dynamic(Box<dyn Fn(&S) -> String + Send + Sync>),
}

impl<S> HelpText<S> {
    fn render(&self, sender: &S, name: &str) -> String {
        match self {
            HelpText::Static(text) => text.clone(),
            HelpText::Dynamic(f) => f(sender).replace(NAME_PLACEHOLDER, name),
        }
    }

    fn static_text(&self) -> Option<&str> {
        match self {
            HelpText::Static(text) => Some(text),
            HelpText::Dynamic(_) => None,
        }
    }
}

impl<S> fmt::Debug for HelpText<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HelpText::Static(text) => f.debug_tuple("Static").field(text).finish(),
            HelpText::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// One node in a command tree.
///
/// `S` is the host's sender type, shared with [`CommandContext`]. A node
/// carries its identity, help text, aliases, an optional permission gate,
/// its owned children, and the optional [`Executor`] and [`TabCompleter`]
/// capabilities. Nodes are usually assembled through
/// [`CommandBuilder`](crate::CommandBuilder) and handed to a
/// [`CommandRegistry`](crate::CommandRegistry), but nothing stops a host
/// from routing on a standalone tree.
pub struct Command<S> {
    name: CommandName,
    parent: Option<CommandName>,
    pub(crate) usage: HelpText<S>,
    pub(crate) description: HelpText<S>,
    aliases: Vec<String>,
    permission: Option<String>,
    children: Vec<Command<S>>,
    pub(crate) executor: Option<Box<dyn Executor<S>>>,
    pub(crate) completer: Option<Box<dyn TabCompleter<S>>>,
}

impl<S> Command<S> {
    /// Create a detached command with empty help text and no capabilities.
    pub fn new(name: CommandName) -> Self {
        Self {
            name,
            parent: None,
            usage: HelpText::Static(String::new()),
            description: HelpText::Static(String::new()),
            aliases: Vec::new(),
            permission: None,
            children: Vec::new(),
            executor: None,
            completer: None,
        }
    }

    pub fn name(&self) -> &CommandName {
        &self.name
    }

    /// Identity of the command this node was last attached under, if any.
    ///
    /// The marker is set by [`Command::add_child`] and deliberately survives
    /// [`Command::remove_child`]: a node that has been owned once is
    /// considered spent and will be rejected by any later attach.
    pub fn parent(&self) -> Option<&CommandName> {
        self.parent.as_ref()
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// Static usage text, or `None` when the usage is computed per sender.
    pub fn usage(&self) -> Option<&str> {
        self.usage.static_text()
    }

    /// Usage text rendered for a sender, with the name placeholder applied.
    pub fn usage_for(&self, sender: &S) -> String {
        self.usage.render(sender, self.name.name())
    }

    /// Set static usage text. [`NAME_PLACEHOLDER`] is substituted here, once.
    pub fn set_usage(&mut self, usage: &str) {
        self.usage = HelpText::Static(usage.replace(NAME_PLACEHOLDER, self.name.name()));
    }

    /// Set per-sender usage text. Substitution happens on every render.
    pub fn set_usage_fn(&mut self, usage: impl Fn(&S) -> String + Send + Sync + 'static) {
        self.usage = HelpText::Dynamic(Box::new(usage));
    }

    /// Static description text, or `None` when computed per sender.
    pub fn description(&self) -> Option<&str> {
        self.description.static_text()
    }

    /// Description rendered for a sender, with the name placeholder applied.
    pub fn description_for(&self, sender: &S) -> String {
        self.description.render(sender, self.name.name())
    }

    pub fn set_description(&mut self, description: &str) {
        self.description =
            HelpText::Static(description.replace(NAME_PLACEHOLDER, self.name.name()));
    }

    pub fn set_description_fn(
        &mut self,
        description: impl Fn(&S) -> String + Send + Sync + 'static,
    ) {
        self.description = HelpText::Dynamic(Box::new(description));
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Replace the alias list.
    ///
    /// Aliases changed after attachment are not re-checked against siblings;
    /// if a collision appears this way, lookup keeps working and resolves to
    /// the earliest-inserted match.
    pub fn set_aliases<I, T>(&mut self, aliases: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
    }

    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    pub fn set_permission(&mut self, permission: impl Into<String>) {
        self.permission = Some(permission.into());
    }

    pub fn clear_permission(&mut self) {
        self.permission = None;
    }

    pub fn set_executor(&mut self, executor: impl Executor<S> + 'static) {
        self.executor = Some(Box::new(executor));
    }

    pub fn has_executor(&self) -> bool {
        self.executor.is_some()
    }

    pub fn set_completer(&mut self, completer: impl TabCompleter<S> + 'static) {
        self.completer = Some(Box::new(completer));
    }

    pub fn children(&self) -> &[Command<S>] {
        &self.children
    }

    /// Attach a sub-command. Returns whether it was accepted.
    ///
    /// The attach is silently refused (with a debug log) when the child has
    /// ever been attached before, or when its name segment or any alias
    /// collides case-insensitively with a label already claimed by an
    /// existing child. A refused child is returned to nobody; callers who
    /// care check the flag.
    pub fn add_child(&mut self, mut child: Command<S>) -> bool {
        if child.parent.is_some() {
            tracing::debug!(
                command = %self.name,
                child = %child.name,
                "sub-command rejected: already owned"
            );
            return false;
        }
        let collision = self
            .children
            .iter()
            .any(|existing| child.labels().any(|label| existing.matches_label(label)));
        if collision {
            tracing::debug!(
                command = %self.name,
                child = %child.name,
                "sub-command rejected: label collision"
            );
            return false;
        }
        child.parent = Some(self.name.clone());
        tracing::debug!(command = %self.name, child = %child.name, "sub-command attached");
        self.children.push(child);
        true
    }

    /// Detach and return the child with the given identity.
    ///
    /// The returned subtree keeps its parent marker, so it cannot be
    /// attached again; re-registering it as a registry root still works.
    pub fn remove_child(&mut self, name: &CommandName) -> Option<Command<S>> {
        let index = self.children.iter().position(|child| &child.name == name)?;
        let child = self.children.remove(index);
        tracing::debug!(command = %self.name, child = %child.name, "sub-command removed");
        Some(child)
    }

    /// Find the first child whose name segment or alias matches the label,
    /// case-insensitively, in insertion order.
    pub fn find_child(&self, label: &str) -> Option<&Command<S>> {
        self.children.iter().find(|child| child.matches_label(label))
    }

    pub fn find_child_mut(&mut self, label: &str) -> Option<&mut Command<S>> {
        self.children
            .iter_mut()
            .find(|child| child.matches_label(label))
    }

    pub fn has_child(&self, label: &str) -> bool {
        self.find_child(label).is_some()
    }

    /// Whether this command answers to the label, by name segment or alias.
    pub(crate) fn matches_label(&self, label: &str) -> bool {
        self.name.name().eq_ignore_ascii_case(label)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(label))
    }

    /// Every label this command claims: its name segment, then its aliases.
    fn labels(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.name()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Route an invocation down the tree and execute where it lands.
    ///
    /// `label` is the token this node was reached under and `args` the
    /// tokens after it. If the first argument matches a child, the child's
    /// permission gate is checked here and the rest of the line recurses
    /// into it; an unmatched first argument stays an ordinary argument and
    /// the node executes locally with `label` and `args` untouched. Empty
    /// `args` execute locally as well.
    ///
    /// Returns the result paired with usage text. The usage is `Some` only
    /// for [`CommandResult::UsageError`]. Each level that surfaced the
    /// error from a child prefixes its own name segment, so with the usual
    /// `<command>`-leading templates the final string spells out the full
    /// path down to the failing command.
    ///
    /// # Panics
    ///
    /// Panics if the node the invocation lands on has no executor. See
    /// [`Command::execute`].
    pub fn route(
        &self,
        ctx: &dyn CommandContext<S>,
        label: &str,
        args: &[String],
    ) -> (CommandResult, Option<String>) {
        let usage = self.usage_for(ctx.sender());

        if let [sub_label, rest @ ..] = args {
            if let Some(child) = self.find_child(sub_label) {
                if !ctx.allows(child.permission.as_deref()) {
                    tracing::debug!(
                        command = %self.name,
                        child = %child.name,
                        sender = %ctx.sender_name(),
                        "sub-command permission denied"
                    );
                    return (CommandResult::PermissionDenied, None);
                }
                return match child.route(ctx, sub_label, rest) {
                    (CommandResult::UsageError, Some(child_usage)) => (
                        CommandResult::UsageError,
                        Some(format!("{} {}", self.name.name(), child_usage)),
                    ),
                    other => other,
                };
            }
        }

        if !ctx.allows(self.permission.as_deref()) {
            tracing::debug!(
                command = %self.name,
                sender = %ctx.sender_name(),
                "permission denied"
            );
            return (CommandResult::PermissionDenied, None);
        }

        let result = self.execute(ctx, label, args);
        if result == CommandResult::UsageError {
            (result, Some(usage))
        } else {
            (result, None)
        }
    }

    /// Invoke the executor directly, bypassing routing and permission gates.
    ///
    /// # Panics
    ///
    /// Panics when no executor is attached. Any node that input can land on
    /// needs one; a tree where that is not true is a construction bug in the
    /// host, not a runtime condition to report to the sender.
    pub fn execute(
        &self,
        ctx: &dyn CommandContext<S>,
        label: &str,
        args: &[String],
    ) -> CommandResult {
        match &self.executor {
            Some(executor) => executor.execute(ctx, self, label, args),
            None => panic!("command '{}' has no executor attached", self.name),
        }
    }

    /// Collect completion candidates for the argument being typed.
    ///
    /// With a single argument and no children, the node's own completer
    /// answers and its output is passed through untouched. With a single
    /// argument and children, the candidates are the name segments of the
    /// children the sender may use, merged with the completer's output,
    /// prefix-filtered against the partial token (case-sensitive), sorted,
    /// and deduplicated. With more arguments the walk descends into the
    /// matching, permitted child; a denied or unmatched token falls back to
    /// the node's own completer with `label` and `args` untouched.
    pub fn complete(
        &self,
        ctx: &dyn CommandContext<S>,
        label: &str,
        args: &[String],
    ) -> Vec<String> {
        match args {
            [partial] => {
                if self.children.is_empty() {
                    return self.complete_local(ctx, label, args);
                }
                let mut candidates: Vec<String> = self
                    .children
                    .iter()
                    .filter(|child| ctx.allows(child.permission.as_deref()))
                    .map(|child| child.name.name().to_string())
                    .collect();
                candidates.extend(self.complete_local(ctx, label, args));
                candidates.retain(|candidate| candidate.starts_with(partial.as_str()));
                candidates.sort();
                candidates.dedup();
                candidates
            }
            [sub_label, rest @ ..] => {
                if let Some(child) = self.find_child(sub_label) {
                    if ctx.allows(child.permission.as_deref()) {
                        return child.complete(ctx, sub_label, rest);
                    }
                }
                self.complete_local(ctx, label, args)
            }
            [] => self.complete_local(ctx, label, args),
        }
    }

    fn complete_local(
        &self,
        ctx: &dyn CommandContext<S>,
        label: &str,
        args: &[String],
    ) -> Vec<String> {
        match &self.completer {
            Some(completer) => completer.complete(ctx, self, label, args),
            None => Vec::new(),
        }
    }
}

impl<S> fmt::Debug for Command<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("usage", &self.usage)
            .field("description", &self.description)
            .field("aliases", &self.aliases)
            .field("permission", &self.permission)
            .field("children", &self.children)
            .field("has_executor", &self.executor.is_some())
            .field("has_completer", &self.completer.is_some())
            .finish()
    }
}
