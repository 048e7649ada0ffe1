//! Top-level command registration and lookup.

use std::collections::HashMap;

use crate::command::Command;
use crate::name::CommandName;

/// Holds a host's root commands, keyed by identity.
///
/// The registry owns its trees outright. Registering under an identity
/// that is already taken replaces the old tree and hands it back, the same
/// way `HashMap::insert` does. Label lookup scans roots in registration
/// order, so when two roots answer to the same label the earlier
/// registration wins.
pub struct CommandRegistry<S> {
    commands: HashMap<CommandName, Command<S>>,
    // Registration order; drives label lookup tie-breaks.
    order: Vec<CommandName>,
}

impl<S> CommandRegistry<S> {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a root command, returning the tree it displaced, if any.
    pub fn register(&mut self, command: Command<S>) -> Option<Command<S>> {
        let name = command.name().clone();
        let displaced = self.commands.insert(name.clone(), command);
        if displaced.is_some() {
            tracing::debug!(command = %name, "command re-registered, replacing previous tree");
        } else {
            self.order.push(name.clone());
            tracing::debug!(command = %name, "command registered");
        }
        displaced
    }

    pub fn contains(&self, name: &CommandName) -> bool {
        self.commands.contains_key(name)
    }

    pub fn get(&self, name: &CommandName) -> Option<&Command<S>> {
        self.commands.get(name)
    }

    pub fn get_mut(&mut self, name: &CommandName) -> Option<&mut Command<S>> {
        self.commands.get_mut(name)
    }

    /// Deregister a root command and return its tree.
    pub fn remove(&mut self, name: &CommandName) -> Option<Command<S>> {
        let removed = self.commands.remove(name);
        if removed.is_some() {
            self.order.retain(|n| n != name);
            tracing::debug!(command = %name, "command deregistered");
        }
        removed
    }

    /// Find the first registered root whose name segment or alias matches
    /// the label, case-insensitively.
    pub fn find(&self, label: &str) -> Option<&Command<S>> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .find(|command| command.matches_label(label))
    }

    pub fn find_mut(&mut self, label: &str) -> Option<&mut Command<S>> {
        let name = self
            .order
            .iter()
            .find(|name| {
                self.commands
                    .get(*name)
                    .is_some_and(|command| command.matches_label(label))
            })?
            .clone();
        self.commands.get_mut(&name)
    }

    /// All registered roots, sorted by identity.
    pub fn list(&self) -> Vec<&Command<S>> {
        let mut commands: Vec<&Command<S>> = self.commands.values().collect();
        commands.sort_by(|a, b| a.name().cmp(b.name()));
        commands
    }

    pub fn clear(&mut self) {
        let count = self.commands.len();
        self.commands.clear();
        self.order.clear();
        tracing::debug!(count, "registry cleared");
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<S> Default for CommandRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}
