//! Namespaced command identities.
//!
//! A [`CommandName`] is the immutable identity of a command node: a namespace
//! plus a path segment, written `"namespace:name"`. Equality and hashing use
//! both parts; label matching elsewhere in the crate uses only the segment,
//! case-insensitively. Uses `Arc<str>` internally so cloning is an atomic
//! increment instead of a heap allocation.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors from parsing a [`CommandName`] out of its `"namespace:name"` form.
///
/// Only the structure is checked; the characters inside each part are not
/// validated against any grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCommandName {
    #[error("command name '{0}' is missing the ':' namespace separator")]
    MissingSeparator(String),

    #[error("command name '{0}' has an empty namespace")]
    EmptyNamespace(String),

    #[error("command name '{0}' has an empty name segment")]
    EmptyName(String),
}

/// The identity of a command: a namespace plus a name segment.
///
/// The segment (not the full identity) is what input labels are matched
/// against, so `"fleet:status"` is invoked as `status`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandName {
    namespace: Arc<str>,
    name: Arc<str>,
}

impl CommandName {
    /// Create a new CommandName from a namespace and a name segment.
    pub fn new(namespace: impl Into<Arc<str>>, name: impl Into<Arc<str>>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// The namespace part.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The name segment -- the part labels are matched against.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

impl FromStr for CommandName {
    type Err = InvalidCommandName;

    /// Parse `"namespace:name"`. The first `:` separates the parts, so a
    /// segment may itself contain colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, name) = s
            .split_once(':')
            .ok_or_else(|| InvalidCommandName::MissingSeparator(s.to_string()))?;
        if namespace.is_empty() {
            return Err(InvalidCommandName::EmptyNamespace(s.to_string()));
        }
        if name.is_empty() {
            return Err(InvalidCommandName::EmptyName(s.to_string()));
        }
        Ok(Self::new(namespace, name))
    }
}

impl PartialEq<str> for CommandName {
    fn eq(&self, other: &str) -> bool {
        other
            .split_once(':')
            .is_some_and(|(ns, name)| self.namespace() == ns && self.name() == name)
    }
}

impl PartialEq<&str> for CommandName {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl Serialize for CommandName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CommandName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_accessors() {
        let name: CommandName = "fleet:status".parse().unwrap();
        assert_eq!(name.namespace(), "fleet");
        assert_eq!(name.name(), "status");
        assert_eq!(name.to_string(), "fleet:status");
    }

    #[test]
    fn test_parse_splits_on_first_separator() {
        let name: CommandName = "fleet:a:b".parse().unwrap();
        assert_eq!(name.namespace(), "fleet");
        assert_eq!(name.name(), "a:b");
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        let err = "status".parse::<CommandName>().unwrap_err();
        assert_eq!(err, InvalidCommandName::MissingSeparator("status".into()));
    }

    #[test]
    fn test_parse_rejects_empty_parts() {
        assert_eq!(
            ":status".parse::<CommandName>().unwrap_err(),
            InvalidCommandName::EmptyNamespace(":status".into())
        );
        assert_eq!(
            "fleet:".parse::<CommandName>().unwrap_err(),
            InvalidCommandName::EmptyName("fleet:".into())
        );
    }

    #[test]
    fn test_equality_uses_both_parts() {
        let a = CommandName::new("fleet", "status");
        let b = CommandName::new("demo", "status");
        assert_ne!(a, b);
        assert_eq!(a, CommandName::new("fleet", "status"));
        assert_eq!(a, "fleet:status");
        assert_ne!(a, "fleet:stop");
    }

    #[test]
    fn test_serde_string_form() {
        let name = CommandName::new("fleet", "status");
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"fleet:status\"");
        let back: CommandName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }

    #[test]
    fn test_deserialize_rejects_malformed() {
        assert!(serde_json::from_str::<CommandName>("\"status\"").is_err());
    }

    #[test]
    fn test_ordering_by_namespace_then_name() {
        let mut names = vec![
            CommandName::new("fleet", "stop"),
            CommandName::new("demo", "echo"),
            CommandName::new("fleet", "status"),
        ];
        names.sort();
        assert_eq!(names[0], "demo:echo");
        assert_eq!(names[1], "fleet:status");
        assert_eq!(names[2], "fleet:stop");
    }
}
