//! Property environment supplied to an evaluation pass

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The property map a constraint is evaluated against.
///
/// Built fresh by the caller for each placement candidate. Evaluation is
/// destructive: every property a comparison resolves is removed, so after a
/// pass [`Environment::remaining`] lists the properties the constraint never
/// looked at, and evaluating again against the same instance fails for every
/// property already consumed.
///
/// # Example
///
/// ```
/// use fabric_constraint::Environment;
///
/// let mut env = Environment::new();
/// env.define("NodeType", "FrontEnd");
/// env.define("Memory", "64");
///
/// assert_eq!(env.take("NodeType").as_deref(), Some("FrontEnd"));
/// assert_eq!(env.take("NodeType"), None); // consumed
/// assert_eq!(env.remaining(), vec!["Memory"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment {
    /// Properties in insertion order
    properties: IndexMap<String, String>,
}

impl Environment {
    /// Create a new empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a property, replacing any existing value.
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Builder form of [`Environment::define`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.define(name, value);
        self
    }

    /// Look up a property without consuming it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Check if a property is still present.
    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Remove a property and return its value.
    ///
    /// The order of the remaining properties is preserved.
    pub fn take(&mut self, name: &str) -> Option<String> {
        self.properties.shift_remove(name)
    }

    /// Remove a property, returning whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.take(name).is_some()
    }

    /// Names of the properties still present.
    pub fn remaining(&self) -> Vec<&str> {
        self.names().collect()
    }

    /// Iterate over property names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Get the number of properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Check if the environment is empty.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Remove every property.
    pub fn clear(&mut self) {
        self.properties.clear();
    }

    /// Add every pair from `other`, overriding existing values.
    pub fn extend<K, V>(&mut self, other: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in other {
            self.define(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Environment::new();
        env.extend(iter);
        env
    }
}

impl From<HashMap<String, String>> for Environment {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}
