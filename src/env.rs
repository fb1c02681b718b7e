//! Key/value environments shared between layers.
//!
//! One global environment accumulates settings across the whole run; each layer
//! gets a fresh local environment for its own overrides. Three write disciplines
//! exist:
//!
//! ```text
//! insert   first writer wins, later writers are warned and ignored
//! fill     set only if absent, silently
//! replace  always overwrite
//! ```

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Environment {
    params: IndexMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an environment from ordered pairs; repeated keys keep the first value.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut env = Self::new();
        for (key, value) in pairs {
            env.insert(key, value);
        }
        env
    }

    /// Set `key` unless it is already present. Returns `false` (and warns) on conflict.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if let Some(existing) = self.params.get(&key) {
            warn!(key = %key, kept = %existing, "key already set, ignoring");
            return false;
        }
        self.params.insert(key, value.into());
        true
    }

    pub fn fill(&mut self, key: impl Into<String>, default: impl Into<String>) {
        self.params.entry(key.into()).or_insert_with(|| default.into());
    }

    pub fn replace(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> &str {
        self.get_or(key, "")
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.params.get(key).map(String::as_str).unwrap_or(default)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Entries in the order they were first written.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
