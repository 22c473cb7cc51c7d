//! Key/value sources that environment variables are read from

use std::collections::HashMap;

/// Read-only lookup of environment values by exact key.
///
/// Implemented by [`OsEnv`] (the process environment), [`Map`] (a static
/// mapping for tests and fixtures) and any `Fn(&str) -> Option<String>`.
pub trait Source {
    /// Return the value of `key`, or `None` if it is not set.
    ///
    /// An empty value is still a present value.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEnv;

impl Source for OsEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        let value = std::env::var_os(key)?;
        match value.into_string() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(key, "ignoring environment variable that is not valid unicode");
                None
            }
        }
    }
}

/// A fixed in-memory set of variables.
///
/// ```rust
/// use envbind::{Map, Source};
///
/// let env = Map::from([("PORT", "8080")]);
/// assert_eq!(env.lookup("PORT").as_deref(), Some("8080"));
/// assert_eq!(env.lookup("HOST"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Map(HashMap<String, String>);

impl Map {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }
}

impl Source for Map {
    fn lookup(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Map {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl From<HashMap<String, String>> for Map {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl<F> Source for F
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<String> {
        self(key)
    }
}
