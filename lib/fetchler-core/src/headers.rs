//! Ordered, case-insensitive header storage.
//!
//! [`HeaderStore`] keeps at most one value per header name, compared without
//! regard to ASCII case. Setting an existing name replaces its value in place,
//! so insertion order is stable across updates.
//!
//! # Example
//!
//! ```
//! use fetchler_core::HeaderStore;
//!
//! let mut headers = HeaderStore::new();
//! headers.set("Accept", "application/json");
//! headers.set("accept", "text/plain");
//!
//! assert_eq!(headers.len(), 1);
//! assert_eq!(headers.get("ACCEPT"), Some("text/plain"));
//! ```

/// `Authorization` header name.
pub const AUTHORIZATION: &str = "Authorization";

/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Ordered mapping from header name to value, case-insensitive on names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderStore {
    entries: Vec<(String, String)>,
}

impl HeaderStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(key, _)| key.eq_ignore_ascii_case(name))
    }

    /// Sets a header, replacing any value already stored under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(index) => {
                if let Some(entry) = self.entries.get_mut(index) {
                    *entry = (name, value);
                }
            }
            None => self.entries.push((name, value)),
        }
    }

    /// Value stored under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` if a value is stored under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Removes `name`, returning the value it held.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name)
            .map(|index| self.entries.remove(index).1)
    }

    /// Sets every entry of `other` on top of this store, in order.
    pub fn merge(&mut self, other: &Self) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no headers are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Extend<(K, V)> for HeaderStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for HeaderStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        headers.extend(iter);
        headers
    }
}

impl IntoIterator for HeaderStore {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
