//! Ordered header map

use std::collections::BTreeMap;

/// Name of the header carrying resolved credentials
pub const AUTHORIZATION: &str = "Authorization";

/// Name of the content type header
pub const CONTENT_TYPE: &str = "Content-Type";

/// Ordered set of HTTP headers
///
/// Names compare ASCII case-insensitively, the way HTTP treats them. Inserting
/// a name that is already present replaces the old entry, including its
/// spelling, so that later header sources fully override earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Create an empty header set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, replacing any existing entry with the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => *entry = (name, value),
            None => self.entries.push((name, value)),
        }
    }

    /// Insert every header from `other`, later entries winning
    pub fn merge<I, K, V>(&mut self, other: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in other {
            self.insert(name, value);
        }
    }

    /// Value of the header `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Whether the header `name` is present
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove the header `name`, returning its value
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self
            .entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))?;
        Some(self.entries.remove(index).1)
    }

    /// Number of headers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no headers
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Snapshot as a sorted map, mostly useful for comparisons
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.entries.iter().cloned().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        headers.merge(iter);
        headers
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
