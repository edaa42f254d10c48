//! Field collections used to configure a [`StatementBuilder`](crate::StatementBuilder).
//!
//! - [`FieldList`]: the ordered whitelist of column names a table exposes.
//! - [`FieldMap`]: an insertion-ordered map whose keys are compared
//!   case-insensitively, used for filters, sort order and update fields.
//!
//! The `Into*` traits let setters accept plain values as well as `Option`s;
//! `None` is how a caller hands over a missing argument.

use indexmap::IndexMap;
use std::fmt;

/// Ordered list of field (column) names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldList {
    names: Vec<String>,
}

impl FieldList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub(crate) fn join(&self, sep: &str) -> String {
        self.names.join(sep)
    }
}

impl<S: Into<String>> FromIterator<S> for FieldList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Entry<V> {
    key: String,
    value: V,
}

/// Insertion-ordered map keyed by field name, compared case-insensitively.
///
/// Inserting a key that differs only in case from an existing one replaces the
/// value in place; the first spelling and position of the key are kept.
#[derive(Clone, PartialEq)]
pub struct FieldMap<V> {
    entries: IndexMap<String, Entry<V>>,
}

fn fold(key: &str) -> String {
    key.to_lowercase()
}

impl<V> FieldMap<V> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.entries.get_mut(&fold(&key)) {
            Some(entry) => Some(std::mem::replace(&mut entry.value, value)),
            None => {
                self.entries.insert(fold(&key), Entry { key, value });
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(&fold(key)).map(|e| &e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&fold(key))
    }

    /// Keys in insertion order, as first spelled.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|e| e.key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values().map(|e| &e.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.values().map(|e| (e.key.as_str(), &e.value))
    }
}

impl<V> Default for FieldMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for FieldMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for FieldMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Convert an input into an optional name.
///
/// This is mainly for ergonomics in setter APIs.
pub trait IntoName {
    fn into_name(self) -> Option<String>;
}

impl IntoName for &str {
    fn into_name(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoName for String {
    fn into_name(self) -> Option<String> {
        Some(self)
    }
}

impl IntoName for &String {
    fn into_name(self) -> Option<String> {
        Some(self.clone())
    }
}

impl<T: IntoName> IntoName for Option<T> {
    fn into_name(self) -> Option<String> {
        self.and_then(IntoName::into_name)
    }
}

/// Convert an input into an optional [`FieldList`].
pub trait IntoFieldList {
    fn into_field_list(self) -> Option<FieldList>;
}

impl IntoFieldList for FieldList {
    fn into_field_list(self) -> Option<FieldList> {
        Some(self)
    }
}

impl<S: Into<String>> IntoFieldList for Vec<S> {
    fn into_field_list(self) -> Option<FieldList> {
        Some(self.into_iter().collect())
    }
}

impl<S: Into<String>, const N: usize> IntoFieldList for [S; N] {
    fn into_field_list(self) -> Option<FieldList> {
        Some(self.into_iter().collect())
    }
}

impl<S: AsRef<str>> IntoFieldList for &[S] {
    fn into_field_list(self) -> Option<FieldList> {
        Some(self.iter().map(|s| s.as_ref()).collect())
    }
}

impl<T: IntoFieldList> IntoFieldList for Option<T> {
    fn into_field_list(self) -> Option<FieldList> {
        self.and_then(IntoFieldList::into_field_list)
    }
}

/// Convert an input into an optional [`FieldMap`].
///
/// Pairs are inserted in order, so a later duplicate key (in any case) wins.
pub trait IntoFieldMap<V> {
    fn into_field_map(self) -> Option<FieldMap<V>>;
}

impl<V> IntoFieldMap<V> for FieldMap<V> {
    fn into_field_map(self) -> Option<FieldMap<V>> {
        Some(self)
    }
}

impl<K, T, V, const N: usize> IntoFieldMap<V> for [(K, T); N]
where
    K: Into<String>,
    T: Into<V>,
{
    fn into_field_map(self) -> Option<FieldMap<V>> {
        Some(self.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<K, T, V> IntoFieldMap<V> for Vec<(K, T)>
where
    K: Into<String>,
    T: Into<V>,
{
    fn into_field_map(self) -> Option<FieldMap<V>> {
        Some(self.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<K, T, V> IntoFieldMap<V> for IndexMap<K, T>
where
    K: Into<String>,
    T: Into<V>,
{
    fn into_field_map(self) -> Option<FieldMap<V>> {
        Some(self.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<V, M: IntoFieldMap<V>> IntoFieldMap<V> for Option<M> {
    fn into_field_map(self) -> Option<FieldMap<V>> {
        self.and_then(IntoFieldMap::into_field_map)
    }
}

/// Validates field names against the fields some type or table exposes.
pub trait FieldValidator {
    /// Name of the type or table the fields are checked against.
    fn containing_type(&self) -> &str;

    /// Whether `field` is supported, compared exactly.
    fn supports(&self, field: &str) -> bool;

    /// `true` if every field is supported.
    fn validate_fields(&self, fields: &[&str]) -> bool {
        fields.iter().all(|f| self.supports(f))
    }
}

/// Return the candidates missing from `whitelist`, in candidate order.
///
/// Matching is exact. Keys stored case-insensitively in a [`FieldMap`] are
/// still compared with their stored spelling here.
pub fn invalid_fields<'a>(
    candidates: impl IntoIterator<Item = &'a str>,
    whitelist: &FieldList,
) -> Vec<String> {
    candidates
        .into_iter()
        .filter(|c| !whitelist.contains(c))
        .map(str::to_string)
        .collect()
}
