use crate::value::Value;
use derive_more::Deref;
use indexmap::IndexMap;

///
/// ValueMap
///
/// Insertion-ordered, string-keyed map used for JSON objects.
/// Keys are unique: inserting an existing key replaces its value in place,
/// so the rendered key order is the order of first insertion.
/// Equality ignores key order, as JSON object equality does.
///
/// `ValueMap` does not expose `DerefMut` to keep the uniqueness invariant.
///

#[derive(Clone, Debug, Default, Deref, PartialEq)]
pub struct ValueMap(IndexMap<String, Value>);

impl ValueMap {
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Insert `value` under `key`, returning the previous value if present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert only when `value` is present.
    pub fn insert_opt<V>(&mut self, key: impl Into<String>, value: Option<V>)
    where
        V: Into<Value>,
    {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<(String, Value)> {
        self.0.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for ValueMap
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl IntoIterator for ValueMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValueMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
