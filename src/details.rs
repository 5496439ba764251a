//! Category-specific payment details and their stored encoding.
//!
//! Details are stored as a JSON object and decoded with a plain parser.
//! Stored text is data only; nothing in it is ever evaluated.

use crate::error::Result;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// An insertion-ordered mapping of string keys to string values.
///
/// Receipts print details in the order they were collected, so the mapping
/// keeps that order. Equality compares keys and values regardless of order.
#[derive(Debug, Clone, Default)]
pub struct PaymentDetails {
    entries: Vec<(String, String)>,
}

impl PaymentDetails {
    pub fn new() -> Self {
        PaymentDetails::default()
    }

    /// Inserts a key/value pair.
    ///
    /// An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encodes the details into their stored text form.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes details from their stored text form.
    ///
    /// The text must be a JSON object. Non-string values are accepted and
    /// read back as text: `null` becomes the empty string, anything else
    /// becomes its JSON rendering.
    pub fn decode(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl PartialEq for PaymentDetails {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for PaymentDetails {}

impl<K, V> FromIterator<(K, V)> for PaymentDetails
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut details = PaymentDetails::new();
        for (key, value) in iter {
            details.insert(key, value);
        }
        details
    }
}

impl Serialize for PaymentDetails {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PaymentDetails {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DetailsVisitor)
    }
}

struct DetailsVisitor;

impl<'de> Visitor<'de> for DetailsVisitor {
    type Value = PaymentDetails;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of payment details")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut details = PaymentDetails::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            details.insert(key, value_to_text(value));
        }
        Ok(details)
    }
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
