//! Query and form parameter shaping.
//!
//! The WebUI API is picky about list encoding: hashes are `|`-separated,
//! tags `,`-separated and tracker URLs one per line. [`join`] with the
//! separator constants below keeps each endpoint explicit about which one it
//! uses.

use crate::client::QbitError::InvalidInput;
use crate::client::Result;
use serde::{Serialize, Serializer};
use serde_json::Value;

pub(crate) const PIPE: &str = "|";
pub(crate) const COMMA: &str = ",";
pub(crate) const NEWLINE: &str = "\n";

const ALL: &str = "all";

/// Ordered list of key/value pairs sent as a query string or a form body.
///
/// Keys may repeat; a repeated key is sent once per value, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single value
    #[must_use]
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    /// Appends the value only when present
    #[must_use]
    pub fn with_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Appends `key` once per value, never joining them
    #[must_use]
    pub fn with_each<I>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.0.extend(
            values
                .into_iter()
                .map(|value| (key.to_string(), value.to_string())),
        );
        self
    }

    /// Flattens a serializable record into pairs.
    ///
    /// `None` fields are skipped, arrays repeat their key, strings are sent
    /// raw and nested objects as JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` does not serialize to a JSON object
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let Value::Object(fields) = serde_json::to_value(value)? else {
            return Err(InvalidInput(
                "parameters must serialize to an object".into(),
            ));
        };

        let mut params = Self::new();
        for (key, value) in fields {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    params = params.with_each(&key, items.iter().map(scalar));
                }
                other => params = params.with(&key, scalar(&other)),
            }
        }
        Ok(params)
    }

    /// Adds every pair of `other` after the current ones
    #[must_use]
    pub fn extend(mut self, other: Params) -> Self {
        self.0.extend(other.0);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }

    /// First value stored under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl IntoIterator for Params {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Joins list items with one of the API separators
pub(crate) fn join<I>(items: I, separator: &str) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut joined = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            joined.push_str(separator);
        }
        joined.push_str(item.as_ref());
    }
    joined
}

/// Serializes an optional list as a single comma-separated string
pub(crate) fn comma_joined<S: Serializer>(
    items: &Option<Vec<String>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match items {
        Some(items) => serializer.serialize_str(&join(items, COMMA)),
        None => serializer.serialize_none(),
    }
}

/// Torrents targeted by an operation: an explicit list of hashes or every torrent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hashes {
    All,
    List(Vec<String>),
}

impl Hashes {
    /// Wire form: `all`, or the hashes joined with `|`
    #[must_use]
    pub fn to_param(&self) -> String {
        match self {
            Hashes::All => ALL.to_string(),
            Hashes::List(hashes) => join(hashes, PIPE),
        }
    }
}

impl Serialize for Hashes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_param())
    }
}

impl From<&str> for Hashes {
    fn from(hash: &str) -> Self {
        if hash == ALL {
            Hashes::All
        } else {
            Hashes::List(vec![hash.to_string()])
        }
    }
}

impl From<String> for Hashes {
    fn from(hash: String) -> Self {
        Hashes::from(hash.as_str())
    }
}

impl From<&String> for Hashes {
    fn from(hash: &String) -> Self {
        Hashes::from(hash.as_str())
    }
}

impl From<Vec<String>> for Hashes {
    fn from(hashes: Vec<String>) -> Self {
        Hashes::List(hashes)
    }
}

impl From<Vec<&str>> for Hashes {
    fn from(hashes: Vec<&str>) -> Self {
        Hashes::from(hashes.as_slice())
    }
}

impl From<&[&str]> for Hashes {
    fn from(hashes: &[&str]) -> Self {
        Hashes::List(hashes.iter().map(ToString::to_string).collect())
    }
}

impl From<&[String]> for Hashes {
    fn from(hashes: &[String]) -> Self {
        Hashes::List(hashes.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for Hashes {
    fn from(hashes: [&str; N]) -> Self {
        Hashes::from(hashes.as_slice())
    }
}
