use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One request header.
///
/// Headers are applied in order and a later header replaces an earlier one
/// with the same name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Flatten a list of `{name: value}` objects, as scripts pass them, into
    /// headers. Each object usually holds one pair; extra pairs follow in key
    /// order.
    pub fn from_objects(objects: Vec<BTreeMap<String, String>>) -> Vec<Header> {
        objects
            .into_iter()
            .flat_map(|object| object.into_iter().map(|(name, value)| Header { name, value }))
            .collect()
    }
}

/// The parts of a response a script host cares about.
///
/// The body is read as text regardless of status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
