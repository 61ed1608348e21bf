use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Slot carrying the zone (control server client) name.
pub const ZONE_SLOT: &str = "zone";
/// Slot carrying a media title.
pub const MEDIA_SLOT: &str = "media";
/// Slot carrying a broadcast channel name.
pub const CHANNEL_SLOT: &str = "channel";

/// Free-form parameters the platform extracted from the utterance.
///
/// Empty values are dropped on insert, so a present slot always has text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slots {
    values: HashMap<String, String>,
}

impl Slots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            return;
        }
        self.values.insert(name.into(), value);
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn zone(&self) -> Option<&str> {
        self.get(ZONE_SLOT)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Slots {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut slots = Slots::new();
        for (k, v) in iter {
            slots.insert(k, v);
        }
        slots
    }
}

/// JSON reply from the control server.
///
/// Every endpoint shares one shape; which optional fields are set depends on
/// the endpoint and on whether the action succeeded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_deck_items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<PlayResult>,
    /// Opaque error descriptor; any non-empty value counts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
    /// Title the server could not resolve.
    #[serde(
        default,
        deserialize_with = "text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    /// Client name the server could not resolve.
    #[serde(
        default,
        deserialize_with = "text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub client: Option<String>,
}

impl ActionResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn failed() -> Self {
        Self::default()
    }

    pub fn has_error(&self) -> bool {
        match &self.error {
            None | Some(serde_json::Value::Null) | Some(serde_json::Value::Bool(false)) => false,
            Some(serde_json::Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    pub fn missing_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }

    pub fn missing_client(&self) -> Option<&str> {
        self.client.as_deref().filter(|s| !s.is_empty())
    }
}

/// What the server started playing, and where.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayResult {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub client: String,
}

/// Accept strings and numbers; anything else reads as absent.
fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn text_or_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    text_or_number(deserializer).map(Option::unwrap_or_default)
}
