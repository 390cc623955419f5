//! Backup snapshot format
//!
//! A snapshot maps every stored key to its decoded JSON value. Entries whose
//! stored text is not valid JSON are exported as `{"$raw": "<text>"}` so that
//! importing the snapshot restores the exact text instead of saving it as a
//! JSON string. A stored object whose only field is `$raw` or `$value` is
//! wrapped as `{"$value": <object>}` so it cannot be mistaken for a marker.
//!
//! ```json
//! {
//!   "a": 1,
//!   "b": "x",
//!   "legacy": {"$raw": "not json"},
//!   "odd": {"$value": {"$raw": "x"}}
//! }
//! ```

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

const RAW_KEY: &str = "$raw";
const VALUE_KEY: &str = "$value";

/// Marker object for stored text that could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawEntry {
    /// Stored text, verbatim
    #[serde(rename = "$raw")]
    pub raw: String,
}

/// One snapshot entry
///
/// On the wire a raw entry is `{"$raw": text}` and a decoded value is the
/// value itself, except that a single-field object keyed `$raw` or `$value`
/// is wrapped in `{"$value": ...}`. Reading reverses both.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotValue {
    /// Stored text that failed to decode
    Raw(RawEntry),
    /// Decoded value
    Value(Value),
}

impl SnapshotValue {
    /// Builds the entry for stored text: decoded if possible, raw otherwise.
    pub fn from_stored(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(value) => SnapshotValue::Value(value),
            Err(_) => SnapshotValue::Raw(RawEntry {
                raw: text.to_string(),
            }),
        }
    }

    /// The decoded value, `None` for raw entries.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            SnapshotValue::Value(v) => Some(v),
            SnapshotValue::Raw(_) => None,
        }
    }

    /// Whether this entry holds undecodable text.
    pub fn is_raw(&self) -> bool {
        matches!(self, SnapshotValue::Raw(_))
    }
}

/// Whether `map` has the shape of a wire marker and must be wrapped.
fn looks_like_marker(map: &Map<String, Value>) -> bool {
    map.len() == 1 && (map.contains_key(RAW_KEY) || map.contains_key(VALUE_KEY))
}

impl Serialize for SnapshotValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SnapshotValue::Raw(entry) => entry.serialize(serializer),
            SnapshotValue::Value(Value::Object(map)) if looks_like_marker(map) => {
                let mut wrapper = serializer.serialize_map(Some(1))?;
                wrapper.serialize_entry(VALUE_KEY, map)?;
                wrapper.end()
            }
            SnapshotValue::Value(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for SnapshotValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Object(mut map) if map.len() == 1 => {
                if let Some(inner) = map.remove(VALUE_KEY) {
                    return Ok(SnapshotValue::Value(inner));
                }
                match map.get(RAW_KEY) {
                    Some(Value::String(raw)) => {
                        Ok(SnapshotValue::Raw(RawEntry { raw: raw.clone() }))
                    }
                    _ => Ok(SnapshotValue::Value(Value::Object(map))),
                }
            }
            other => Ok(SnapshotValue::Value(other)),
        }
    }
}

impl From<Value> for SnapshotValue {
    fn from(value: Value) -> Self {
        SnapshotValue::Value(value)
    }
}

/// Full store contents, keyed and sorted by store key
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: BTreeMap<String, SnapshotValue>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SnapshotValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Entry for `key`.
    pub fn get(&self, key: &str) -> Option<&SnapshotValue> {
        self.entries.get(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SnapshotValue)> {
        self.entries.iter()
    }

    /// Pretty-printed JSON backup document.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a backup document produced by [`Snapshot::to_json_string`].
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

impl FromIterator<(String, SnapshotValue)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, SnapshotValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
