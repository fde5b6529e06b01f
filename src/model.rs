//! Records produced from a run report.
//!
//! Every map keeps report order when serialized, so the JSON reads top to
//! bottom the way the HTML does.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Insertion-ordered string-keyed map.
///
/// Re-inserting an existing key replaces the value in place, the key keeps
/// its original position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for FieldMap<V> {
    fn default() -> Self {
        FieldMap {
            entries: Vec::new(),
        }
    }
}

impl<V> FieldMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the replaced value if `key` was already present.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Insert every entry of `other`, in its order.
    pub fn extend(&mut self, other: FieldMap<V>) {
        for (k, v) in other.entries {
            self.insert(k, v);
        }
    }
}

impl<V: Serialize> Serialize for FieldMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct FieldMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for FieldMapVisitor<V> {
    type Value = FieldMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map with string keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut out = FieldMap::new();
        while let Some((k, v)) = access.next_entry::<String, V>()? {
            out.insert(k, v);
        }
        Ok(out)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for FieldMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FieldMapVisitor(PhantomData))
    }
}

/// Field name -> value, positional fields first, then labelled fields.
pub type StatsRecord = FieldMap<String>;

/// Barcode id (no leading zero) -> read count.
pub type BarcodeRecord = FieldMap<String>;

/// Timestamp -> event. A repeated timestamp keeps only the last event.
pub type EventLogRecord = FieldMap<Event>;

/// One event-log entry, serialized as `{subject: message}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub subject: String,
    pub message: String,
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.subject, &self.message)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = FieldMap::<String>::deserialize(deserializer)?;
        if map.len() != 1 {
            return Err(de::Error::invalid_length(map.len(), &"exactly one subject"));
        }
        let (subject, message) = map
            .entries
            .into_iter()
            .next()
            .ok_or_else(|| de::Error::invalid_length(0, &"exactly one subject"))?;
        Ok(Event { subject, message })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub stats: StatsRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode_reads: Option<BarcodeRecord>,
    pub event_log: EventLogRecord,
}

impl RunReport {
    /// Convenience lookup into `stats`.
    pub fn stat(&self, key: &str) -> Option<&str> {
        self.stats.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_first_position() {
        let mut m = FieldMap::new();
        m.insert("b", 1);
        m.insert("a", 2);
        assert_eq!(m.insert("b", 3), Some(1));
        let keys: Vec<_> = m.keys().collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(m.get("b"), Some(&3));
    }

    #[test]
    fn serializes_in_insertion_order() {
        let mut m = FieldMap::new();
        m.insert("zeta", "1".to_string());
        m.insert("alpha", "2".to_string());
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":"2"}"#);
    }

    #[test]
    fn event_is_single_entry_object() {
        let ev = Event {
            subject: "Disk space".into(),
            message: "Low".into(),
        };
        assert_eq!(serde_json::to_string(&ev).unwrap(), r#"{"Disk space":"Low"}"#);
        let back: Event = serde_json::from_str(r#"{"Disk space":"Low"}"#).unwrap();
        assert_eq!(back, ev);
        assert!(serde_json::from_str::<Event>(r#"{"a":"1","b":"2"}"#).is_err());
    }

    #[test]
    fn barcode_reads_omitted_when_absent() {
        let report = RunReport {
            stats: FieldMap::new(),
            barcode_reads: None,
            event_log: FieldMap::new(),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("barcode_reads").is_none());
        let back: RunReport = serde_json::from_value(value).unwrap();
        assert_eq!(back, report);
    }
}
