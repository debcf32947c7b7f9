//! Event records and the store of every event seen so far.

use crate::feed::Feature;
use std::collections::HashMap;

/// The fields of a feed feature that the table cares about.
///
/// Records are immutable; a later record with the same id replaces the
/// earlier one wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Stable event identifier.
    pub id: String,
    /// Origin time, epoch milliseconds.
    pub time_ms: Option<i64>,
    /// Magnitude.
    pub magnitude: Option<f64>,
    /// Free-text location.
    pub place: Option<String>,
    /// Comma-joined related source ids.
    pub ids: Option<String>,
    /// `[longitude, latitude, depth_km]`, possibly shorter.
    pub coordinates: Vec<f64>,
}

impl From<Feature> for EventRecord {
    fn from(feature: Feature) -> Self {
        let coordinates = feature.coordinates().to_vec();
        let props = feature.properties;
        Self {
            id: feature.id,
            time_ms: props.time,
            magnitude: props.mag,
            place: props.place,
            ids: props.ids,
            coordinates,
        }
    }
}

/// Outcome of [`EventStore::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    /// First time this id was seen.
    New,
    /// An earlier record was overwritten.
    Replaced,
}

/// Last-known record per event id.
///
/// Grows monotonically for the life of the process; nothing is evicted.
#[derive(Debug, Default)]
pub struct EventStore {
    records: HashMap<String, EventRecord>,
}

impl EventStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record`, unconditionally replacing any earlier one with its id.
    pub fn upsert(&mut self, record: EventRecord) -> Upserted {
        match self.records.insert(record.id.clone(), record) {
            Some(_) => Upserted::Replaced,
            None => Upserted::New,
        }
    }

    /// The last record stored for `id`.
    pub fn get(&self, id: &str) -> Option<&EventRecord> {
        self.records.get(id)
    }

    /// Number of distinct ids seen.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, mag: f64) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            time_ms: Some(1_000),
            magnitude: Some(mag),
            place: Some("X".to_string()),
            ids: None,
            coordinates: Vec::new(),
        }
    }

    #[test]
    fn test_upsert_new_then_replaced() {
        let mut store = EventStore::new();
        assert!(store.is_empty());

        assert_eq!(store.upsert(record("a", 5.5)), Upserted::New);
        assert_eq!(store.upsert(record("a", 5.9)), Upserted::Replaced);
        assert_eq!(store.upsert(record("b", 1.0)), Upserted::New);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a").and_then(|r| r.magnitude), Some(5.9));
    }

    #[test]
    fn test_identical_record_still_replaces() {
        let mut store = EventStore::new();
        store.upsert(record("a", 5.5));
        assert_eq!(store.upsert(record("a", 5.5)), Upserted::Replaced);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_record_from_sparse_feature() {
        let feature: Feature = serde_json::from_str(r#"{"id":"x1","properties":{}}"#).unwrap();
        let record = EventRecord::from(feature);
        assert_eq!(record.id, "x1");
        assert_eq!(record.time_ms, None);
        assert!(record.coordinates.is_empty());
    }
}
