//! Shared fixtures for unit tests.

use crate::feed::{Feature, FeedSnapshot, Geometry, Metadata, Properties};

/// A feature with the fields the table displays.
pub fn feature(id: &str, time_ms: i64, mag: f64, place: &str) -> Feature {
    Feature {
        id: id.to_string(),
        properties: Properties {
            mag: Some(mag),
            place: Some(place.to_string()),
            time: Some(time_ms),
            ids: Some(format!(",{id},")),
            ..Properties::default()
        },
        geometry: Some(Geometry {
            kind: "Point".to_string(),
            coordinates: vec![-150.0, 61.0, 10.0],
        }),
    }
}

/// A snapshot listing `features` in the order given (the feed's newest-first order).
pub fn snapshot(features: Vec<Feature>) -> FeedSnapshot {
    FeedSnapshot {
        kind: "FeatureCollection".to_string(),
        metadata: Metadata {
            title: Some("USGS All Earthquakes, Past Hour".to_string()),
            ..Metadata::default()
        },
        features,
    }
}
