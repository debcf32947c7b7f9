//! GeoJSON feature-collection types for the USGS summary feeds.
//!
//! Only `id` is required on a feature; every property may be absent or
//! `null` in the upstream document and decodes to `None`/default.

use serde::Deserialize;

/// One decoded response from the feed endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeedSnapshot {
    /// Always `"FeatureCollection"` upstream.
    #[serde(rename = "type")]
    pub kind: String,
    /// Collection metadata.
    pub metadata: Metadata,
    /// Events, newest first as served by USGS.
    pub features: Vec<Feature>,
}

/// Feature-collection metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Generation time, epoch milliseconds.
    pub generated: Option<i64>,
    /// Feed URL.
    pub url: Option<String>,
    /// Human-readable feed title.
    pub title: Option<String>,
    /// Feed API version.
    pub api: Option<String>,
    /// Number of features.
    pub count: Option<u64>,
    /// HTTP status reported by the feed generator.
    pub status: Option<u16>,
}

/// One seismic event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    /// Stable event identifier.
    pub id: String,
    /// Event properties.
    #[serde(default)]
    pub properties: Properties,
    /// Event location; GeoJSON allows `null` here.
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl Feature {
    /// `[longitude, latitude, depth_km]` when present, possibly shorter.
    pub fn coordinates(&self) -> &[f64] {
        self.geometry
            .as_ref()
            .map_or(&[], |geometry| geometry.coordinates.as_slice())
    }
}

/// Event properties.
///
/// All fields of the published schema are carried, though only a few are
/// displayed.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Properties {
    pub mag: Option<f64>,
    pub place: Option<String>,
    /// Origin time, epoch milliseconds.
    pub time: Option<i64>,
    pub updated: Option<i64>,
    pub tz: Option<i64>,
    pub url: Option<String>,
    pub detail: Option<String>,
    pub felt: Option<i64>,
    pub cdi: Option<f64>,
    pub mmi: Option<f64>,
    pub alert: Option<String>,
    pub status: Option<String>,
    pub tsunami: Option<i64>,
    pub sig: Option<i64>,
    pub net: Option<String>,
    pub code: Option<String>,
    /// Comma-delimited list of associated event ids, e.g. `",us7000a,ak02b,"`.
    pub ids: Option<String>,
    pub sources: Option<String>,
    pub types: Option<String>,
    pub nst: Option<i64>,
    pub dmin: Option<f64>,
    pub rms: Option<f64>,
    pub gap: Option<f64>,
    pub mag_type: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub title: Option<String>,
}

/// Event geometry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Geometry {
    /// Always `"Point"` upstream.
    #[serde(rename = "type")]
    pub kind: String,
    /// `[longitude, latitude, depth_km]`, possibly shorter.
    pub coordinates: Vec<f64>,
}
