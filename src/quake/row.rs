//! Display rows: event records projected into table-ready text.

use super::store::EventRecord;
use chrono::TimeZone;
use std::fmt::Display;

/// Month/day/hour:minute:second/zone, e.g. `Nov/14/22:18:20/UTC`.
pub const TIME_FORMAT: &str = "%b/%d/%H:%M:%S/%Z";

/// Number of text columns in a display row.
pub const COLUMN_COUNT: usize = 5;

/// Column headings, in display order.
pub const COLUMN_TITLES: [&str; COLUMN_COUNT] = ["Time", "Magnitude", "Location", "Coordinates", "IDs"];

/// Magnitude band that picks a row's color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Below 4.0.
    Default,
    /// 4.0 up to 6.0.
    Elevated,
    /// 6.0 up to 7.0.
    High,
    /// 7.0 and above.
    Critical,
}

impl Severity {
    /// Band for a magnitude; an absent magnitude counts as zero.
    pub fn from_magnitude(magnitude: Option<f64>) -> Self {
        match magnitude.unwrap_or(0.0) {
            m if m >= 7.0 => Self::Critical,
            m if m >= 6.0 => Self::High,
            m if m >= 4.0 => Self::Elevated,
            _ => Self::Default,
        }
    }
}

/// One event as the table shows it.
///
/// Derived fresh from an [`EventRecord`] every cycle; never stored apart
/// from the table row it lands in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Event identifier; the table's dedup key.
    pub id: String,
    /// Origin time, epoch milliseconds; the table's ordering key.
    pub time_ms: Option<i64>,
    /// Formatted origin time.
    pub time: String,
    /// Magnitude to two decimals.
    pub magnitude: String,
    /// Free-text location.
    pub place: String,
    /// `lon lat depth`, or empty when the geometry is incomplete.
    pub coordinates: String,
    /// Related source ids.
    pub ids: String,
    /// Color band.
    pub severity: Severity,
}

impl DisplayRow {
    /// Project `record`, rendering its time in `tz`.
    ///
    /// Never fails: absent fields render as empty text or zero.
    pub fn project<Tz>(record: &EventRecord, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            id: record.id.clone(),
            time_ms: record.time_ms,
            time: record
                .time_ms
                .map(|ms| format_event_time(ms, tz))
                .unwrap_or_default(),
            magnitude: format!("{:.2}", record.magnitude.unwrap_or(0.0)),
            place: record.place.clone().unwrap_or_default(),
            coordinates: format_coordinates(&record.coordinates),
            ids: record
                .ids
                .as_deref()
                .map(|ids| ids.trim_matches(',').to_string())
                .unwrap_or_default(),
            severity: Severity::from_magnitude(record.magnitude),
        }
    }

    /// Cell text by column index, in [`COLUMN_TITLES`] order.
    pub fn column(&self, index: usize) -> Option<&str> {
        Some(match index {
            0 => &self.time,
            1 => &self.magnitude,
            2 => &self.place,
            3 => &self.coordinates,
            4 => &self.ids,
            _ => return None,
        })
    }
}

/// Format epoch milliseconds with [`TIME_FORMAT`], truncated to the second.
///
/// Out-of-range timestamps format as the empty string.
pub fn format_event_time<Tz>(time_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    tz.timestamp_opt(time_ms.div_euclid(1000), 0)
        .single()
        .map(|at| at.format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

/// The host's IANA zone, so `%Z` prints an abbreviation such as `JST`.
///
/// `None` when the host zone cannot be read or is unknown to the zone
/// database; callers fall back to `chrono::Local`, which prints a numeric
/// offset instead.
pub fn local_zone() -> Option<chrono_tz::Tz> {
    let name = iana_time_zone::get_timezone()
        .map_err(|e| tracing::warn!(error = %e, "host time zone unavailable"))
        .ok()?;
    name.parse()
        .map_err(|e| tracing::warn!(zone = %name, error = %e, "unknown time zone"))
        .ok()
}

fn format_coordinates(coordinates: &[f64]) -> String {
    match coordinates {
        [lon, lat, depth, ..] => format!("{lon:.6} {lat:.6} {depth:.6}"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn record() -> EventRecord {
        EventRecord {
            id: "us7000abcd".to_string(),
            time_ms: Some(1_700_000_300_999),
            magnitude: Some(5.9),
            place: Some("12 km SW of Anza, CA".to_string()),
            ids: Some(",us7000abcd,ci40000002,".to_string()),
            coordinates: vec![-116.77, 33.48, 11.2],
        }
    }

    #[test]
    fn test_project_full_record() {
        let row = DisplayRow::project(&record(), &Utc);

        assert_eq!(row.id, "us7000abcd");
        assert_eq!(row.time, "Nov/14/22:18:20/UTC");
        assert_eq!(row.magnitude, "5.90");
        assert_eq!(row.place, "12 km SW of Anza, CA");
        assert_eq!(row.coordinates, "-116.770000 33.480000 11.200000");
        assert_eq!(row.ids, "us7000abcd,ci40000002");
        assert_eq!(row.severity, Severity::Elevated);
    }

    #[test]
    fn test_project_sparse_record() {
        let sparse = EventRecord {
            id: "x".to_string(),
            time_ms: None,
            magnitude: None,
            place: None,
            ids: None,
            coordinates: vec![1.0, 2.0],
        };
        let row = DisplayRow::project(&sparse, &Utc);

        assert_eq!(row.time, "");
        assert_eq!(row.magnitude, "0.00");
        assert_eq!(row.place, "");
        assert_eq!(row.coordinates, "");
        assert_eq!(row.ids, "");
        assert_eq!(row.severity, Severity::Default);
    }

    #[test]
    fn test_time_uses_zone() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(format_event_time(1_700_000_300_000, &tokyo), "Nov/15/07:18:20/+09:00");
    }

    #[test]
    fn test_time_named_zone_prints_abbreviation() {
        assert_eq!(
            format_event_time(1_700_000_300_000, &chrono_tz::Asia::Tokyo),
            "Nov/15/07:18:20/JST"
        );
        assert_eq!(
            format_event_time(1_700_000_300_000, &chrono_tz::America::Denver),
            "Nov/14/15:18:20/MST"
        );
    }

    #[test]
    fn test_time_out_of_range_is_empty() {
        assert_eq!(format_event_time(i64::MAX, &Utc), "");
    }

    #[test]
    fn test_severity_bands() {
        assert_eq!(Severity::from_magnitude(Some(3.9)), Severity::Default);
        assert_eq!(Severity::from_magnitude(Some(4.0)), Severity::Elevated);
        assert_eq!(Severity::from_magnitude(Some(5.99)), Severity::Elevated);
        assert_eq!(Severity::from_magnitude(Some(6.5)), Severity::High);
        assert_eq!(Severity::from_magnitude(Some(7.0)), Severity::Critical);
        assert_eq!(Severity::from_magnitude(Some(7.1)), Severity::Critical);
        assert_eq!(Severity::from_magnitude(Some(-0.4)), Severity::Default);
        assert_eq!(Severity::from_magnitude(Some(f64::NAN)), Severity::Default);
    }

    #[test]
    fn test_columns_in_title_order() {
        let row = DisplayRow::project(&record(), &Utc);
        assert_eq!(row.column(1), Some("5.90"));
        assert_eq!(row.column(4), Some("us7000abcd,ci40000002"));
        assert_eq!(row.column(COLUMN_COUNT), None);
    }
}
