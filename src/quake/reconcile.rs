//! Reconciler: merge a fresh snapshot into the event store.

use super::row::DisplayRow;
use super::store::{EventRecord, EventStore, Upserted};
use crate::feed::FeedSnapshot;
use chrono::TimeZone;
use std::fmt::Display;

/// Turns snapshots into the rows the table should apply, in order.
#[derive(Debug, Clone)]
pub struct Reconciler<Tz> {
    tz: Tz,
}

impl<Tz> Reconciler<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// A reconciler that renders times in `tz`.
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Merge `snapshot` into `store` and return one row per feature.
    ///
    /// The feed lists newest first; rows come back oldest first so that,
    /// applied in order, the newest event is placed last and ends up
    /// nearest the top of the table. Every feature overwrites its store
    /// entry and yields a row, whether or not anything changed.
    pub fn reconcile(&self, snapshot: FeedSnapshot, store: &mut EventStore) -> Vec<DisplayRow> {
        let mut rows = Vec::with_capacity(snapshot.features.len());
        let (mut new, mut replaced) = (0usize, 0usize);

        for feature in snapshot.features.into_iter().rev() {
            let record = EventRecord::from(feature);
            rows.push(DisplayRow::project(&record, &self.tz));
            match store.upsert(record) {
                Upserted::New => new += 1,
                Upserted::Replaced => replaced += 1,
            }
        }

        tracing::debug!(new, replaced, known = store.len(), "snapshot reconciled");
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{feature, snapshot};
    use chrono::Utc;

    #[test]
    fn test_rows_come_back_oldest_first() {
        let mut store = EventStore::new();
        let rows = Reconciler::new(Utc).reconcile(
            snapshot(vec![
                feature("c", 3000, 1.0, "C"),
                feature("b", 2000, 1.0, "B"),
                feature("a", 1000, 1.0, "A"),
            ]),
            &mut store,
        );

        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_store_holds_latest_record() {
        let reconciler = Reconciler::new(Utc);
        let mut store = EventStore::new();

        reconciler.reconcile(snapshot(vec![feature("a", 1000, 5.5, "X")]), &mut store);
        let rows = reconciler.reconcile(snapshot(vec![feature("a", 1000, 5.9, "X")]), &mut store);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").and_then(|r| r.magnitude), Some(5.9));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].magnitude, "5.90");
    }

    #[test]
    fn test_unchanged_features_still_emit_rows() {
        let reconciler = Reconciler::new(Utc);
        let mut store = EventStore::new();
        let snap = snapshot(vec![feature("a", 1000, 2.0, "X")]);

        reconciler.reconcile(snap.clone(), &mut store);
        assert_eq!(reconciler.reconcile(snap, &mut store).len(), 1);
    }

    #[test]
    fn test_empty_snapshot() {
        let mut store = EventStore::new();
        assert!(Reconciler::new(Utc).reconcile(FeedSnapshot::default(), &mut store).is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_missing_ids_render_empty() {
        let mut store = EventStore::new();
        let mut sparse = feature("a", 1000, 2.0, "X");
        sparse.properties.ids = None;
        sparse.geometry = None;

        let rows = Reconciler::new(Utc).reconcile(snapshot(vec![sparse]), &mut store);
        assert_eq!(rows[0].ids, "");
        assert_eq!(rows[0].coordinates, "");
    }
}
