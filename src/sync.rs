//! Table sync: place one display row into the live table.
//!
//! Rows are matched by event id first. A known id is updated where it
//! stands. A new id is inserted above the first row that is strictly
//! older, or at the bottom when there is none. Together these keep the
//! table newest-first with one row per id.
//!
//! Callers must hold exclusive access to the table; in the app that is
//! guaranteed by the main loop being the only owner.

use crate::quake::DisplayRow;
use crate::widget::{QuakeTable, TableRow};

/// Where an upsert put its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Existing row overwritten in place.
    Updated(usize),
    /// Existing row whose time changed enough to need a new position.
    Moved {
        /// Row it occupied before.
        from: usize,
        /// Row it occupies now.
        to: usize,
    },
    /// New row inserted at this position.
    Inserted(usize),
}

/// Ordering key for a row. An unknown time orders as the epoch, which keeps
/// the order total and parks such rows below every dated event.
const fn sort_key(time_ms: Option<i64>) -> i64 {
    match time_ms {
        Some(time_ms) => time_ms,
        None => 0,
    }
}

/// `existing` sorts strictly before (is older than) `incoming`.
const fn is_before(existing: Option<i64>, incoming: Option<i64>) -> bool {
    sort_key(existing) < sort_key(incoming)
}

/// First table row that `time_ms` should be inserted above.
pub fn insertion_point(table: &QuakeTable, time_ms: Option<i64>) -> usize {
    (1..table.row_count())
        .find(|&row| is_before(table.row_time(row), time_ms))
        .unwrap_or_else(|| table.row_count())
}

/// Whether `time_ms` can sit at `position` without breaking the order
/// against its neighbours.
fn fits_at(table: &QuakeTable, position: usize, time_ms: Option<i64>) -> bool {
    let above_ok = position == 1 || !is_before(table.row_time(position - 1), time_ms);
    let below_ok = !is_before(time_ms, table.row_time(position + 1));
    above_ok && below_ok
}

/// Insert or update `row` in `table`.
pub fn upsert_row(table: &mut QuakeTable, row: &DisplayRow) -> Placement {
    let placement = match table.find_row(&row.id) {
        Some(position) if fits_at(table, position, row.time_ms) => {
            table.set_row(position, TableRow::from(row));
            Placement::Updated(position)
        }
        Some(from) => {
            let was_selected = table.selected() == Some(from);
            table.remove_row(from);
            let to = table.insert_row(insertion_point(table, row.time_ms), TableRow::from(row));
            if was_selected {
                table.select(to);
            }
            Placement::Moved { from, to }
        }
        None => {
            let at = table.insert_row(insertion_point(table, row.time_ms), TableRow::from(row));
            Placement::Inserted(at)
        }
    };

    tracing::debug!(id = %row.id, ?placement, rows = table.len(), "row upserted");
    placement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Rect;
    use crate::quake::{EventStore, Reconciler, Severity};
    use crate::test_utils::{feature, snapshot};
    use crate::widget::TableConfig;
    use chrono::Utc;
    use std::collections::HashSet;

    fn table() -> QuakeTable {
        QuakeTable::new(Rect::new(0, 0, 140, 40))
    }

    fn display(id: &str, time_ms: i64, mag: f64) -> DisplayRow {
        let record = crate::quake::EventRecord::from(feature(id, time_ms, mag, "X"));
        DisplayRow::project(&record, &Utc)
    }

    fn undated(id: &str) -> crate::feed::Feature {
        let mut feature = feature(id, 0, 1.0, "X");
        feature.properties.time = None;
        feature
    }

    fn ids(table: &QuakeTable) -> Vec<&str> {
        table.rows().map(|r| r.id.as_str()).collect()
    }

    fn assert_invariants(table: &QuakeTable) {
        let times: Vec<_> = table.rows().map(|r| r.time_ms.unwrap_or(0)).collect();
        assert!(
            times.windows(2).all(|w| w[0] >= w[1]),
            "rows out of order: {times:?}"
        );
        let unique: HashSet<_> = table.rows().map(|r| &r.id).collect();
        assert_eq!(unique.len(), table.len(), "duplicate ids: {:?}", ids(table));
    }

    /// Apply one snapshot the way a fetch cycle does.
    fn cycle(
        reconciler: &Reconciler<Utc>,
        store: &mut EventStore,
        table: &mut QuakeTable,
        features: Vec<crate::feed::Feature>,
    ) {
        for row in reconciler.reconcile(snapshot(features), store) {
            upsert_row(table, &row);
        }
    }

    #[test]
    fn test_newer_goes_first() {
        let (reconciler, mut store, mut table) = (Reconciler::new(Utc), EventStore::new(), table());
        cycle(
            &reconciler,
            &mut store,
            &mut table,
            vec![feature("b", 2000, 1.0, "X"), feature("a", 1000, 1.0, "X")],
        );
        assert_eq!(ids(&table), ["b", "a"]);
    }

    #[test]
    fn test_update_keeps_single_row() {
        let (reconciler, mut store, mut table) = (Reconciler::new(Utc), EventStore::new(), table());
        cycle(&reconciler, &mut store, &mut table, vec![feature("a", 1000, 5.5, "X")]);
        cycle(&reconciler, &mut store, &mut table, vec![feature("a", 1000, 5.9, "X")]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.cell_text(1, 1), Some("5.90"));
        let severity = table.data_row(1).map(|r| r.severity);
        assert_eq!(severity, Some(Severity::Elevated));
        assert_eq!(
            TableConfig::default().severity_color(Severity::Elevated),
            TableConfig::default().elevated_fg
        );
    }

    #[test]
    fn test_insert_positions() {
        let mut table = table();
        assert_eq!(upsert_row(&mut table, &display("mid", 2000, 1.0)), Placement::Inserted(1));
        assert_eq!(upsert_row(&mut table, &display("new", 3000, 1.0)), Placement::Inserted(1));
        assert_eq!(upsert_row(&mut table, &display("old", 1000, 1.0)), Placement::Inserted(3));
        assert_eq!(upsert_row(&mut table, &display("mid2", 2500, 1.0)), Placement::Inserted(2));
        assert_eq!(ids(&table), ["new", "mid2", "mid", "old"]);
    }

    #[test]
    fn test_equal_times_first_encountered_wins() {
        let mut table = table();
        upsert_row(&mut table, &display("first", 1000, 1.0));
        upsert_row(&mut table, &display("second", 1000, 1.0));
        assert_eq!(ids(&table), ["first", "second"]);
    }

    #[test]
    fn test_update_in_place() {
        let mut table = table();
        upsert_row(&mut table, &display("b", 2000, 1.0));
        upsert_row(&mut table, &display("a", 1000, 1.0));
        assert_eq!(upsert_row(&mut table, &display("a", 1000, 4.2)), Placement::Updated(2));
        assert_eq!(table.cell_text(2, 1), Some("4.20"));
    }

    #[test]
    fn test_revised_time_moves_row() {
        let mut table = table();
        upsert_row(&mut table, &display("c", 3000, 1.0));
        upsert_row(&mut table, &display("b", 2000, 1.0));
        upsert_row(&mut table, &display("a", 1000, 1.0));

        let placement = upsert_row(&mut table, &display("a", 4000, 1.0));
        assert_eq!(placement, Placement::Moved { from: 3, to: 1 });
        assert_eq!(ids(&table), ["a", "c", "b"]);
        assert_invariants(&table);
    }

    #[test]
    fn test_selection_follows_moved_row() {
        let mut table = table();
        upsert_row(&mut table, &display("b", 2000, 1.0));
        upsert_row(&mut table, &display("a", 1000, 1.0));
        table.select(2);

        upsert_row(&mut table, &display("a", 3000, 1.0));
        assert_eq!(table.row_id(1), Some("a"));
        assert_eq!(table.selected(), Some(1));
    }

    #[test]
    fn test_unknown_time_sinks_to_bottom() {
        let mut table = table();
        let unknown = DisplayRow::project(&crate::quake::EventRecord::from(undated("u")), &Utc);
        upsert_row(&mut table, &display("a", 1000, 1.0));
        assert_eq!(upsert_row(&mut table, &unknown), Placement::Inserted(2));
        assert_eq!(table.cell_text(2, 0), Some(""));
    }

    #[test]
    fn test_dated_rows_stay_above_undated_row() {
        let (reconciler, mut store, mut table) = (Reconciler::new(Utc), EventStore::new(), table());
        cycle(&reconciler, &mut store, &mut table, vec![feature("a", 1000, 1.0, "X")]);
        cycle(&reconciler, &mut store, &mut table, vec![undated("u")]);
        cycle(&reconciler, &mut store, &mut table, vec![feature("b", 500, 1.0, "X")]);
        assert_eq!(ids(&table), ["a", "b", "u"]);

        cycle(&reconciler, &mut store, &mut table, vec![feature("b", 2000, 1.0, "X")]);
        assert_eq!(ids(&table), ["b", "a", "u"]);
        assert_invariants(&table);
    }

    #[test]
    fn test_reconcile_twice_is_idempotent() {
        let reconciler = Reconciler::new(Utc);
        let features = vec![
            feature("c", 3000, 7.1, "X"),
            feature("b", 2000, 6.5, "Y"),
            feature("a", 1000, 3.9, "Z"),
        ];

        let (mut once_store, mut once) = (EventStore::new(), table());
        cycle(&reconciler, &mut once_store, &mut once, features.clone());

        let (mut twice_store, mut twice) = (EventStore::new(), table());
        cycle(&reconciler, &mut twice_store, &mut twice, features.clone());
        cycle(&reconciler, &mut twice_store, &mut twice, features);

        assert_eq!(once.rows().collect::<Vec<_>>(), twice.rows().collect::<Vec<_>>());
        assert_eq!(
            twice.rows().map(|r| r.severity).collect::<Vec<_>>(),
            [Severity::Critical, Severity::High, Severity::Default]
        );
    }

    #[test]
    fn test_invariants_hold_under_random_upserts() {
        // xorshift: deterministic and dependency-free
        let mut state = 0x2545_F491_4F6C_DD1Du64;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };

        let mut table = table();
        let mut latest = std::collections::HashMap::new();
        for _ in 0..2_000 {
            let id = format!("ev{}", next() % 40);
            // one in five rows arrives without a time
            let time_ms = match next() % 500 {
                raw if raw % 5 == 0 => None,
                raw => Some(i64::try_from(raw).unwrap()),
            };
            let mag = f64::from(u32::try_from(next() % 90).unwrap()) / 10.0;
            let mut row = display(&id, time_ms.unwrap_or(0), mag);
            if time_ms.is_none() {
                row.time_ms = None;
                row.time.clear();
            }
            upsert_row(&mut table, &row);
            latest.insert(id, time_ms);
            assert_invariants(&table);
        }

        assert_eq!(table.len(), latest.len());
        for row in table.rows() {
            assert_eq!(Some(row.time_ms), latest.get(&row.id).copied());
        }
    }

    #[test]
    fn test_store_matches_latest_fetch() {
        let reconciler = Reconciler::new(Utc);
        let mut store = EventStore::new();
        let mut table = table();

        cycle(&reconciler, &mut store, &mut table, vec![feature("a", 1000, 2.0, "old place")]);
        cycle(
            &reconciler,
            &mut store,
            &mut table,
            vec![feature("b", 1500, 1.0, "X"), feature("a", 1000, 2.1, "new place")],
        );

        let record = store.get("a").unwrap();
        assert_eq!(record.magnitude, Some(2.1));
        assert_eq!(record.place.as_deref(), Some("new place"));
        assert_eq!(table.cell_text(table.find_row("a").unwrap(), 2), Some("new place"));
    }
}
