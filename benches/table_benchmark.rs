//! Table benchmark: cost of applying a fetch cycle to the table.
//!
//! The busiest summary feed (past day) carries a few hundred events; a
//! full cycle should stay well under a frame.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use quakewatch::quake::{DisplayRow, Severity};
use quakewatch::{upsert_row, QuakeTable, Rect};

fn row(i: u32) -> DisplayRow {
    DisplayRow {
        id: format!("ev{i}"),
        time_ms: Some(1_700_000_000_000 + i64::from(i) * 1_000),
        time: String::new(),
        magnitude: "2.50".to_string(),
        place: "Somewhere".to_string(),
        coordinates: String::new(),
        ids: String::new(),
        severity: Severity::Default,
    }
}

/// Rows in the order a cycle delivers them: oldest first.
fn cycle(n: u32) -> Vec<DisplayRow> {
    (0..n).map(row).collect()
}

fn first_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_cycle");

    for n in [50u32, 300, 1000] {
        let rows = cycle(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &rows, |b, rows| {
            b.iter(|| {
                let mut table = QuakeTable::new(Rect::from_size(160, 50));
                for row in rows {
                    upsert_row(&mut table, black_box(row));
                }
                table
            });
        });
    }

    group.finish();
}

fn repeat_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("repeat_cycle");

    for n in [50u32, 300, 1000] {
        let rows = cycle(n);

        // Every row already present: the steady state between new events
        group.bench_with_input(BenchmarkId::from_parameter(n), &rows, |b, rows| {
            b.iter_batched_ref(
                || {
                    let mut table = QuakeTable::new(Rect::from_size(160, 50));
                    for row in rows {
                        upsert_row(&mut table, row);
                    }
                    table
                },
                |table| {
                    for row in rows {
                        upsert_row(table, black_box(row));
                    }
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, first_cycle, repeat_cycle);
criterion_main!(benches);
