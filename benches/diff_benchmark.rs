//! Diff benchmark: cost of turning a dashboard frame into terminal output.
//!
//! Target: < 500µs for a 200×50 frame

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quakewatch::buffer::diff::{render_diff, render_full, DiffState};
use quakewatch::quake::{DisplayRow, Severity};
use quakewatch::{upsert_row, Buffer, Cell, QuakeTable, Rect, Rgb, Widget};

fn row(i: u16) -> DisplayRow {
    DisplayRow {
        id: format!("us7000{i:04}"),
        time_ms: Some(1_700_000_000_000 - i64::from(i) * 60_000),
        time: format!("Nov/14/22:{:02}:20/UTC", i % 60),
        magnitude: format!("{:.2}", f64::from(i % 80) / 10.0),
        place: format!("{i} km NNW of Somewhere, Alaska"),
        coordinates: "-150.123400 61.456700 12.300000".to_string(),
        ids: format!("us7000{i:04},ak0{i:04}"),
        severity: Severity::from_magnitude(Some(f64::from(i % 80) / 10.0)),
    }
}

/// A rendered table frame with `rows` events.
fn table_frame(width: u16, height: u16, rows: u16) -> Buffer {
    let mut table = QuakeTable::new(Rect::from_size(width, height));
    for i in 0..rows {
        upsert_row(&mut table, &row(i));
    }
    let mut buffer = Buffer::new(width, height);
    table.render(&mut buffer);
    buffer
}

fn diff_identical_frames(c: &mut Criterion) {
    let frame = table_frame(200, 50, 60);
    let same = frame.clone();

    c.bench_function("diff_200x50_identical", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(4096);
            let mut state = DiffState::new();
            render_diff(black_box(&frame), black_box(&same), &mut output, &mut state)
        });
    });
}

fn diff_one_new_event(c: &mut Criterion) {
    // A new event at the top shifts every visible row down by one
    let before = table_frame(200, 50, 60);
    let after = table_frame(200, 50, 61);

    c.bench_function("diff_200x50_row_inserted", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(65536);
            let mut state = DiffState::new();
            render_diff(black_box(&before), black_box(&after), &mut output, &mut state)
        });
    });
}

fn diff_single_cell_change(c: &mut Criterion) {
    let before = table_frame(200, 50, 60);
    let mut after = before.clone();
    after.set(100, 25, Cell::new('X').with_fg(Rgb::new(255, 0, 0)));

    c.bench_function("diff_200x50_single_change", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(4096);
            let mut state = DiffState::new();
            render_diff(black_box(&before), black_box(&after), &mut output, &mut state)
        });
    });
}

fn full_render(c: &mut Criterion) {
    let frame = table_frame(200, 50, 60);

    c.bench_function("render_full_200x50", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(65536);
            let mut state = DiffState::new();
            render_full(black_box(&frame), &mut output, &mut state);
            output
        });
    });
}

fn diff_various_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_by_size");

    for (width, height) in [(80, 24), (120, 40), (200, 50), (300, 80)] {
        let before = table_frame(width, height, height);
        let after = table_frame(width, height, height + 1);

        group.bench_with_input(
            BenchmarkId::new("row_inserted", format!("{width}x{height}")),
            &(before, after),
            |b, (before, after)| {
                b.iter(|| {
                    let mut output = Vec::with_capacity(65536);
                    let mut state = DiffState::new();
                    render_diff(black_box(before), black_box(after), &mut output, &mut state)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    diff_identical_frames,
    diff_one_new_event,
    diff_single_cell_change,
    full_render,
    diff_various_sizes,
);
criterion_main!(benches);
