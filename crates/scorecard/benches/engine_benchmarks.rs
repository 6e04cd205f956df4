//! Analysis engine performance benchmarks.
//!
//! Measures statistics, binning, and item analysis on synthetic classes of
//! increasing size. Rendering is left out since it is dominated by the
//! raster backend.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scorecard::analysis::{analyze_items, compute_total_stats, HistogramSpec, DEFAULT_GROUP_FRACTION};
use scorecard::{DataTable, Parser};

/// Generate a class of `rows` examinees answering `items` dichotomous items.
fn generate_class(rows: usize, items: usize) -> DataTable {
    let mut rng = StdRng::seed_from_u64(27);
    let mut headers: Vec<String> = (1..=items).map(|i| format!("Q{}", i)).collect();
    headers.push("Total".to_string());

    let raw: Vec<Vec<String>> = (0..rows)
        .map(|_| {
            let ability: f64 = rng.gen_range(0.1..0.95);
            let answers: Vec<u32> = (0..items)
                .map(|_| u32::from(rng.gen_bool(ability)))
                .collect();
            let total: u32 = answers.iter().sum();

            let mut row: Vec<String> = answers.iter().map(|a| a.to_string()).collect();
            row.push(total.to_string());
            row
        })
        .collect();

    DataTable::from_raw(headers, raw)
}

fn bench_item_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("item_analysis");

    for rows in [30, 300, 3000].iter() {
        let table = generate_class(*rows, 40);

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &table, |b, table| {
            b.iter(|| analyze_items(black_box(table), DEFAULT_GROUP_FRACTION).unwrap())
        });
    }

    group.finish();
}

fn bench_total_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("total_stats");

    for rows in [30, 300, 3000].iter() {
        let table = generate_class(*rows, 10);

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &table, |b, table| {
            b.iter(|| compute_total_stats(black_box(table)).unwrap())
        });
    }

    group.finish();
}

fn bench_histogram_spec(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(95);
    let values: Vec<f64> = (0..5000).map(|_| rng.gen_range(0..=100) as f64).collect();

    c.bench_function("histogram_spec_5000", |b| {
        b.iter(|| HistogramSpec::from_values(black_box(&values)))
    });
}

fn bench_csv_pipeline(c: &mut Criterion) {
    let table = generate_class(300, 40);
    let mut csv = table.headers.join(",");
    csv.push('\n');
    for row in &table.rows {
        let line: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        csv.push_str(&line.join(","));
        csv.push('\n');
    }

    let parser = Parser::new();
    c.bench_function("parse_csv_300x41", |b| {
        b.iter(|| parser.parse_bytes(black_box(csv.as_bytes()), "bench.csv").unwrap())
    });

    // Histogram rendering is left out, see the module docs
    let (parsed, _) = parser.parse_bytes(csv.as_bytes(), "bench.csv").unwrap();
    c.bench_function("stats_and_items_300x41", |b| {
        b.iter(|| {
            let table = black_box(&parsed);
            (
                compute_total_stats(table).unwrap(),
                analyze_items(table, DEFAULT_GROUP_FRACTION).unwrap(),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_item_analysis,
    bench_total_stats,
    bench_histogram_spec,
    bench_csv_pipeline
);
criterion_main!(benches);
