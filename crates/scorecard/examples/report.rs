//! Example: Print the statistics and item indices for a score sheet.
//!
//! Usage:
//!   cargo run --example report -- <file_path>

use std::env;
use std::path::Path;

use scorecard::Scorecard;

fn main() -> scorecard::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example report -- <file_path>");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let report = Scorecard::new().analyze(path)?;

    let separator = "=".repeat(60);
    println!("{}", separator);
    println!("Scorecard: {}", report.source.file);
    println!("{}", separator);
    println!();

    println!(
        "## Source ({} rows, {} columns, {})",
        report.source.row_count, report.source.column_count, report.source.format
    );
    println!();

    if let Some(stats) = &report.stats {
        println!("## Statistics for '{}'", stats.column);
        let show = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_else(|| "-".into());
        println!("  Count:  {}", stats.count);
        println!("  Mean:   {}", show(stats.mean));
        println!("  Median: {}", show(stats.median));
        println!("  Mode:   {}", stats.mode.as_deref().unwrap_or("-"));
        println!("  Min:    {}", show(stats.min));
        println!("  Max:    {}", show(stats.max));
        println!("  Range:  {}", show(stats.range));
        println!();
    }

    if let Some(histogram) = &report.histogram {
        println!(
            "## Histogram: {} bins, {} byte PNG",
            histogram.spec.bin_count(),
            histogram.png.len()
        );
        println!();
    }

    if let Some(items) = &report.items {
        println!(
            "## Items (criterion '{}', {} per group)",
            items.criterion.name, items.group_size
        );
        for row in &items.rows {
            println!(
                "  {:12} p={:<5} {:15} D={:<5} {}",
                row.item,
                row.difficulty,
                row.difficulty_label.label(),
                row.discrimination,
                row.discrimination_label.label()
            );
        }
        println!();
    }

    for issue in &report.issues {
        println!("! {}", issue);
    }

    Ok(())
}
