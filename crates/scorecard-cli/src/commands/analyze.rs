//! Analyze command - print statistics, histogram, and item indices for a file.

use std::path::PathBuf;

use colored::Colorize;
use scorecard::{ExamReport, IndexTable, Scorecard, ScorecardConfig, StatsSummary};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct IndexLine {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Index")]
    value: String,
    #[tabled(rename = "Interpretation")]
    interpretation: &'static str,
}

pub fn run(
    file: PathBuf,
    json: bool,
    output: Option<PathBuf>,
    histogram: Option<PathBuf>,
    group_fraction: f64,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let config = ScorecardConfig::default().with_group_fraction(group_fraction);
    let scorecard = Scorecard::with_config(config)?;

    if !json {
        println!(
            "{} {}",
            "Analyzing".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let report = scorecard.analyze(&file)?;

    if let Some(path) = &output {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
    }

    if let Some(path) = &histogram {
        match &report.histogram {
            Some(image) => std::fs::write(path, &image.png)?,
            None => log::warn!("no histogram was produced, {} not written", path.display()),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if verbose {
        println!(
            "  {} rows x {} columns ({}), {}",
            report.source.row_count,
            report.source.column_count,
            report.source.format,
            report.source.hash
        );
    }
    println!();

    print_report(&report);

    if let Some(path) = &output {
        println!(
            "{} {}",
            "Saved report to".green().bold(),
            path.display().to_string().white()
        );
    }
    if let (Some(path), Some(_)) = (&histogram, &report.histogram) {
        println!(
            "{} {}",
            "Saved histogram to".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}

fn print_report(report: &ExamReport) {
    if let Some(stats) = &report.stats {
        print_stats(stats);
    }

    if let Some(items) = &report.items {
        println!(
            "{} ranked by '{}', {} examinees per group",
            "Item analysis".yellow().bold(),
            items.criterion.name,
            items.group_size
        );
        println!();
        print_index_table(&items.difficulty_table());
        print_index_table(&items.discrimination_table());
    }

    if !report.issues.is_empty() {
        println!("{}", "Issues:".red().bold());
        for issue in &report.issues {
            println!("  {}", issue);
        }
        println!();
    }
}

fn print_stats(stats: &StatsSummary) {
    let show = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());

    println!("{} {}", "Statistics for".yellow().bold(), stats.column.white());
    println!("  Count:  {}", stats.count.to_string().white().bold());
    println!("  Mean:   {}", show(stats.mean));
    println!("  Median: {}", show(stats.median));
    println!("  Min:    {}", show(stats.min));
    println!("  Max:    {}", show(stats.max));
    println!("  Range:  {}", show(stats.range));
    println!("  Mode:   {}", stats.mode.as_deref().unwrap_or("-"));
    println!();
}

fn print_index_table(table: &IndexTable) {
    println!("{}", table.title.cyan().bold());

    if table.is_empty() {
        println!("  {}", "No numeric item columns".dimmed());
        println!();
        return;
    }

    let lines: Vec<IndexLine> = table
        .rows
        .iter()
        .map(|r| IndexLine {
            item: r.item.clone(),
            value: format!("{:.2}", r.value),
            interpretation: r.interpretation,
        })
        .collect();

    println!("{}", Table::new(lines).with(Style::rounded()));
    println!();
}
