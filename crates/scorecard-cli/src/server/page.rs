//! Server-rendered results page.

use std::fmt::Write;

use scorecard::{ExamReport, IndexTable, StatsSummary};

/// How often the page pings `/api/ping`, in milliseconds.
const PING_INTERVAL_MS: u64 = 2000;

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Scorecard - Exam Analysis</title>
<style>
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 960px; color: #222; }
h1 { font-size: 1.6rem; }
.error { background: #fdecea; border: 1px solid #f5c2c0; padding: .75rem 1rem; margin: 1rem 0; }
table { border-collapse: collapse; margin: 1rem 0; }
th, td { border: 1px solid #ccc; padding: .35rem .75rem; text-align: left; }
th { background: #f3f5f8; }
img { max-width: 100%; border: 1px solid #ddd; }
</style>
</head>
<body>
<h1>Exam Score Analysis</h1>
<form method="post" action="/" enctype="multipart/form-data">
<input type="file" name="file" accept=".xlsx,.xls,.csv,.tsv,.txt">
<button type="submit">Analyze</button>
</form>
"#;

/// Everything the page can show.
#[derive(Default)]
pub struct PageModel<'a> {
    pub report: Option<&'a ExamReport>,
    pub error: Option<String>,
}

/// Render the full HTML page.
pub fn render(model: &PageModel<'_>) -> String {
    let mut html = String::from(HEAD);

    if let Some(error) = &model.error {
        // Issue messages are joined with <br> by the caller; escape each part
        let parts: Vec<String> = error.split(" <br> ").map(escape_html).collect();
        let _ = writeln!(html, "<div class=\"error\">{}</div>", parts.join(" <br> "));
    }

    if let Some(report) = model.report {
        if let Some(stats) = &report.stats {
            render_stats(&mut html, stats);
        }

        if let Some(image) = &report.histogram {
            let _ = write!(
                html,
                "<h2>Score Distribution</h2>\n<img alt=\"Histogram of {}\" src=\"{}\">\n",
                escape_html(&image.column.name),
                image.data_uri()
            );
        }

        if let Some(table) = report.difficulty_table() {
            render_index_table(&mut html, &table);
        }
        if let Some(table) = report.discrimination_table() {
            render_index_table(&mut html, &table);
        }
    }

    let _ = write!(
        html,
        "<script>\nsetInterval(() => fetch('/api/ping', {{ method: 'POST' }}).catch(() => {{}}), {});\n\
         fetch('/api/ping', {{ method: 'POST' }}).catch(() => {{}});\n</script>\n</body>\n</html>\n",
        PING_INTERVAL_MS
    );

    html
}

fn render_stats(html: &mut String, stats: &StatsSummary) {
    let show = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_else(|| "&mdash;".to_string());

    let _ = write!(
        html,
        "<h2>Statistics: {}</h2>\n<table>\n<tr><th>Count</th><th>Mean</th><th>Median</th>\
         <th>Min</th><th>Max</th><th>Range</th><th>Mode</th></tr>\n\
         <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n</table>\n",
        escape_html(&stats.column),
        stats.count,
        show(stats.mean),
        show(stats.median),
        show(stats.min),
        show(stats.max),
        show(stats.range),
        stats
            .mode
            .as_deref()
            .map(escape_html)
            .unwrap_or_else(|| "&mdash;".to_string()),
    );
}

fn render_index_table(html: &mut String, table: &IndexTable) {
    let _ = writeln!(html, "<h2>{}</h2>", table.title);

    if table.is_empty() {
        html.push_str("<p>No numeric item columns found.</p>\n");
        return;
    }

    let _ = write!(
        html,
        "<table>\n<tr><th></th><th>{}</th><th>Interpretation</th></tr>\n",
        table.title
    );
    for row in &table.rows {
        let _ = writeln!(
            html,
            "<tr><th>{}</th><td>{:.2}</td><td>{}</td></tr>",
            escape_html(&row.item),
            row.value,
            row.interpretation
        );
    }
    html.push_str("</table>\n");
}

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
