//! Text, HTML and JSON renderings of a `Report`.

use crate::report::{Report, Section};
use clap::ValueEnum;
use nightflow_core::display::{display_class, format_flow, format_paired, format_probability};
use nightflow_core::domain::ids::short_prefix;
use nightflow_core::metrics::correlation::SIGNIFICANCE_LEVEL;
use nightflow_core::metrics::ComparisonRow;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
    Json,
}

pub fn render(report: &Report, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Html => render_html(report),
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
    })
}

fn range_text(report: &Report) -> String {
    match report.range {
        Some(r) => r.to_string(),
        None => "(no records)".to_string(),
    }
}

fn probability_line(section: &Section) -> String {
    match &section.co_movement {
        Some(c) => format!(
            "Same direction on {} of {} days: {}",
            c.agreeing,
            c.total,
            format_probability(Some(c))
        ),
        None => format!("Same direction: {}", format_probability(None)),
    }
}

fn correlation_line(section: &Section) -> String {
    match &section.correlation {
        Some(c) => {
            let verdict = if c.significant {
                format!("significant at {:.0}%", SIGNIFICANCE_LEVEL * 100.0)
            } else {
                "not significant".to_string()
            };
            format!(
                "Correlation: r = {:+.3}, p = {:.4}, n = {} ({verdict})",
                c.coefficient, c.p_value, c.sample_size
            )
        }
        None => "Correlation: n/a".to_string(),
    }
}

fn cells(row: &ComparisonRow) -> [String; 3] {
    [
        row.date.to_string(),
        format_flow(row.night_futures_foreign),
        format_paired(&row.paired),
    ]
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Source: {} ({})",
        report.source,
        short_prefix(&report.source_hash)
    );
    let _ = writeln!(out, "Range:  {}", range_text(report));

    for section in &report.sections {
        out.push('\n');
        let _ = writeln!(out, "== {} ==", section.title());

        let header = ["Date", "Night futures", section.paired_header()];
        let body: Vec<[String; 3]> = section.rows.iter().map(cells).collect();
        let mut widths = header.map(str::len);
        for row in &body {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let _ = writeln!(
            out,
            "{:<w0$}  {:>w1$}  {:>w2$}",
            header[0],
            header[1],
            header[2],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2]
        );
        let _ = writeln!(out, "{}", "-".repeat(widths.iter().sum::<usize>() + 4));
        for row in &body {
            let _ = writeln!(
                out,
                "{:<w0$}  {:>w1$}  {:>w2$}",
                row[0],
                row[1],
                row[2],
                w0 = widths[0],
                w1 = widths[1],
                w2 = widths[2]
            );
        }
        if body.is_empty() {
            out.push_str("(no rows in range)\n");
        }
        if section.truncated() > 0 {
            let _ = writeln!(out, "({} more rows not shown)", section.truncated());
        }

        let _ = writeln!(out, "{}", probability_line(section));
        let _ = writeln!(out, "{}", correlation_line(section));
    }
    out
}

// ---------------------------------------------------------------------------
// HTML
// ---------------------------------------------------------------------------

const STYLE: &str = "\
body { font-family: sans-serif; }
table { border-collapse: collapse; margin-bottom: 0.5em; }
th, td { padding: 2px 10px; text-align: right; }
td.date { text-align: left; }
.up { color: #d32f2f; }
.down { color: #1565c0; }
";

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn signed_cell(value: f64, text: &str) -> String {
    match display_class(value) {
        Some(class) => format!(
            "<td class=\"{}\">{}</td>",
            class.css_class(),
            escape_html(text)
        ),
        None => format!("<td>{}</td>", escape_html(text)),
    }
}

pub fn render_html(report: &Report) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape_html(&report.source));
    let _ = writeln!(out, "<style>\n{STYLE}</style>\n</head>\n<body>");
    let _ = writeln!(
        out,
        "<p>Source: {} ({})<br>Range: {}</p>",
        escape_html(&report.source),
        short_prefix(&report.source_hash),
        escape_html(&range_text(report))
    );

    for section in &report.sections {
        let _ = writeln!(out, "<h2>{}</h2>", escape_html(section.title()));
        let _ = writeln!(
            out,
            "<table>\n<tr><th>Date</th><th>Night futures</th><th>{}</th></tr>",
            escape_html(section.paired_header())
        );
        for row in &section.rows {
            let [date, night, paired] = cells(row);
            let _ = writeln!(
                out,
                "<tr><td class=\"date\">{}</td>{}{}</tr>",
                date,
                signed_cell(row.night_futures_foreign, &night),
                signed_cell(row.paired.signed_value(), &paired)
            );
        }
        out.push_str("</table>\n");
        if section.truncated() > 0 {
            let _ = writeln!(out, "<p>({} more rows not shown)</p>", section.truncated());
        }
        let _ = writeln!(
            out,
            "<p>{}<br>{}</p>",
            escape_html(&probability_line(section)),
            escape_html(&correlation_line(section))
        );
    }
    out.push_str("</body>\n</html>\n");
    out
}
