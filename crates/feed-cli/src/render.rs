//! Terminal and JSON rendering of command results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use feed_model::{ChannelId, Post};
use serde::Serialize;

use crate::commands::ChannelReport;

const NO_VALUE: &str = "-";

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn channels_table(rows: &[(ChannelId, bool)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Channel"), header_cell("Selected")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for (channel, selected) in rows {
        let marker = if *selected {
            Cell::new("*").fg(Color::Green)
        } else {
            Cell::new("")
        };
        table.add_row(vec![Cell::new(format!("r/{channel}")), marker]);
    }
    table
}

pub fn posts_table(posts: &[Post]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Score"),
        header_cell("Comments"),
        header_cell("Title"),
        header_cell("Author"),
        header_cell("ID"),
    ]);
    apply_table_style(&mut table);
    table.set_constraints(vec![
        ColumnConstraint::LowerBoundary(Width::Fixed(5)),
        ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ColumnConstraint::UpperBoundary(Width::Percentage(60)),
        ColumnConstraint::UpperBoundary(Width::Fixed(20)),
        ColumnConstraint::UpperBoundary(Width::Fixed(10)),
    ]);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    for post in posts {
        table.add_row(vec![
            Cell::new(opt(post.score())),
            Cell::new(opt(post.num_comments())),
            Cell::new(post.title().unwrap_or(NO_VALUE)).add_attribute(Attribute::Bold),
            Cell::new(post.author().unwrap_or(NO_VALUE)),
            Cell::new(post.id().unwrap_or(NO_VALUE)).fg(Color::DarkGrey),
        ]);
    }
    table
}

/// Heading line printed above each channel's table.
pub fn report_heading(report: &ChannelReport) -> String {
    match (&report.error, report.last_updated) {
        (Some(error), _) => format!("r/{}: fetch failed: {error}", report.channel),
        (None, Some(updated)) => format!(
            "r/{}: {} posts (updated {})",
            report.channel,
            report.posts.len(),
            updated.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        (None, None) => format!("r/{}: {}", report.channel, report.status),
    }
}

/// Human-readable rendering of all reports.
pub fn render_reports(reports: &[ChannelReport], limit: Option<usize>) -> String {
    let mut out = String::new();
    for report in reports {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&report_heading(report));
        out.push('\n');
        let posts = truncated(&report.posts, limit);
        if !posts.is_empty() {
            out.push_str(&posts_table(posts).to_string());
            out.push('\n');
        }
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a ChannelReport,
    total_posts: usize,
}

/// Pretty JSON array of reports, posts truncated to `limit`.
pub fn render_reports_json(
    reports: &[ChannelReport],
    limit: Option<usize>,
) -> serde_json::Result<String> {
    let limited: Vec<ChannelReport> = reports
        .iter()
        .map(|report| ChannelReport {
            posts: truncated(&report.posts, limit).to_vec(),
            ..report.clone()
        })
        .collect();
    let json: Vec<JsonReport<'_>> = reports
        .iter()
        .zip(&limited)
        .map(|(full, report)| JsonReport {
            report,
            total_posts: full.posts.len(),
        })
        .collect();
    serde_json::to_string_pretty(&json)
}

fn truncated(posts: &[Post], limit: Option<usize>) -> &[Post] {
    match limit {
        Some(n) if n < posts.len() => &posts[..n],
        _ => posts,
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| NO_VALUE.to_string(), |v| v.to_string())
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
