use std::fmt::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Summary, Thresholds, Ticket};
use crate::stats::OrderedCounter;

const TOP_N: usize = 5;

#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ChannelCount {
    pub channel: String,
    pub count: usize,
}

/// One action-queue row. `owner` carries the raw field; an empty owner is
/// substituted with "unassigned" only when rendering to the console.
#[derive(Debug, Serialize)]
pub struct ActionItem {
    pub ticket_id: String,
    pub scholar_id: String,
    pub category: String,
    pub urgency: i32,
    pub impact: i32,
    pub age_days: i64,
    pub stale_days: i64,
    pub score: f64,
    pub owner: String,
}

/// The full report. Serializing this struct is the JSON output; the console
/// rendering walks the same data, so the two can never drift apart.
#[derive(Debug, Serialize)]
pub struct Report {
    pub summary: Summary,
    pub top_categories: Vec<CategoryCount>,
    pub top_channels: Vec<ChannelCount>,
    pub action_queue: Vec<ActionItem>,
}

/// Ranks tickets by score descending and assembles the report. The sort is
/// stable, so equal scores keep input (CSV) order and repeated runs over the
/// same input produce identical output.
pub fn build_report(
    tickets: &[Ticket],
    summary: Summary,
    categories: &OrderedCounter,
    channels: &OrderedCounter,
    limit: usize,
) -> Report {
    let mut ranked: Vec<&Ticket> = tickets.iter().collect();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let action_queue = ranked
        .iter()
        .filter(|t| t.status != "closed")
        .take(limit)
        .map(|t| ActionItem {
            ticket_id: t.ticket_id.clone(),
            scholar_id: t.scholar_id.clone(),
            category: t.category.clone(),
            urgency: t.urgency,
            impact: t.impact,
            age_days: t.age_days,
            stale_days: t.stale_days,
            score: (t.score * 100.0).round() / 100.0,
            owner: t.owner.clone(),
        })
        .collect();

    Report {
        summary,
        top_categories: categories
            .ranked()
            .into_iter()
            .take(TOP_N)
            .map(|(category, count)| CategoryCount { category, count })
            .collect(),
        top_channels: channels
            .ranked()
            .into_iter()
            .take(TOP_N)
            .map(|(channel, count)| ChannelCount { channel, count })
            .collect(),
        action_queue,
    }
}

pub fn render_console(
    report: &Report,
    today: NaiveDate,
    thresholds: &Thresholds,
    limit: usize,
) -> String {
    let mut output = String::new();
    let s = &report.summary;

    let _ = writeln!(output, "Support Triage Summary ({today})");
    let _ = writeln!(
        output,
        "Open: {} | Closed: {} | Unassigned: {}",
        s.open, s.closed, s.unassigned
    );
    let _ = writeln!(
        output,
        "Stale (>= {} days): {} | SLA risk (>= {} days): {}",
        thresholds.stale_days, s.stale, thresholds.sla_days, s.sla_risk
    );
    let _ = writeln!(
        output,
        "High urgency (>= {}): {} | High impact (>= {}): {}",
        thresholds.high_urgency, s.high_urgency, thresholds.high_impact, s.high_impact
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "Top Categories:");
    for entry in &report.top_categories {
        let _ = writeln!(output, "  {} ({})", entry.category, entry.count);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "Top Channels:");
    for entry in &report.top_channels {
        let _ = writeln!(output, "  {} ({})", entry.channel, entry.count);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "Action Queue (top {limit})");
    for (position, item) in report.action_queue.iter().enumerate() {
        let owner = if item.owner.is_empty() {
            "unassigned"
        } else {
            item.owner.as_str()
        };
        let _ = writeln!(
            output,
            "{}. {} | Scholar {} | {} | urgency {} | impact {} | age {} days | stale {} days | score {:.2} | owner {}",
            position + 1,
            item.ticket_id,
            item.scholar_id,
            item.category,
            item.urgency,
            item.impact,
            item.age_days,
            item.stale_days,
            item.score,
            owner
        );
    }

    output
}
