use serde::Serialize;

/// One support ticket: the ten raw CSV columns plus the derived metrics
/// filled in by `triage::enrich`. Derived fields are not touched again
/// after enrichment.
#[derive(Debug, Clone, Default)]
pub struct Ticket {
    pub ticket_id: String,
    pub scholar_id: String,
    pub category: String,
    pub urgency: i32,
    pub impact: i32,
    pub status: String,
    pub channel: String,
    pub created_at: String,
    pub last_update: String,
    pub owner: String,

    pub age_days: i64,
    pub stale_days: i64,
    pub is_stale: bool,
    pub unassigned: bool,
    pub sla_risk: bool,
    pub score: f64,
}

/// Run-level thresholds, all user-configurable on the command line.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub stale_days: i64,
    pub sla_days: i64,
    pub high_urgency: i32,
    pub high_impact: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            stale_days: 10,
            sla_days: 14,
            high_urgency: 4,
            high_impact: 4,
        }
    }
}

/// Headline counters. A ticket can contribute to several at once.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub open: usize,
    pub closed: usize,
    pub unassigned: usize,
    pub stale: usize,
    pub high_urgency: usize,
    pub high_impact: usize,
    pub sla_risk: usize,
}
