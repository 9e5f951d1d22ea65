use chrono::NaiveDate;

use crate::models::{Thresholds, Ticket};

const URGENCY_WEIGHT: f64 = 0.5;
const IMPACT_WEIGHT: f64 = 0.35;
const AGE_WEIGHT: f64 = 0.15;

/// Parses the first ten characters of a field as `YYYY-MM-DD`. Shorter or
/// malformed values yield `None`, which downstream treats as a zero delta.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let head = s.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Whole days from `from` to `to` as a calendar delta. `NaiveDate`
/// subtraction works on proleptic Gregorian day numbers, so the result is
/// immune to DST artifacts. Unparseable dates count as 0 days.
pub fn days_between(from: &str, to: NaiveDate) -> i64 {
    match parse_date(from) {
        Some(date) => (to - date).num_days(),
        None => 0,
    }
}

/// Computes the derived fields for every ticket. Each ticket depends only on
/// its own columns plus `today` and the thresholds.
pub fn enrich(tickets: &mut [Ticket], today: NaiveDate, thresholds: &Thresholds) {
    for ticket in tickets.iter_mut() {
        ticket.age_days = days_between(&ticket.created_at, today);
        ticket.stale_days = days_between(&ticket.last_update, today);
        ticket.is_stale = ticket.stale_days >= thresholds.stale_days;
        ticket.unassigned = ticket.owner.is_empty();
        ticket.sla_risk = ticket.age_days >= thresholds.sla_days;

        // Future-dated creation must not subtract from the score.
        let age_factor = ticket.age_days.max(0) as f64;
        ticket.score = ticket.urgency as f64 * URGENCY_WEIGHT
            + ticket.impact as f64 * IMPACT_WEIGHT
            + age_factor * AGE_WEIGHT;
    }
}
