use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::models::Ticket;

/// Ceiling on loaded tickets. Rows past the cap are ignored, same as the
/// fixed-size buffer in earlier versions of this tool.
pub const MAX_RECORDS: usize = 20_000;

/// Expected column count: ticket_id, scholar_id, category, urgency, impact,
/// status, channel, created_at, last_update, owner.
const FIELD_COUNT: usize = 10;

#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub tickets: Vec<Ticket>,
    /// Data rows skipped because they had fewer than ten fields or could
    /// not be decoded.
    pub dropped: usize,
}

/// Reads the ticket CSV. The first line is always treated as a header and
/// never validated. Fields are trimmed of ASCII whitespace; extra columns
/// beyond the tenth are ignored.
pub fn load(path: &Path) -> anyhow::Result<LoadOutcome> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("could not open CSV: {}", path.display()))?;

    let mut outcome = LoadOutcome::default();

    for result in reader.records() {
        if outcome.tickets.len() >= MAX_RECORDS {
            break;
        }
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                debug!(%err, "undecodable row");
                outcome.dropped += 1;
                continue;
            }
        };
        if record.len() < FIELD_COUNT {
            outcome.dropped += 1;
            continue;
        }

        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        outcome.tickets.push(Ticket {
            ticket_id: field(0),
            scholar_id: field(1),
            category: field(2),
            urgency: parse_int(record.get(3).unwrap_or(""), 0),
            impact: parse_int(record.get(4).unwrap_or(""), 0),
            status: field(5),
            channel: field(6),
            created_at: field(7),
            last_update: field(8),
            owner: field(9),
            ..Ticket::default()
        });
    }

    Ok(outcome)
}

/// Permissive integer parse: reads an optional sign and any leading digits,
/// ignoring trailing garbage ("5x" parses as 5). Empty or non-numeric input
/// yields the fallback.
pub fn parse_int(s: &str, fallback: i32) -> i32 {
    let s = s.trim();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return fallback;
    }
    s[..end].parse().unwrap_or(fallback)
}
