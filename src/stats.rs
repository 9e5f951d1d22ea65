use std::collections::HashMap;

use crate::models::{Summary, Thresholds, Ticket};

/// Key -> count map that remembers first-seen insertion order. Empty keys
/// are never tallied.
#[derive(Debug, Default)]
pub struct OrderedCounter {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl OrderedCounter {
    pub fn add(&mut self, key: &str) {
        if key.is_empty() {
            return;
        }
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    /// Entries sorted by count descending. The sort is stable, so entries
    /// with equal counts keep first-seen order.
    pub fn ranked(&self) -> Vec<(String, usize)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Tallies the summary counters and the category/channel distributions in
/// one pass. Every comparison is independent, so a single ticket can land
/// in several counters.
pub fn aggregate(
    tickets: &[Ticket],
    thresholds: &Thresholds,
) -> (Summary, OrderedCounter, OrderedCounter) {
    let mut summary = Summary::default();
    let mut categories = OrderedCounter::default();
    let mut channels = OrderedCounter::default();

    for ticket in tickets {
        if ticket.status == "closed" {
            summary.closed += 1;
        } else {
            summary.open += 1;
        }
        if ticket.unassigned {
            summary.unassigned += 1;
        }
        if ticket.is_stale {
            summary.stale += 1;
        }
        if ticket.urgency >= thresholds.high_urgency {
            summary.high_urgency += 1;
        }
        if ticket.impact >= thresholds.high_impact {
            summary.high_impact += 1;
        }
        if ticket.sla_risk {
            summary.sla_risk += 1;
        }
        categories.add(&ticket.category);
        channels.add(&ticket.channel);
    }

    (summary, categories, channels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(status: &str, category: &str, channel: &str) -> Ticket {
        Ticket {
            status: status.to_string(),
            category: category.to_string(),
            channel: channel.to_string(),
            ..Ticket::default()
        }
    }

    #[test]
    fn counts_open_and_closed_exactly() {
        let tickets = vec![
            ticket("open", "billing", "email"),
            ticket("closed", "billing", "phone"),
            ticket("Closed", "access", "email"),
        ];
        let (summary, _, _) = aggregate(&tickets, &Thresholds::default());
        // Status match is case-sensitive: "Closed" stays open.
        assert_eq!(summary.closed, 1);
        assert_eq!(summary.open, 2);
    }

    #[test]
    fn empty_keys_are_not_tallied() {
        let tickets = vec![ticket("open", "", ""), ticket("open", "billing", "email")];
        let (_, categories, channels) = aggregate(&tickets, &Thresholds::default());
        assert_eq!(categories.entries().len(), 1);
        assert_eq!(channels.entries().len(), 1);
    }

    #[test]
    fn counter_keeps_first_seen_order() {
        let mut counter = OrderedCounter::default();
        for key in ["email", "phone", "email", "chat"] {
            counter.add(key);
        }
        let entries = counter.entries();
        assert_eq!(entries[0], ("email".to_string(), 2));
        assert_eq!(entries[1], ("phone".to_string(), 1));
        assert_eq!(entries[2], ("chat".to_string(), 1));
    }

    #[test]
    fn ranked_breaks_ties_by_first_seen() {
        let mut counter = OrderedCounter::default();
        for key in ["phone", "email", "email", "chat"] {
            counter.add(key);
        }
        let ranked = counter.ranked();
        assert_eq!(ranked[0].0, "email");
        assert_eq!(ranked[1].0, "phone");
        assert_eq!(ranked[2].0, "chat");
    }

    #[test]
    fn thresholds_gate_high_counts() {
        let mut high = ticket("open", "billing", "email");
        high.urgency = 4;
        high.impact = 5;
        let mut low = ticket("open", "billing", "email");
        low.urgency = 3;
        low.impact = 3;
        let (summary, _, _) = aggregate(&[high, low], &Thresholds::default());
        assert_eq!(summary.high_urgency, 1);
        assert_eq!(summary.high_impact, 1);
    }
}
