use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::error::ErrorKind;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod loader;
mod models;
mod report;
mod stats;
mod triage;

use models::Thresholds;

#[derive(Parser)]
#[command(name = "support-triage")]
#[command(about = "Support ticket triage report for Group Scholar", long_about = None)]
#[command(after_help = "CSV columns:\n  \
    ticket_id,scholar_id,category,urgency,impact,status,channel,created_at,last_update,owner")]
struct Cli {
    /// Path to the ticket CSV export
    csv: PathBuf,
    /// Write a JSON report to this path
    #[arg(long)]
    json: Option<PathBuf>,
    /// Limit action queue items
    #[arg(long, default_value_t = 10)]
    limit: usize,
    /// Override today's date (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,
    /// Stale threshold in days since last update
    #[arg(long, default_value_t = 10)]
    stale_days: i64,
    /// SLA risk threshold in days since created
    #[arg(long, default_value_t = 14)]
    sla_days: i64,
    /// Threshold for high urgency
    #[arg(long, default_value_t = 4)]
    high_urgency: i32,
    /// Threshold for high impact
    #[arg(long, default_value_t = 4)]
    high_impact: i32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Missing arguments exit 1, --help exits 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            err.print().ok();
            std::process::exit(code);
        }
    };

    let thresholds = Thresholds {
        stale_days: cli.stale_days,
        sla_days: cli.sla_days,
        high_urgency: cli.high_urgency,
        high_impact: cli.high_impact,
    };
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    let outcome = loader::load(&cli.csv)?;
    if outcome.dropped > 0 {
        warn!(dropped = outcome.dropped, "skipped malformed rows");
    }
    info!(tickets = outcome.tickets.len(), "loaded ticket CSV");

    let mut tickets = outcome.tickets;
    triage::enrich(&mut tickets, today, &thresholds);

    let (summary, categories, channels) = stats::aggregate(&tickets, &thresholds);
    let report = report::build_report(&tickets, summary, &categories, &channels, cli.limit);

    print!(
        "{}",
        report::render_console(&report, today, &thresholds, cli.limit)
    );

    if let Some(path) = &cli.json {
        let rendered = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, rendered)
            .with_context(|| format!("could not write JSON to {}", path.display()))?;
        println!("\nWrote JSON report to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
ticket_id,scholar_id,category,urgency,impact,status,channel,created_at,last_update,owner
T-1,S-1,billing,4,3,open,email,2023-12-20,2023-12-28,
T-2,S-2,access,2,5,open,phone,2024-01-02,2024-01-08,dana
T-3,S-3,billing,5,5,closed,email,2023-12-01,2023-12-15,lee
";

    fn run_pipeline(csv: &str, today: &str, limit: usize) -> report::Report {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(csv.as_bytes()).unwrap();
        let today: NaiveDate = today.parse().unwrap();
        let thresholds = Thresholds::default();

        let mut tickets = loader::load(file.path()).unwrap().tickets;
        triage::enrich(&mut tickets, today, &thresholds);
        let (summary, categories, channels) = stats::aggregate(&tickets, &thresholds);
        report::build_report(&tickets, summary, &categories, &channels, limit)
    }

    #[test]
    fn three_row_scenario_ranks_open_tickets() {
        let report = run_pipeline(SAMPLE, "2024-01-10", 10);
        assert_eq!(report.summary.open, 2);
        assert_eq!(report.summary.closed, 1);
        assert_eq!(report.action_queue.len(), 2);
        // T-1: 4*0.5 + 3*0.35 + 21*0.15 = 6.20; T-2: 2*0.5 + 5*0.35 + 8*0.15 = 3.95
        assert_eq!(report.action_queue[0].ticket_id, "T-1");
        assert_eq!(report.action_queue[0].score, 6.2);
        assert_eq!(report.action_queue[1].ticket_id, "T-2");
        assert_eq!(report.action_queue[1].score, 3.95);
        assert!(report.action_queue[0].score >= report.action_queue[1].score);
    }

    #[test]
    fn scenario_counts_unassigned_and_stale() {
        let report = run_pipeline(SAMPLE, "2024-01-10", 10);
        // T-1 has no owner; T-1 (13d) and T-3 (26d) are past the stale threshold.
        assert_eq!(report.summary.unassigned, 1);
        assert_eq!(report.summary.stale, 2);
        assert_eq!(report.summary.sla_risk, 2);
        assert_eq!(report.action_queue[0].owner, "");
    }

    #[test]
    fn identical_runs_produce_identical_json() {
        let first = serde_json::to_string_pretty(&run_pipeline(SAMPLE, "2024-01-10", 10)).unwrap();
        let second = serde_json::to_string_pretty(&run_pipeline(SAMPLE, "2024-01-10", 10)).unwrap();
        assert_eq!(first, second);
    }
}
