use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::PathBuf;
use thiserror::Error;

use crate::clock::SystemClock;
use crate::config::Config;
use crate::models::{Priority, TaskStatus, WorkspaceSummary};
use crate::store::Store;

#[derive(Parser)]
#[command(name = "veer")]
#[command(about = "Veer - tasks, notes and reminders dashboard for the terminal")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Use development mode (separate dev config and log file)
    #[arg(long)]
    pub dev: bool,

    /// Start with an empty workspace instead of the demo data
    #[arg(long)]
    pub empty: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Print the workspace summary and exit
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to serialize summary: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Build the startup workspace; demo data unless disabled by config or `--empty`
pub fn build_store(config: &Config, empty: bool) -> Store {
    if config.seed_demo_data && !empty {
        Store::with_sample_data(Box::new(SystemClock))
    } else {
        Store::new()
    }
}

/// Handle the stats command
pub fn handle_stats(store: &Store, json: bool) -> Result<(), CliError> {
    let summary = store.summary(store.now());
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", format_summary(&summary));
    }
    Ok(())
}

pub fn format_summary(summary: &WorkspaceSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Workspace summary ({})", summary.generated_at.format("%Y-%m-%d %H:%M"));
    let _ = writeln!(out, "Tasks: {}", summary.tasks.total());
    for status in TaskStatus::ALL {
        let _ = writeln!(
            out,
            "  {:<12} {:>3}  ({}%)",
            status.label(),
            summary.tasks.count(status),
            summary.distribution.percent(status)
        );
    }
    let _ = writeln!(out, "  Completion: {}", summary.completion_rate);
    let priorities = Priority::ALL
        .iter()
        .map(|p| format!("{} {}", p.label(), summary.priorities.count(*p)))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "  By priority: {}", priorities);
    let _ = writeln!(out, "Notes: {} ({} pinned)", summary.notes_total, summary.notes_pinned);
    let _ = writeln!(
        out,
        "Reminders: {} ({} active, {} overdue)",
        summary.reminders_total, summary.reminders_active, summary.reminders_overdue
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::models::TaskInput;
    use chrono::{Local, TimeZone};

    #[test]
    fn empty_flag_skips_demo_data() {
        let config = Config::default();
        assert!(build_store(&config, true).tasks().is_empty());
        assert!(!build_store(&config, false).tasks().is_empty());

        let config = Config {
            seed_demo_data: false,
            ..Config::default()
        };
        assert!(build_store(&config, false).reminders().is_empty());
    }

    #[test]
    fn summary_text_lists_counts() {
        let clock = ManualClock::new(Local.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap());
        let mut store = Store::with_clock(Box::new(clock.clone()));
        store.create_task(TaskInput {
            title: "One".to_string(),
            ..Default::default()
        });

        let text = format_summary(&store.summary(clock.now()));
        assert!(text.starts_with("Workspace summary (2024-02-01 10:00)"));
        assert!(text.contains("Tasks: 1"));
        assert!(text.contains("Pending        1  (100%)"));
        assert!(text.contains("Completion: 0%"));
        assert!(text.contains("Notes: 0 (0 pinned)"));
    }

    #[test]
    fn cli_parses_stats_flags() {
        let cli = Cli::parse_from(["veer", "--empty", "stats", "--json"]);
        assert!(cli.empty);
        assert!(matches!(cli.command, Some(Commands::Stats { json: true })));
    }
}
