use anyhow::Context;
use clap::Parser;
use indicatif::ProgressBar;
use std::fs;
use std::path::PathBuf;

use faceoff::config::Config;
use faceoff::display::output::{
    display_error, display_info, display_matchups, display_participant, display_standings,
    display_success, display_summary, display_warning,
};
use faceoff::engine::aggregate::{AggregateMode, MatchStatsTracker};
use faceoff::engine::stats::ParticipantId;
use faceoff::engine::summary::TournamentMeta;
use faceoff::error::AppError;
use faceoff::feed::models::{RawMatchDto, TournamentDto};
use faceoff::feed::normalize::{self, NormalizedFeed};
use faceoff::snapshot::ReportSnapshot;

#[derive(Parser, Debug)]
#[command(name = "Faceoff")]
#[command(about = "Aggregate head-to-head match statistics from a feed dump", long_about = None)]
struct Args {
    /// Path to the JSON feed (array of match rows; tournaments with -t)
    feed: PathBuf,

    /// Treat the feed as a tournament dump (enables matchups and the
    /// global summary)
    #[arg(short, long)]
    tournament: bool,

    /// Number of standings rows to display (default: 10)
    #[arg(short = 'n', long, default_value = "10")]
    top: usize,

    /// Show the full drill-down for one participant
    #[arg(short, long)]
    participant: Option<String>,

    /// Save the aggregated report as a snapshot under the data directory
    #[arg(long)]
    save: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let scope = args
        .feed
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("report")
        .to_string();

    display_info(&format!("Reading feed from {}", args.feed.display()));
    let raw = fs::read_to_string(&args.feed)
        .with_context(|| format!("could not read feed {}", args.feed.display()))?;

    let (feed, tournaments, mode) = load_feed(&raw, args.tournament)?;

    for rejected in &feed.rejected {
        display_warning(&format!(
            "Skipping record {}: {}",
            rejected.position, rejected.reason
        ));
    }
    if feed.records.is_empty() {
        return Err(AppError::EmptyFeed.into());
    }
    display_success(&format!(
        "{} match records to aggregate",
        feed.records.len()
    ));

    let pb = ProgressBar::new(feed.records.len() as u64);
    pb.set_message("Aggregating match records");
    let mut tracker = MatchStatsTracker::with_options(mode, config.options());
    for record in &feed.records {
        tracker.record_match(record);
        pb.inc(1);
    }
    for meta in &tournaments {
        tracker.record_tournament(meta);
    }
    pb.finish_with_message("✓ Feed aggregated");

    let report = tracker.finish();

    display_standings(&report, args.top);

    if let Some(name) = &args.participant {
        let id = ParticipantId::new(name)?;
        match report.stats.get(&id) {
            Some(stats) => display_participant(&id, stats),
            None => display_warning(&format!("No matches found for {}", name)),
        }
    }

    if mode == AggregateMode::Tournament {
        display_matchups(&report);
        if let Some(summary) = &report.summary {
            display_summary(summary);
        }
    }

    if args.save {
        if let Some(previous) = ReportSnapshot::load(&scope, config.data_dir.as_deref())? {
            let age = if previous.is_stale(24 * 60) {
                "stale"
            } else {
                "recent"
            };
            display_info(&format!(
                "Replacing {} snapshot from {}",
                age,
                previous.created.format("%Y-%m-%d %H:%M UTC")
            ));
        }
        let snapshot = ReportSnapshot::new(&scope, report);
        let path = snapshot.save(config.data_dir.as_deref())?;
        display_success(&format!("Snapshot saved to {}", path.display()));
    }

    Ok(())
}

fn load_feed(
    raw: &str,
    tournament: bool,
) -> Result<(NormalizedFeed, Vec<TournamentMeta>, AggregateMode), AppError> {
    if tournament {
        let rows: Vec<TournamentDto> =
            serde_json::from_str(raw).map_err(|e| AppError::JsonError(e.to_string()))?;
        let flattened = normalize::flatten_tournaments(&rows);
        Ok((
            flattened.feed,
            flattened.tournaments,
            AggregateMode::Tournament,
        ))
    } else {
        let rows: Vec<RawMatchDto> =
            serde_json::from_str(raw).map_err(|e| AppError::JsonError(e.to_string()))?;
        Ok((normalize::normalize(&rows), Vec::new(), AggregateMode::HeadToHead))
    }
}
