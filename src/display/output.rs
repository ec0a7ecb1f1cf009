use crate::engine::aggregate::AggregateReport;
use crate::engine::stats::{ParticipantId, ParticipantStats};
use crate::engine::summary::GlobalSummary;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct StandingsRow {
    #[tabled(rename = "#")]
    rank: String,
    participant: String,
    games: String,
    #[tabled(rename = "W")]
    wins: String,
    #[tabled(rename = "L")]
    losses: String,
    #[tabled(rename = "U")]
    undecided: String,
    #[tabled(rename = "win %")]
    win_percent: String,
    #[tabled(rename = "diff/game")]
    diff_per_game: String,
    #[tabled(rename = "best W / L streak")]
    streaks: String,
}

#[derive(Tabled)]
struct MatchupRow {
    participant: String,
    opponent: String,
    total: String,
    #[tabled(rename = "W")]
    win: String,
    #[tabled(rename = "L")]
    lose: String,
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "#")]
    number: String,
    opponent: String,
    score: String,
    result: String,
    #[tabled(rename = "OT")]
    overtimes: String,
}

#[derive(Tabled)]
struct MvpRow {
    rank: String,
    player: String,
    awards: String,
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message);
}

/// Sorted standings: wins first, point differential as the tie breaker.
pub fn display_standings(report: &AggregateReport, top_n: usize) {
    println!(
        "\n{}",
        format!("📊 STANDINGS ({} participants)", report.stats.len())
            .bold()
            .cyan()
    );
    println!("{}\n", "=".repeat(70).cyan());

    if report.stats.is_empty() {
        println!("{}", "No participants in this feed".yellow());
        return;
    }

    let mut ordered: Vec<(&ParticipantId, &ParticipantStats)> = report.stats.iter().collect();
    ordered.sort_by(|(name_a, a), (name_b, b)| {
        b.total_wins
            .cmp(&a.total_wins)
            .then(b.total_diff.cmp(&a.total_diff))
            .then(name_a.cmp(name_b))
    });

    let mut rows = vec![];
    for (idx, (name, stats)) in ordered.iter().take(top_n).enumerate() {
        rows.push(StandingsRow {
            rank: format!("#{}", idx + 1),
            participant: name.to_string(),
            games: stats.total_games.to_string(),
            wins: stats.total_wins.to_string().green().to_string(),
            losses: stats.total_lost.to_string().red().to_string(),
            undecided: stats.total_undecided.to_string(),
            win_percent: stats.total_win_percents.clone(),
            diff_per_game: stats.total_diff_per_game.clone(),
            streaks: format!("{} / {}", stats.max_win_streak, stats.max_lose_streak),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

/// Full drill-down for one participant, including the raw record list.
pub fn display_participant(name: &ParticipantId, stats: &ParticipantStats) {
    println!(
        "\n{}",
        format!("🔎 {} — {} games", name, stats.total_games)
            .bold()
            .cyan()
    );
    println!("{}\n", "=".repeat(70).cyan());

    println!(
        "{} {} W / {} L / {} U ({})",
        "📈 Overall:".bold(),
        stats.total_wins.to_string().green(),
        stats.total_lost.to_string().red(),
        stats.total_undecided,
        stats.total_win_percents
    );
    println!(
        "{} {} scored, {} suffered ({} per game)",
        "🏀 Points: ".bold(),
        stats.total_scored,
        stats.total_suffered,
        stats.total_diff_per_game
    );
    println!(
        "{} home {}-{} ({} games), road {}-{} ({} games)",
        "🏟️  Splits: ".bold(),
        stats.total_home_wins,
        stats.total_home_lost,
        stats.total_home_games,
        stats.total_road_wins,
        stats.total_road_lost,
        stats.total_away_games
    );
    println!(
        "{} best win streak {}, worst lose streak {}",
        "🔥 Streaks:".bold(),
        stats.max_win_streak.to_string().green(),
        stats.max_lose_streak.to_string().red()
    );
    println!(
        "{} {} knockouts dealt, {} suffered; {} comeback wins, {} overtimes",
        "💥 Misc:   ".bold(),
        stats.total_knockouts,
        stats.total_suffered_knockouts,
        stats.total_won_comebacks,
        stats.total_overtimes
    );
    if stats.total_tournament_wins > 0 {
        println!(
            "{} {} tournament titles",
            "🏆 Titles: ".bold(),
            stats.total_tournament_wins.to_string().green()
        );
    }

    if stats.records.is_empty() {
        println!();
        return;
    }

    let mut rows = vec![];
    for (idx, record) in stats.records.iter().enumerate() {
        let we_are_a = record.participant_a == *name;
        let (opponent, ours, theirs) = if we_are_a {
            (&record.participant_b, record.score_a, record.score_b)
        } else {
            (&record.participant_a, record.score_b, record.score_a)
        };
        let result = if record.is_self_match() {
            "SELF".dimmed().to_string()
        } else if ours > theirs {
            "WIN".green().to_string()
        } else if ours < theirs {
            "LOSS".red().to_string()
        } else {
            "DRAW".yellow().to_string()
        };

        rows.push(RecordRow {
            number: format!("{}", idx + 1),
            opponent: opponent.to_string(),
            score: format!("{}-{}", ours, theirs),
            result,
            overtimes: record.total_overtimes.to_string(),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("\n{}\n", table);
}

/// Head-to-head matchup matrix, one row per participant/opponent pair.
pub fn display_matchups(report: &AggregateReport) {
    let mut rows = vec![];
    for (name, stats) in &report.stats {
        for (opponent, tally) in &stats.matchups {
            rows.push(MatchupRow {
                participant: name.to_string(),
                opponent: opponent.to_string(),
                total: tally.total.to_string(),
                win: tally.win.to_string().green().to_string(),
                lose: tally.lose.to_string().red().to_string(),
            });
        }
    }

    if rows.is_empty() {
        return;
    }

    println!("\n{}", "🤼 MATCHUP MATRIX".bold().cyan());
    println!("{}\n", "=".repeat(70).cyan());

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_summary(summary: &GlobalSummary) {
    println!("\n{}", "🏆 TOURNAMENT SUMMARY".bold().cyan());
    println!("{}\n", "=".repeat(70).cyan());

    println!(
        "{} {} tournaments, {} games, {} points scored",
        "📈 Volume:  ".bold(),
        summary.total_tournaments,
        summary.total_games,
        summary.total_scored
    );
    println!(
        "{} {} knockouts, {} overtimes, {} comebacks",
        "💥 Drama:   ".bold(),
        summary.total_knockouts,
        summary.total_overtimes,
        summary.total_comebacks
    );

    display_mvp_table("Game MVPs", &summary.mvps);
    display_mvp_table("Tournament MVPs", &summary.tournament_mvps);
    println!();
}

fn display_mvp_table(title: &str, tallies: &std::collections::BTreeMap<ParticipantId, u32>) {
    if tallies.is_empty() {
        return;
    }

    let mut ordered: Vec<(&ParticipantId, &u32)> = tallies.iter().collect();
    ordered.sort_by(|(name_a, a), (name_b, b)| b.cmp(a).then(name_a.cmp(name_b)));

    println!("\n{}", title.bold().yellow());
    let mut rows = vec![];
    for (idx, (name, count)) in ordered.iter().take(5).enumerate() {
        rows.push(MvpRow {
            rank: format!("#{}", idx + 1),
            player: name.to_string(),
            awards: count.to_string(),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}
