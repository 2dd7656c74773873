//! Tournament mode for running many simulated matches in parallel
//!
//! Matches are independent units of mutation, so each rayon worker owns
//! the match it plays and only the statistics are shared.

use crate::core::{MatchFormat, Player};
use crate::scoring::{start_match, MatchLoop, RandomRallyController, VerbosityLevel};
use crate::{Result, TennisError};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Settings for a tournament run
#[derive(Debug, Clone, Copy)]
pub struct TournamentConfig {
    pub matches: usize,
    pub seed: u64,
    pub p1_point_probability: f64,
    pub format: MatchFormat,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            matches: 100,
            seed: 42,
            p1_point_probability: 0.5,
            format: MatchFormat::default(),
        }
    }
}

/// Statistics collected during a tournament
#[derive(Debug, Default, Clone)]
pub struct TournamentStats {
    pub p1_wins: usize,
    pub p2_wins: usize,
    /// Matches that failed to finish
    pub unfinished: usize,
    pub total_points: u64,
    pub total_sets: u64,
    pub tiebreaks: u64,
    /// How often each final scoreline occurred
    pub scorelines: FxHashMap<String, usize>,
}

impl TournamentStats {
    pub fn matches_played(&self) -> usize {
        self.p1_wins + self.p2_wins + self.unfinished
    }

    pub fn win_rate(&self, player: Player) -> f64 {
        let total = self.matches_played();
        if total == 0 {
            return 0.0;
        }
        let wins = match player {
            Player::One => self.p1_wins,
            Player::Two => self.p2_wins,
        };
        wins as f64 / total as f64
    }

    /// Most frequent scorelines, ties broken alphabetically
    pub fn top_scorelines(&self, n: usize) -> Vec<(&str, usize)> {
        let mut lines: Vec<_> = self
            .scorelines
            .iter()
            .map(|(line, count)| (line.as_str(), *count))
            .collect();
        lines.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        lines.truncate(n);
        lines
    }
}

/// Final report of a tournament run
#[derive(Debug, Clone)]
pub struct TournamentReport {
    pub stats: TournamentStats,
    pub elapsed: Duration,
}

/// Seed for one match, spread out from the tournament seed
pub fn match_seed(seed: u64, match_idx: usize) -> u64 {
    seed.wrapping_add((match_idx as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Play `config.matches` simulated matches in parallel and aggregate them
pub fn run_tourney(config: &TournamentConfig) -> Result<TournamentReport> {
    if config.matches == 0 {
        return Err(TennisError::InvalidConfiguration(
            "tournament requires at least one match".to_string(),
        ));
    }
    config.format.validate()?;
    RandomRallyController::with_seed(config.seed).with_probability(config.p1_point_probability)?;

    let stats = Mutex::new(TournamentStats::default());
    let start_time = Instant::now();

    (0..config.matches).into_par_iter().try_for_each(|match_idx| -> Result<()> {
        let mut tennis_match = start_match("Player 1", "Player 2", config.format)?;
        let mut controller = RandomRallyController::with_seed(match_seed(config.seed, match_idx))
            .with_probability(config.p1_point_probability)?;

        let result = MatchLoop::new(&mut tennis_match)
            .with_verbosity(VerbosityLevel::Silent)
            .without_point_log()
            .run_match(&mut controller)?;

        let mut stats = stats.lock().unwrap_or_else(PoisonError::into_inner);
        match result.winner {
            Some(Player::One) => stats.p1_wins += 1,
            Some(Player::Two) => stats.p2_wins += 1,
            None => stats.unfinished += 1,
        }
        stats.total_points += u64::from(result.points_played);
        stats.total_sets += tennis_match.sets().len() as u64;
        stats.tiebreaks += u64::from(result.tiebreaks_played);
        *stats.scorelines.entry(result.scoreline).or_insert(0) += 1;
        Ok(())
    })?;

    Ok(TournamentReport {
        stats: stats.into_inner().unwrap_or_else(PoisonError::into_inner),
        elapsed: start_time.elapsed(),
    })
}

/// Print a tournament report to stdout
pub fn print_report(config: &TournamentConfig, report: &TournamentReport) {
    let stats = &report.stats;
    let total = stats.matches_played();
    let secs = report.elapsed.as_secs_f64();

    println!("=== Tournament Complete ===");
    println!("Total matches played: {total}");
    println!("Format: best of {}", config.format.best_of_sets);
    println!("Elapsed time: {secs:.2}s");
    if secs > 0.0 {
        println!("Matches per second: {:.2}", total as f64 / secs);
    }

    println!("\n=== Results ===");
    println!("P1 wins: {} ({:.1}%)", stats.p1_wins, 100.0 * stats.win_rate(Player::One));
    println!("P2 wins: {} ({:.1}%)", stats.p2_wins, 100.0 * stats.win_rate(Player::Two));
    if stats.unfinished > 0 {
        println!("Unfinished: {}", stats.unfinished);
    }
    if total > 0 {
        println!("Average points per match: {:.1}", stats.total_points as f64 / total as f64);
        println!("Average sets per match: {:.2}", stats.total_sets as f64 / total as f64);
        println!("Tiebreaks played: {}", stats.tiebreaks);
    }

    println!("\n=== Most Common Scorelines ===");
    for (line, count) in stats.top_scorelines(10) {
        println!("  {line}: {count}");
    }
}
