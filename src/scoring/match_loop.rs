//! Match loop implementation
//!
//! Drives a match point by point from a rally controller, logs every
//! transition and stops when the match is decided, the controller runs
//! dry or the point limit is hit.

use crate::core::Player;
use crate::scoring::logger::{MatchLogger, VerbosityLevel};
use crate::scoring::rally::RallyController;
use crate::scoring::{PointOutcome, ScoreView, TennisMatch};
use crate::undo::{record_logged_point, PointLog};
use crate::Result;

/// Reason the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEndReason {
    /// A player clinched the match
    Completed(Player),
    /// The controller had no more points to give
    OutOfPoints,
    /// Maximum point count reached
    PointLimit,
}

/// Result of running a match loop
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// Winner of the match (None if it did not finish)
    pub winner: Option<Player>,
    /// Points played during this run
    pub points_played: u32,
    /// Tiebreak games started during this run
    pub tiebreaks_played: u32,
    /// Final scoreline, e.g. "6-4 7-6(3)"
    pub scoreline: String,
    pub end_reason: MatchEndReason,
}

pub struct MatchLoop<'a> {
    pub tennis_match: &'a mut TennisMatch,
    pub logger: MatchLogger,
    /// Every point scored through this loop, for undo
    pub point_log: PointLog,
    max_points: u32,
}

impl<'a> MatchLoop<'a> {
    pub fn new(tennis_match: &'a mut TennisMatch) -> Self {
        MatchLoop {
            tennis_match,
            logger: MatchLogger::new(),
            point_log: PointLog::new(),
            max_points: 100_000,
        }
    }

    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.logger.set_verbosity(verbosity);
        self
    }

    pub fn with_max_points(mut self, max_points: u32) -> Self {
        self.max_points = max_points;
        self
    }

    /// Skip point logging (undo unavailable)
    pub fn without_point_log(mut self) -> Self {
        self.point_log = PointLog::disabled();
        self
    }

    /// Play points until the match ends or the controller stops
    pub fn run_match(&mut self, controller: &mut dyn RallyController) -> Result<MatchResult> {
        let mut points_played = 0;
        let mut tiebreaks_played = 0;

        let p1 = self.tennis_match.player_one_name().to_string();
        let p2 = self.tennis_match.player_two_name().to_string();
        self.logger.event(
            VerbosityLevel::Minimal,
            "match",
            &format!(
                "{p1} vs {p2}, best of {} ({} controller)",
                self.tennis_match.best_of_sets(),
                controller.name()
            ),
        );

        let end_reason = loop {
            if let Some(winner) = self.tennis_match.winner() {
                break MatchEndReason::Completed(winner);
            }
            if points_played >= self.max_points {
                break MatchEndReason::PointLimit;
            }

            let view = ScoreView::new(self.tennis_match);
            let Some(player) = controller.choose_point_winner(&view) else {
                break MatchEndReason::OutOfPoints;
            };

            let outcome = record_logged_point(self.tennis_match, &mut self.point_log, player)?;
            points_played += 1;
            if matches!(outcome, PointOutcome::GameWon { tiebreak_next: true, .. }) {
                tiebreaks_played += 1;
            }
            self.log_outcome(player, outcome);
        };

        let view = ScoreView::new(self.tennis_match);
        if let MatchEndReason::Completed(winner) = end_reason {
            controller.on_match_end(&view, winner);
        }

        Ok(MatchResult {
            winner: view.match_winner(),
            points_played,
            tiebreaks_played,
            scoreline: view.scoreline(),
            end_reason,
        })
    }

    fn log_outcome(&self, player: Player, outcome: PointOutcome) {
        let m = &*self.tennis_match;
        let name = |p: Player| m.player_name(p);
        let view = ScoreView::new(m);

        match outcome {
            PointOutcome::Point | PointOutcome::Deuce => {
                self.logger.event(
                    VerbosityLevel::Verbose,
                    "point",
                    &format!("Point {}: {}", name(player), view.current_game_score()),
                );
            }
            PointOutcome::GameWon {
                winner,
                tiebreak_next,
            } => {
                let (g1, g2) = m.current_set().map(|s| s.score()).unwrap_or((0, 0));
                self.logger.event(
                    VerbosityLevel::Normal,
                    "game",
                    &format!("Game {} ({g1}-{g2})", name(winner)),
                );
                if tiebreak_next {
                    self.logger
                        .event(VerbosityLevel::Normal, "game", "Tiebreak at 6-6");
                }
            }
            PointOutcome::SetWon { winner, set_number } => {
                let (g1, g2) = m.sets()[set_number - 1].score();
                self.logger.event(
                    VerbosityLevel::Minimal,
                    "set",
                    &format!("Set {set_number} to {} {g1}-{g2}", name(winner)),
                );
            }
            PointOutcome::MatchWon { winner } => {
                self.logger.event(
                    VerbosityLevel::Minimal,
                    "match",
                    &format!("Match to {}: {}", name(winner), view.scoreline()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MatchFormat;
    use crate::scoring::{start_match, RandomRallyController, ScriptedRallyController};

    #[test]
    fn test_scripted_match_runs_to_completion() {
        let mut m = start_match("Alice", "Bob", MatchFormat::best_of(1)).unwrap();
        let mut controller = ScriptedRallyController::new(vec![Player::One; 30]);

        let mut match_loop = MatchLoop::new(&mut m).with_verbosity(VerbosityLevel::Silent);
        match_loop.logger.enable_capture();
        let result = match_loop.run_match(&mut controller).unwrap();

        assert_eq!(result.winner, Some(Player::One));
        assert_eq!(result.points_played, 24);
        assert_eq!(result.scoreline, "6-0");
        assert_eq!(result.end_reason, MatchEndReason::Completed(Player::One));
        assert_eq!(match_loop.point_log.len(), 24);

        let logs = match_loop.logger.logs();
        assert_eq!(logs.iter().filter(|e| e.category.as_deref() == Some("game")).count(), 5);
        assert_eq!(logs.last().unwrap().message, "Match to Alice: 6-0");
        drop(logs);

        assert_eq!(controller.remaining(), 6);
    }

    #[test]
    fn test_script_runs_dry() {
        let mut m = start_match("Alice", "Bob", MatchFormat::default()).unwrap();
        let mut controller = ScriptedRallyController::new(vec![Player::Two; 5]);
        let result = MatchLoop::new(&mut m)
            .with_verbosity(VerbosityLevel::Silent)
            .run_match(&mut controller)
            .unwrap();

        assert_eq!(result.winner, None);
        assert_eq!(result.points_played, 5);
        assert_eq!(result.end_reason, MatchEndReason::OutOfPoints);
        assert_eq!(result.scoreline, "0-1");
    }

    #[test]
    fn test_point_limit() {
        let mut m = start_match("Alice", "Bob", MatchFormat::default()).unwrap();
        let mut controller = RandomRallyController::with_seed(3);
        let result = MatchLoop::new(&mut m)
            .with_verbosity(VerbosityLevel::Silent)
            .with_max_points(10)
            .run_match(&mut controller)
            .unwrap();
        assert_eq!(result.points_played, 10);
        assert_eq!(result.end_reason, MatchEndReason::PointLimit);
    }

    #[test]
    fn test_random_match_is_reproducible() {
        let run = |seed| {
            let mut m = start_match("Alice", "Bob", MatchFormat::best_of(5)).unwrap();
            let mut controller = RandomRallyController::with_seed(seed);
            let result = MatchLoop::new(&mut m)
                .with_verbosity(VerbosityLevel::Silent)
                .run_match(&mut controller)
                .unwrap();
            (result.scoreline, result.points_played, result.winner)
        };
        let first = run(99);
        assert_eq!(first, run(99));
        assert!(first.2.is_some());
    }
}
