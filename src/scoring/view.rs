//! Read-only accessors for a presentation layer
//!
//! The scoreboard never mutates the match; it only inspects it through
//! these helpers.

use crate::core::Player;
use crate::scoring::TennisMatch;
use serde::{Deserialize, Serialize};
use std::fmt::Write as FmtWrite;

/// Games per player for one set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub player_one_games: u32,
    pub player_two_games: u32,
    pub completed: bool,
    pub winner: Option<Player>,
}

/// Score text of the game in progress ("" before the first point is possible)
pub fn current_game_score(tennis_match: &TennisMatch) -> String {
    tennis_match
        .current_game()
        .map(|g| {
            g.display_score_with_names(
                tennis_match.player_one_name(),
                tennis_match.player_two_name(),
            )
        })
        .unwrap_or_default()
}

/// Games won in every set, in playing order
pub fn set_scores(tennis_match: &TennisMatch) -> Vec<SetScore> {
    tennis_match
        .sets()
        .iter()
        .map(|s| {
            let (player_one_games, player_two_games) = s.score();
            SetScore {
                player_one_games,
                player_two_games,
                completed: s.is_completed(),
                winner: s.winner(),
            }
        })
        .collect()
}

pub fn match_winner(tennis_match: &TennisMatch) -> Option<Player> {
    tennis_match.winner()
}

pub fn is_completed(tennis_match: &TennisMatch) -> bool {
    tennis_match.is_completed()
}

/// Borrowed view bundling the accessors above
pub struct ScoreView<'a> {
    tennis_match: &'a TennisMatch,
}

impl<'a> ScoreView<'a> {
    pub fn new(tennis_match: &'a TennisMatch) -> Self {
        ScoreView { tennis_match }
    }

    pub fn current_game_score(&self) -> String {
        current_game_score(self.tennis_match)
    }

    pub fn set_scores(&self) -> Vec<SetScore> {
        set_scores(self.tennis_match)
    }

    pub fn match_winner(&self) -> Option<Player> {
        match_winner(self.tennis_match)
    }

    pub fn is_completed(&self) -> bool {
        is_completed(self.tennis_match)
    }

    /// Sets won by `player`
    pub fn sets_won(&self, player: Player) -> u32 {
        self.tennis_match.sets_won(player)
    }

    /// Is the game in progress a tiebreak?
    pub fn in_tiebreak(&self) -> bool {
        !self.is_completed()
            && self
                .tennis_match
                .current_game()
                .is_some_and(|g| g.is_tiebreak())
    }

    /// Compact scoreline such as "6-4 3-6 7-6(5)"
    ///
    /// Sets decided by a tiebreak show the loser's tiebreak points in
    /// parentheses. An unfinished trailing set is included as it stands.
    pub fn scoreline(&self) -> String {
        let mut line = String::new();
        for set in self.tennis_match.sets() {
            let (p1, p2) = set.score();
            if p1 == 0 && p2 == 0 && !set.is_completed() {
                continue;
            }
            if !line.is_empty() {
                line.push(' ');
            }
            let _ = write!(line, "{p1}-{p2}");
            if set.was_decided_by_tiebreak() {
                if let Some(tiebreak) = set.games().last() {
                    let loser_points = tiebreak.points(Player::One).min(tiebreak.points(Player::Two));
                    let _ = write!(line, "({loser_points})");
                }
            }
        }
        line
    }

    /// Multi-line scoreboard for terminal output
    pub fn scoreboard(&self) -> String {
        let m = self.tennis_match;
        let width = m.player_one_name().len().max(m.player_two_name().len());
        let mut out = String::new();

        for player in Player::BOTH {
            let _ = write!(out, "{:<width$}  {}", m.player_name(player), m.sets_won(player));
            for set in m.sets() {
                let _ = write!(out, "  {}", set.games_won(player));
            }
            out.push('\n');
        }

        match self.match_winner() {
            Some(winner) => {
                let _ = write!(out, "Winner: {}", m.player_name(winner));
            }
            None => {
                let label = if self.in_tiebreak() { "Tiebreak" } else { "Game" };
                let _ = write!(out, "{label}: {}", self.current_game_score());
            }
        }
        out
    }
}
