//! Match state: players, format and the sets played so far

use crate::core::{MatchFormat, Player, SetRule};
use crate::scoring::{Game, TennisSet};
use crate::{Result, TennisError};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use time::OffsetDateTime;

/// Complete state of one match
///
/// Owns its sets exclusively; each set owns its games. Sets are only
/// ever appended, and none are appended once the match is decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TennisMatch {
    player_one_name: String,
    player_two_name: String,
    format: MatchFormat,

    /// Creation time (UTC)
    #[serde(with = "time::serde::rfc3339")]
    date: OffsetDateTime,

    completed: bool,

    /// Sets in playing order (at most `best_of_sets`, inline for best of 5)
    sets: SmallVec<[TennisSet; 5]>,
}

impl TennisMatch {
    /// Create an empty match after validating names and format
    pub fn new(
        player_one_name: impl Into<String>,
        player_two_name: impl Into<String>,
        format: MatchFormat,
    ) -> Result<Self> {
        let player_one_name = player_one_name.into();
        let player_two_name = player_two_name.into();

        if player_one_name.trim().is_empty() || player_two_name.trim().is_empty() {
            return Err(TennisError::InvalidConfiguration(
                "player names must not be empty".to_string(),
            ));
        }
        format.validate()?;

        Ok(TennisMatch {
            player_one_name,
            player_two_name,
            format,
            date: OffsetDateTime::now_utc(),
            completed: false,
            sets: SmallVec::new(),
        })
    }

    /// An empty copy with the same players, format and date
    pub fn restarted(&self) -> Self {
        TennisMatch {
            player_one_name: self.player_one_name.clone(),
            player_two_name: self.player_two_name.clone(),
            format: self.format,
            date: self.date,
            completed: false,
            sets: SmallVec::new(),
        }
    }

    pub fn player_one_name(&self) -> &str {
        &self.player_one_name
    }

    pub fn player_two_name(&self) -> &str {
        &self.player_two_name
    }

    pub fn player_name(&self, player: Player) -> &str {
        match player {
            Player::One => &self.player_one_name,
            Player::Two => &self.player_two_name,
        }
    }

    pub fn format(&self) -> &MatchFormat {
        &self.format
    }

    pub fn best_of_sets(&self) -> u32 {
        self.format.best_of_sets
    }

    pub fn advantage_set(&self) -> bool {
        self.format.advantage_set
    }

    pub fn tiebreak_in_final_set(&self) -> bool {
        self.format.tiebreak_in_final_set
    }

    pub fn date(&self) -> OffsetDateTime {
        self.date
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn sets(&self) -> &[TennisSet] {
        &self.sets
    }

    pub fn current_set(&self) -> Option<&TennisSet> {
        self.sets.last()
    }

    pub fn current_set_mut(&mut self) -> Option<&mut TennisSet> {
        self.sets.last_mut()
    }

    /// The trailing game of the trailing set
    pub fn current_game(&self) -> Option<&Game> {
        self.current_set().and_then(|s| s.current_game())
    }

    /// Rule for the trailing set
    pub fn current_set_rule(&self) -> SetRule {
        self.format.set_rule(self.sets.len())
    }

    pub fn sets_to_win(&self) -> u32 {
        self.format.sets_to_win()
    }

    /// Sets won by `player` (completed sets only)
    pub fn sets_won(&self, player: Player) -> u32 {
        self.sets
            .iter()
            .filter(|s| s.winner() == Some(player))
            .count() as u32
    }

    /// Append an empty set
    pub fn add_set(&mut self) -> Result<&mut TennisSet> {
        if self.completed {
            return Err(TennisError::AlreadyCompleted(
                "cannot add a set to a completed match".to_string(),
            ));
        }
        if self.sets.last().is_some_and(|s| !s.is_completed()) {
            return Err(TennisError::StructuralInvariantViolation(format!(
                "set {} is still in progress",
                self.sets.len()
            )));
        }
        if self.sets.len() >= self.format.best_of_sets as usize {
            return Err(TennisError::StructuralInvariantViolation(format!(
                "all {} sets have already been played",
                self.format.best_of_sets
            )));
        }

        self.sets.push(TennisSet::new());
        let index = self.sets.len() - 1;
        Ok(&mut self.sets[index])
    }

    /// Mark the match completed once a player reaches `sets_to_win`
    pub fn evaluate_completion(&mut self) -> Option<Player> {
        let sets_to_win = self.sets_to_win();
        if Player::BOTH.iter().any(|&p| self.sets_won(p) >= sets_to_win) {
            self.completed = true;
        }
        self.winner()
    }

    /// The player with more sets, defined only once the match is over
    pub fn winner(&self) -> Option<Player> {
        if !self.completed {
            return None;
        }
        let (p1, p2) = (self.sets_won(Player::One), self.sets_won(Player::Two));
        Some(if p1 > p2 { Player::One } else { Player::Two })
    }
}
