//! A single game: points for two players
//!
//! Standard games run 0, 15, 30, 40 with deuce and advantage. Tiebreak
//! games count raw points to 7 with a 2-point margin.

use crate::core::Player;
use serde::{Deserialize, Serialize};

/// Result of applying one point to a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePoint {
    /// Game already finished; nothing changed
    Ignored,
    /// Point added, game continues
    Scored,
    /// Advantage lost, score back to deuce
    BackToDeuce,
    /// Point finished the game
    Won(Player),
}

/// A game in progress or finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    points_player_one: u32,
    points_player_two: u32,
    is_tiebreak: bool,
    winner: Option<Player>,
}

impl Game {
    pub fn new(is_tiebreak: bool) -> Self {
        Game {
            points_player_one: 0,
            points_player_two: 0,
            is_tiebreak,
            winner: None,
        }
    }

    pub fn is_tiebreak(&self) -> bool {
        self.is_tiebreak
    }

    pub fn is_completed(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Raw point count for a player
    pub fn points(&self, player: Player) -> u32 {
        match player {
            Player::One => self.points_player_one,
            Player::Two => self.points_player_two,
        }
    }

    fn points_mut(&mut self, player: Player) -> &mut u32 {
        match player {
            Player::One => &mut self.points_player_one,
            Player::Two => &mut self.points_player_two,
        }
    }

    /// Award a point to `player`
    ///
    /// A finished game is frozen: the call is a no-op returning `Ignored`.
    pub fn score_point(&mut self, player: Player) -> GamePoint {
        if self.is_completed() {
            return GamePoint::Ignored;
        }

        let opponent = player.opponent();
        if !self.is_tiebreak && self.points(opponent) == 4 && self.points(player) == 3 {
            // Advantage is lost, not transferred
            self.points_player_one = 3;
            self.points_player_two = 3;
            return GamePoint::BackToDeuce;
        }

        *self.points_mut(player) += 1;

        match self.evaluate_completion() {
            Some(winner) => GamePoint::Won(winner),
            None => GamePoint::Scored,
        }
    }

    /// Check the win condition and freeze the game if it holds
    fn evaluate_completion(&mut self) -> Option<Player> {
        let target = if self.is_tiebreak { 7 } else { 4 };
        for player in Player::BOTH {
            let mine = self.points(player);
            let theirs = self.points(player.opponent());
            if mine >= target && mine >= theirs + 2 {
                self.winner = Some(player);
                return self.winner;
            }
        }
        None
    }

    /// Is the score at deuce (both on 40 or beyond, level)?
    pub fn is_deuce(&self) -> bool {
        !self.is_tiebreak
            && !self.is_completed()
            && self.points_player_one >= 3
            && self.points_player_one == self.points_player_two
    }

    /// The player holding advantage, if any
    pub fn advantage(&self) -> Option<Player> {
        if self.is_tiebreak || self.is_completed() {
            return None;
        }
        let (p1, p2) = (self.points_player_one, self.points_player_two);
        if p1 >= 3 && p2 >= 3 && p1 != p2 {
            Some(if p1 > p2 { Player::One } else { Player::Two })
        } else {
            None
        }
    }

    /// Scoreboard text using generic player labels
    pub fn display_score(&self) -> String {
        self.display_score_with_names(Player::One.label(), Player::Two.label())
    }

    /// Scoreboard text, naming players in advantage and game messages
    pub fn display_score_with_names(&self, player_one: &str, player_two: &str) -> String {
        let name = |player: Player| match player {
            Player::One => player_one,
            Player::Two => player_two,
        };

        if let Some(winner) = self.winner {
            return format!("Game {}", name(winner));
        }

        if self.is_tiebreak {
            return format!("{}-{}", self.points_player_one, self.points_player_two);
        }

        if self.is_deuce() {
            return "Deuce".to_string();
        }
        if let Some(leader) = self.advantage() {
            return format!("Advantage {}", name(leader));
        }

        format!(
            "{}-{}",
            point_call(self.points_player_one),
            point_call(self.points_player_two)
        )
    }
}

/// Traditional call for a standard-game point count
fn point_call(points: u32) -> &'static str {
    match points {
        0 => "0",
        1 => "15",
        2 => "30",
        3 => "40",
        _ => "A",
    }
}
