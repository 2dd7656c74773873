//! A set: an append-only run of games

use crate::core::{Player, SetRule};
use crate::scoring::Game;
use crate::{Result, TennisError};
use serde::{Deserialize, Serialize};

/// A set in progress or finished
///
/// Games won are always recomputed from the game sequence, so the
/// counts can never drift from the games themselves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TennisSet {
    games: Vec<Game>,
    winner: Option<Player>,
}

impl TennisSet {
    pub fn new() -> Self {
        TennisSet {
            games: Vec::new(),
            winner: None,
        }
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn is_completed(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// The trailing game (in progress, or the last one played)
    pub fn current_game(&self) -> Option<&Game> {
        self.games.last()
    }

    pub fn current_game_mut(&mut self) -> Option<&mut Game> {
        self.games.last_mut()
    }

    /// Games won by `player` (completed games only)
    pub fn games_won(&self, player: Player) -> u32 {
        self.games
            .iter()
            .filter(|g| g.winner() == Some(player))
            .count() as u32
    }

    /// Games won as (player one, player two)
    pub fn score(&self) -> (u32, u32) {
        (self.games_won(Player::One), self.games_won(Player::Two))
    }

    /// Append a fresh game
    ///
    /// The trailing game must be finished first; a finished set accepts
    /// no more games.
    pub fn add_game(&mut self, is_tiebreak: bool) -> Result<&mut Game> {
        if self.is_completed() {
            return Err(TennisError::AlreadyCompleted(
                "cannot add a game to a completed set".to_string(),
            ));
        }
        if self.games.last().is_some_and(|g| !g.is_completed()) {
            return Err(TennisError::StructuralInvariantViolation(format!(
                "game {} of the set is still in progress",
                self.games.len()
            )));
        }

        self.games.push(Game::new(is_tiebreak));
        let index = self.games.len() - 1;
        Ok(&mut self.games[index])
    }

    /// Does the current game count make the next game a tiebreak?
    pub fn needs_tiebreak(&self, rule: SetRule) -> bool {
        rule.allows_tiebreak() && self.score() == (6, 6)
    }

    /// Was the set closed out by a tiebreak game?
    pub fn was_decided_by_tiebreak(&self) -> bool {
        self.is_completed() && self.games.last().is_some_and(|g| g.is_tiebreak())
    }

    /// Apply the set-win condition using the match flags
    ///
    /// `advantage_set` is accepted for callers holding the raw flags; the
    /// rule depends only on the final-set tiebreak flag.
    pub fn evaluate_completion(
        &mut self,
        is_final_set: bool,
        tiebreak_in_final_set: bool,
        _advantage_set: bool,
    ) -> Option<Player> {
        let rule = SetRule::resolve(is_final_set, tiebreak_in_final_set);
        self.evaluate_with_rule(rule)
    }

    /// Apply the set-win condition for a resolved rule
    ///
    /// Both rules need 6 games and a 2-game lead. Standard sets also end
    /// at 7-6 once the tiebreak game is played.
    pub fn evaluate_with_rule(&mut self, rule: SetRule) -> Option<Player> {
        if self.winner.is_some() {
            return self.winner;
        }

        let (p1, p2) = self.score();
        let (leader, high, low) = if p1 >= p2 {
            (Player::One, p1, p2)
        } else {
            (Player::Two, p2, p1)
        };

        let won = match rule {
            SetRule::Standard => (high >= 6 && high - low >= 2) || (high == 7 && low == 6),
            SetRule::Advantage => high >= 6 && high - low >= 2,
        };

        if won {
            self.winner = Some(leader);
        }
        self.winner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Append a game won by `player` to love
    fn win_game(set: &mut TennisSet, player: Player, tiebreak: bool) {
        let game = set.add_game(tiebreak).unwrap();
        let needed = if tiebreak { 7 } else { 4 };
        for _ in 0..needed {
            game.score_point(player);
        }
        assert!(game.is_completed());
    }

    fn play_games(set: &mut TennisSet, p1: u32, p2: u32) {
        for _ in 0..p1.min(p2) {
            win_game(set, Player::One, false);
            win_game(set, Player::Two, false);
        }
        for _ in p2..p1 {
            win_game(set, Player::One, false);
        }
        for _ in p1..p2 {
            win_game(set, Player::Two, false);
        }
    }

    #[test]
    fn test_new_set() {
        let set = TennisSet::new();
        assert!(set.games().is_empty());
        assert!(!set.is_completed());
        assert_eq!(set.score(), (0, 0));
    }

    #[test]
    fn test_add_game_requires_finished_trailing_game() {
        let mut set = TennisSet::new();
        set.add_game(false).unwrap();
        assert!(matches!(
            set.add_game(false),
            Err(TennisError::StructuralInvariantViolation(_))
        ));
        assert_eq!(set.games().len(), 1);
    }

    #[test]
    fn test_six_love() {
        let mut set = TennisSet::new();
        play_games(&mut set, 6, 0);
        assert_eq!(set.evaluate_with_rule(SetRule::Standard), Some(Player::One));
        assert_eq!(set.score(), (6, 0));
    }

    #[test]
    fn test_six_five_is_not_enough() {
        let mut set = TennisSet::new();
        play_games(&mut set, 6, 5);
        assert_eq!(set.evaluate_with_rule(SetRule::Standard), None);
        win_game(&mut set, Player::One, false);
        assert_eq!(set.evaluate_with_rule(SetRule::Standard), Some(Player::One));
        assert_eq!(set.score(), (7, 5));
    }

    #[test]
    fn test_six_all_forces_tiebreak() {
        let mut set = TennisSet::new();
        play_games(&mut set, 6, 6);
        assert_eq!(set.evaluate_with_rule(SetRule::Standard), None);
        assert!(set.needs_tiebreak(SetRule::Standard));
        assert!(!set.needs_tiebreak(SetRule::Advantage));

        win_game(&mut set, Player::Two, true);
        assert_eq!(set.evaluate_with_rule(SetRule::Standard), Some(Player::Two));
        assert_eq!(set.score(), (6, 7));
        assert!(set.was_decided_by_tiebreak());
    }

    #[test]
    fn test_advantage_set_runs_on() {
        let mut set = TennisSet::new();
        play_games(&mut set, 7, 7);
        win_game(&mut set, Player::One, false);
        assert_eq!(set.evaluate_with_rule(SetRule::Advantage), None);
        win_game(&mut set, Player::One, false);
        assert_eq!(set.evaluate_with_rule(SetRule::Advantage), Some(Player::One));
        assert_eq!(set.score(), (9, 7));
    }

    #[test]
    fn test_evaluate_completion_flags() {
        let mut set = TennisSet::new();
        play_games(&mut set, 6, 6);
        win_game(&mut set, Player::One, false);
        // 7-6 without a tiebreak in an advantage final set is still open
        assert_eq!(set.evaluate_completion(true, false, true), None);
        // the same count under standard rules closes the set
        let mut standard = set.clone();
        assert_eq!(standard.evaluate_completion(false, false, true), Some(Player::One));
    }

    #[test]
    fn test_completed_set_rejects_games() {
        let mut set = TennisSet::new();
        play_games(&mut set, 0, 6);
        assert_eq!(set.evaluate_with_rule(SetRule::Standard), Some(Player::Two));
        assert!(matches!(
            set.add_game(false),
            Err(TennisError::AlreadyCompleted(_))
        ));
        // winner never changes once set
        assert_eq!(set.evaluate_with_rule(SetRule::Advantage), Some(Player::Two));
    }
}
