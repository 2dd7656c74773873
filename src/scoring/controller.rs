//! Cross-level transitions after every point
//!
//! `record_point` is the only entry point that mutates a running match.
//! It scores the point on the current game and then walks up the
//! hierarchy: a finished game may finish the set, a finished set may
//! finish the match. Whatever is left open gets a fresh set or game.

use crate::core::{MatchFormat, Player};
use crate::scoring::{GamePoint, TennisMatch};
use crate::{Result, TennisError};
use serde::{Deserialize, Serialize};

/// Deepest transition caused by a single point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointOutcome {
    /// Point added, game continues
    Point,
    /// Advantage lost, game back to deuce
    Deuce,
    /// Game finished; `tiebreak_next` tells whether the next game is a tiebreak
    GameWon { winner: Player, tiebreak_next: bool },
    /// Set finished (`set_number` is 1-based)
    SetWon { winner: Player, set_number: usize },
    /// Match finished
    MatchWon { winner: Player },
}

/// Create a match and open its first set and game
pub fn start_match(
    player_one_name: impl Into<String>,
    player_two_name: impl Into<String>,
    format: MatchFormat,
) -> Result<TennisMatch> {
    let mut tennis_match = TennisMatch::new(player_one_name, player_two_name, format)?;
    open_first_game(&mut tennis_match)?;
    Ok(tennis_match)
}

/// Open set 1, game 1 on an empty match
pub fn open_first_game(tennis_match: &mut TennisMatch) -> Result<()> {
    if !tennis_match.sets().is_empty() {
        return Err(TennisError::InvalidState(
            "match has already started".to_string(),
        ));
    }
    tennis_match.add_set()?.add_game(false)?;
    Ok(())
}

/// Award a point to `player` and carry the result through set and match
///
/// Fails without touching the match if it is already decided or has no
/// game in progress.
pub fn record_point(tennis_match: &mut TennisMatch, player: Player) -> Result<PointOutcome> {
    if tennis_match.is_completed() {
        return Err(TennisError::AlreadyCompleted(
            "match is already completed".to_string(),
        ));
    }

    let set_number = tennis_match.sets().len();
    let rule = tennis_match.current_set_rule();

    let set = tennis_match
        .current_set_mut()
        .ok_or_else(|| TennisError::InvalidState("match has no set in progress".to_string()))?;
    if set.is_completed() {
        return Err(TennisError::InvalidState(format!(
            "set {set_number} is already completed"
        )));
    }
    let game = set
        .current_game_mut()
        .ok_or_else(|| TennisError::InvalidState("set has no game in progress".to_string()))?;
    if game.is_completed() {
        return Err(TennisError::InvalidState(
            "current game is already completed".to_string(),
        ));
    }

    let game_winner = match game.score_point(player) {
        GamePoint::Scored => return Ok(PointOutcome::Point),
        GamePoint::BackToDeuce => return Ok(PointOutcome::Deuce),
        GamePoint::Ignored => {
            return Err(TennisError::InvalidState(
                "point ignored by a completed game".to_string(),
            ))
        }
        GamePoint::Won(winner) => winner,
    };

    let set_winner = set.evaluate_with_rule(rule);
    let tiebreak_next = set.needs_tiebreak(rule);

    match set_winner {
        None => {
            set.add_game(tiebreak_next)?;
            Ok(PointOutcome::GameWon {
                winner: game_winner,
                tiebreak_next,
            })
        }
        Some(set_winner) => {
            if let Some(match_winner) = tennis_match.evaluate_completion() {
                return Ok(PointOutcome::MatchWon {
                    winner: match_winner,
                });
            }
            tennis_match.add_set()?.add_game(false)?;
            Ok(PointOutcome::SetWon {
                winner: set_winner,
                set_number,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SetRule;

    fn points(m: &mut TennisMatch, player: Player, n: usize) -> PointOutcome {
        let mut last = PointOutcome::Point;
        for _ in 0..n {
            last = record_point(m, player).unwrap();
        }
        last
    }

    #[test]
    fn test_start_match_opens_first_game() {
        let m = start_match("Alice", "Bob", MatchFormat::default()).unwrap();
        assert_eq!(m.sets().len(), 1);
        assert_eq!(m.sets()[0].games().len(), 1);
        assert!(!m.current_game().unwrap().is_tiebreak());
    }

    #[test]
    fn test_record_point_on_empty_match_fails() {
        let mut m = TennisMatch::new("Alice", "Bob", MatchFormat::default()).unwrap();
        assert!(matches!(
            record_point(&mut m, Player::One),
            Err(TennisError::InvalidState(_))
        ));
        assert!(m.sets().is_empty());
    }

    #[test]
    fn test_outcomes_climb_the_hierarchy() {
        let mut m = start_match("Alice", "Bob", MatchFormat::best_of(1)).unwrap();
        assert_eq!(record_point(&mut m, Player::One).unwrap(), PointOutcome::Point);
        assert_eq!(
            points(&mut m, Player::One, 3),
            PointOutcome::GameWon {
                winner: Player::One,
                tiebreak_next: false
            }
        );
        assert_eq!(m.sets()[0].games().len(), 2);

        for _ in 0..4 {
            points(&mut m, Player::One, 4);
        }
        assert_eq!(
            points(&mut m, Player::One, 4),
            PointOutcome::MatchWon { winner: Player::One }
        );
        assert!(m.is_completed());
        assert_eq!(m.winner(), Some(Player::One));
    }

    #[test]
    fn test_deuce_outcome() {
        let mut m = start_match("Alice", "Bob", MatchFormat::default()).unwrap();
        points(&mut m, Player::One, 3);
        points(&mut m, Player::Two, 3);
        assert_eq!(record_point(&mut m, Player::One).unwrap(), PointOutcome::Point);
        assert_eq!(record_point(&mut m, Player::Two).unwrap(), PointOutcome::Deuce);
    }

    #[test]
    fn test_set_won_opens_next_set() {
        let mut m = start_match("Alice", "Bob", MatchFormat::best_of(3)).unwrap();
        for _ in 0..5 {
            points(&mut m, Player::Two, 4);
        }
        assert_eq!(
            points(&mut m, Player::Two, 4),
            PointOutcome::SetWon {
                winner: Player::Two,
                set_number: 1
            }
        );
        assert_eq!(m.sets().len(), 2);
        assert_eq!(m.sets()[1].games().len(), 1);
        assert!(!m.current_game().unwrap().is_tiebreak());
    }

    #[test]
    fn test_tiebreak_flag_at_six_all() {
        let mut m = start_match("Alice", "Bob", MatchFormat::default()).unwrap();
        for _ in 0..5 {
            points(&mut m, Player::One, 4);
            points(&mut m, Player::Two, 4);
        }
        points(&mut m, Player::One, 4);
        assert_eq!(
            points(&mut m, Player::Two, 4),
            PointOutcome::GameWon {
                winner: Player::Two,
                tiebreak_next: true
            }
        );
        assert!(m.current_game().unwrap().is_tiebreak());
        assert_eq!(m.current_set_rule(), SetRule::Standard);
    }

    #[test]
    fn test_completed_match_rejects_points() {
        let mut m = start_match("Alice", "Bob", MatchFormat::best_of(1)).unwrap();
        for _ in 0..6 {
            points(&mut m, Player::One, 4);
        }
        assert!(m.is_completed());
        let before = m.clone();
        assert!(matches!(
            record_point(&mut m, Player::Two),
            Err(TennisError::AlreadyCompleted(_))
        ));
        assert_eq!(m, before);
    }

    #[test]
    fn test_start_twice_fails() {
        let mut m = start_match("Alice", "Bob", MatchFormat::default()).unwrap();
        assert!(matches!(
            open_first_game(&mut m),
            Err(TennisError::InvalidState(_))
        ));
    }
}
