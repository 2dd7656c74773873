//! Point log for undo
//!
//! Scoring transitions are not invertible (a deuce reset forgets who had
//! advantage), so undo works by replay: the log keeps every point in
//! order, and undoing rebuilds the match from its empty start with the
//! last point dropped.

use crate::core::Player;
use crate::scoring::{open_first_game, record_point, TennisMatch};
use crate::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointLog {
    /// Point winners, oldest first
    points: Vec<Player>,

    /// Is logging enabled?
    enabled: bool,
}

impl PointLog {
    pub fn new() -> Self {
        PointLog {
            points: Vec::new(),
            enabled: true,
        }
    }

    /// Create a disabled log (for benchmarking)
    pub fn disabled() -> Self {
        PointLog {
            points: Vec::new(),
            enabled: false,
        }
    }

    pub fn log(&mut self, player: Player) {
        if self.enabled {
            self.points.push(player);
        }
    }

    pub fn pop(&mut self) -> Option<Player> {
        self.points.pop()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Player] {
        &self.points
    }
}

/// Score a point and remember it for undo
pub fn record_logged_point(
    tennis_match: &mut TennisMatch,
    log: &mut PointLog,
    player: Player,
) -> Result<crate::scoring::PointOutcome> {
    let outcome = record_point(tennis_match, player)?;
    log.log(player);
    Ok(outcome)
}

/// Rebuild a match from its empty start and replay `points`
pub fn replay(template: &TennisMatch, points: &[Player]) -> Result<TennisMatch> {
    let mut rebuilt = template.restarted();
    open_first_game(&mut rebuilt)?;
    for &player in points {
        record_point(&mut rebuilt, player)?;
    }
    Ok(rebuilt)
}

/// Take back the most recent point
///
/// Returns the player whose point was removed, or None when the log is
/// empty. On error the match and log are left untouched.
pub fn undo_last_point(tennis_match: &mut TennisMatch, log: &mut PointLog) -> Result<Option<Player>> {
    let Some((&last, earlier)) = log.points.split_last() else {
        return Ok(None);
    };
    let rebuilt = replay(tennis_match, earlier)?;
    *tennis_match = rebuilt;
    log.points.pop();
    Ok(Some(last))
}
