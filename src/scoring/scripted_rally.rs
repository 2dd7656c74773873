//! Scripted rally controller for replays and deterministic tests
//!
//! Follows a predetermined list of point winners.

use crate::core::{parse_point_script, Player};
use crate::scoring::rally::RallyController;
use crate::scoring::ScoreView;
use crate::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedRallyController {
    points: Vec<Player>,
    current_point: usize,
}

impl ScriptedRallyController {
    pub fn new(points: Vec<Player>) -> Self {
        ScriptedRallyController {
            points,
            current_point: 0,
        }
    }

    /// Build from a point script such as "1 1 2 p2, p1"
    pub fn from_script(script: &str) -> Result<Self> {
        Ok(Self::new(parse_point_script(script)?))
    }

    /// Points not yet handed out
    pub fn remaining(&self) -> usize {
        self.points.len().saturating_sub(self.current_point)
    }
}

impl RallyController for ScriptedRallyController {
    fn name(&self) -> &str {
        "scripted"
    }

    fn choose_point_winner(&mut self, _view: &ScoreView) -> Option<Player> {
        let point = self.points.get(self.current_point).copied()?;
        self.current_point += 1;
        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MatchFormat;
    use crate::scoring::start_match;

    #[test]
    fn test_scripted_controller() {
        let m = start_match("Alice", "Bob", MatchFormat::default()).unwrap();
        let view = ScoreView::new(&m);

        let mut controller = ScriptedRallyController::from_script("1 2 p2").unwrap();
        assert_eq!(controller.remaining(), 3);
        assert_eq!(controller.choose_point_winner(&view), Some(Player::One));
        assert_eq!(controller.choose_point_winner(&view), Some(Player::Two));
        assert_eq!(controller.choose_point_winner(&view), Some(Player::Two));
        assert_eq!(controller.choose_point_winner(&view), None);
        assert_eq!(controller.remaining(), 0);
    }

    #[test]
    fn test_remaining_after_restore() {
        let json = r#"{"points":["One","Two"],"current_point":5}"#;
        let mut controller: ScriptedRallyController = serde_json::from_str(json).unwrap();
        assert_eq!(controller.remaining(), 0);

        let m = start_match("Alice", "Bob", MatchFormat::default()).unwrap();
        assert_eq!(controller.choose_point_winner(&ScoreView::new(&m)), None);
    }

    #[test]
    fn test_bad_script() {
        assert!(ScriptedRallyController::from_script("1 1 x").is_err());
    }
}
