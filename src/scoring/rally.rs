//! Rally controller trait
//!
//! A rally controller decides who wins the next point of a driven match.
//! The match loop asks it once per point and passes a read-only view of
//! the score, so scripted input, simulations and a UI can all feed the
//! same scoring core.

use crate::core::Player;
use crate::scoring::ScoreView;

pub trait RallyController {
    /// Short name for logs ("scripted", "random", ...)
    fn name(&self) -> &str;

    /// Winner of the next point, or None when the controller has no more
    /// points to give (the loop then stops early)
    fn choose_point_winner(&mut self, view: &ScoreView) -> Option<Player>;

    /// Called once when the match is decided
    fn on_match_end(&mut self, _view: &ScoreView, _winner: Player) {}
}
