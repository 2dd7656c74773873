//! Scoring state machines: game, set, match and the transitions between them

pub mod controller;
pub mod game;
pub mod logger;
pub mod match_loop;
pub mod match_state;
pub mod rally;
pub mod random_rally;
pub mod scripted_rally;
pub mod set;
pub mod view;

pub use controller::{open_first_game, record_point, start_match, PointOutcome};
pub use game::{Game, GamePoint};
pub use logger::{LogEntry, MatchLogger, OutputFormat, OutputMode, VerbosityLevel};
pub use match_loop::{MatchEndReason, MatchLoop, MatchResult};
pub use match_state::TennisMatch;
pub use rally::RallyController;
pub use random_rally::RandomRallyController;
pub use scripted_rally::ScriptedRallyController;
pub use set::TennisSet;
pub use view::{current_game_score, is_completed, match_winner, set_scores, ScoreView, SetScore};
