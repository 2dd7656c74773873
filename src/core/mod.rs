//! Core scoring types

pub mod format;
pub mod player;

pub use format::{MatchFormat, SetRule};
pub use player::{parse_point_script, Player};
