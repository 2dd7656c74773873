//! Tennis score tracking
//!
//! Points build games, games build sets, sets build a match. The
//! `scoring` module holds the three state machines and the controller
//! that moves a match forward one point at a time; everything else
//! (simulation, undo, tournaments) sits on top of `record_point`.

pub mod core;
pub mod error;
pub mod scoring;
pub mod tournament;
pub mod undo;

pub use error::{Result, TennisError};
