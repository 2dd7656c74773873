//! Player sides

use crate::{Result, TennisError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two sides of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Both sides in serving order
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    /// The other side of the net
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Index into per-player arrays (0 for One, 1 for Two)
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Generic label used when no player names are known
    pub fn label(self) -> &'static str {
        match self {
            Player::One => "Player 1",
            Player::Two => "Player 2",
        }
    }

    /// Parse a single point-script token ("1", "p1", "2", "p2")
    pub fn from_token(token: &str) -> Result<Player> {
        match token.trim().to_lowercase().as_str() {
            "1" | "p1" => Ok(Player::One),
            "2" | "p2" => Ok(Player::Two),
            other => Err(TennisError::ParseError(format!(
                "invalid player '{other}' (expected: 1, 2, p1 or p2)"
            ))),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Player {
    type Err = TennisError;

    fn from_str(s: &str) -> Result<Self> {
        Player::from_token(s)
    }
}

/// Parse a point script into the sequence of point winners
///
/// Tokens are separated by whitespace or commas. `#` starts a comment
/// that runs to the end of the line.
///
/// Example: "1 1 2, p2 p1  # deuce soon"
pub fn parse_point_script(script: &str) -> Result<Vec<Player>> {
    let mut points = Vec::new();
    for line in script.lines() {
        let content = match line.find('#') {
            Some(idx) => &line[..idx],
            None => line,
        };
        for token in content
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            points.push(Player::from_token(token)?);
        }
    }
    Ok(points)
}
