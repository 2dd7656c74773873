//! Match format configuration
//!
//! A `MatchFormat` fixes how many sets are played and how the deciding
//! set is resolved. It is validated once, before any match exists.

use crate::{Result, TennisError};
use serde::{Deserialize, Serialize};

/// How a single set is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetRule {
    /// First to 6 with a 2-game lead, tiebreak at 6-6 (ends 7-6)
    Standard,
    /// First to 6 with a 2-game lead, no tiebreak, no upper bound
    Advantage,
}

impl SetRule {
    /// Does 6-6 in games force a tiebreak game?
    pub fn allows_tiebreak(&self) -> bool {
        matches!(self, SetRule::Standard)
    }
}

/// Configuration surface for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFormat {
    /// Number of sets in the match (odd, typically 1, 3 or 5)
    pub best_of_sets: u32,

    /// Whether the deciding set may be played as an advantage set
    pub advantage_set: bool,

    /// Whether the deciding set ends in a tiebreak at 6-6
    pub tiebreak_in_final_set: bool,
}

impl MatchFormat {
    pub fn new(best_of_sets: u32, advantage_set: bool, tiebreak_in_final_set: bool) -> Self {
        MatchFormat {
            best_of_sets,
            advantage_set,
            tiebreak_in_final_set,
        }
    }

    /// Best of `n` sets with the default deciding-set rules
    pub fn best_of(best_of_sets: u32) -> Self {
        MatchFormat {
            best_of_sets,
            ..MatchFormat::default()
        }
    }

    /// Reject formats that cannot produce a winner
    pub fn validate(&self) -> Result<()> {
        if self.best_of_sets == 0 {
            return Err(TennisError::InvalidConfiguration(
                "best_of_sets must be positive".to_string(),
            ));
        }
        if self.best_of_sets % 2 == 0 {
            return Err(TennisError::InvalidConfiguration(format!(
                "best_of_sets must be odd (got {})",
                self.best_of_sets
            )));
        }
        Ok(())
    }

    /// Sets needed to clinch the match
    pub fn sets_to_win(&self) -> u32 {
        self.best_of_sets / 2 + 1
    }

    /// Is the set at `set_number` (1-based) the deciding set?
    pub fn is_final_set(&self, set_number: usize) -> bool {
        set_number == self.best_of_sets as usize
    }

    /// Resolve the rule for the set at `set_number` (1-based)
    pub fn set_rule(&self, set_number: usize) -> SetRule {
        SetRule::resolve(self.is_final_set(set_number), self.tiebreak_in_final_set)
    }
}

impl SetRule {
    /// Pick the rule from the raw match flags.
    ///
    /// Only a deciding set without a tiebreak is played as an advantage set.
    pub fn resolve(is_final_set: bool, tiebreak_in_final_set: bool) -> SetRule {
        if !is_final_set || tiebreak_in_final_set {
            SetRule::Standard
        } else {
            SetRule::Advantage
        }
    }
}

impl Default for MatchFormat {
    fn default() -> Self {
        MatchFormat {
            best_of_sets: 3,
            advantage_set: true,
            tiebreak_in_final_set: true,
        }
    }
}
