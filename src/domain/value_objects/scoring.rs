//! Scoring rules for dice pool resolution
//!
//! House rules vary between game lines (alternate exploding-die values,
//! harsher botches), so the per-face contributions are configuration rather
//! than constants. The defaults match the house system: tens count double,
//! ones subtract one success.

use serde::{Deserialize, Serialize};

/// Per-face scoring configuration for a d10 dice pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Successes contributed by a rolled 10
    pub ten_bonus: i32,
    /// Successes removed by a rolled 1
    pub one_penalty: i32,
    /// Lowest allowed difficulty
    pub min_difficulty: i32,
    /// Highest allowed difficulty (the die size)
    pub max_difficulty: i32,
    /// Upper bound on pool size; larger requests are rejected
    pub max_pool_size: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            ten_bonus: 2,
            one_penalty: 1,
            min_difficulty: 2,
            max_difficulty: 10,
            max_pool_size: 100,
        }
    }
}

impl ScoringRules {
    /// Successes contributed by a single die face at the given difficulty
    pub fn contribution(&self, face: u8, difficulty: i32) -> i32 {
        match face {
            10 => self.ten_bonus,
            1 => -self.one_penalty,
            f if i32::from(f) >= difficulty => 1,
            _ => 0,
        }
    }
}
