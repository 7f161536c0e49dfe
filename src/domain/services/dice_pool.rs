//! Dice pool resolver
//!
//! Pure resolution of a d10 pool against a difficulty under a scoring rule
//! set. The random source is injected per call so outcomes are reproducible
//! under a seeded source; nothing here touches shared state.
//!
//! Scoring (defaults): a 10 counts as two successes, a face at or above the
//! difficulty counts as one, a 1 removes one. An empty pool cannot be rolled
//! at all and is an automatic botch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::EngineError;
use crate::domain::value_objects::ScoringRules;

/// Injectable source of die faces
pub trait RandomSource: Send {
    /// One uniformly random face in [1, 10]
    fn roll_d10(&mut self) -> u8;
}

/// Classification of a resolved roll, worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeClass {
    Botch,
    Failure,
    Success,
    Critical,
}

impl OutcomeClass {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Botch => "Botch",
            Self::Failure => "Failure",
            Self::Success => "Success",
            Self::Critical => "Critical Success",
        }
    }
}

impl std::fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Immutable result of one resolved pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Faces in the order they were drawn
    pub dice: Vec<u8>,
    pub pool_size: u32,
    pub difficulty: i32,
    /// Net successes; negative when ones outweigh successes
    pub success_count: i32,
    pub outcome: OutcomeClass,
    pub timestamp: DateTime<Utc>,
}

/// Resolve a pool of `pool_size` d10s against `difficulty`.
///
/// A `pool_size` of 0 is legal: no dice are drawn and the roll is an
/// automatic botch.
pub fn resolve_pool(
    pool_size: u32,
    difficulty: i32,
    rules: &ScoringRules,
    random: &mut dyn RandomSource,
) -> Result<RollOutcome, EngineError> {
    if pool_size > rules.max_pool_size {
        return Err(EngineError::InvalidPoolSize(i64::from(pool_size)));
    }
    if difficulty < rules.min_difficulty || difficulty > rules.max_difficulty {
        return Err(EngineError::InvalidDifficulty {
            got: difficulty,
            min: rules.min_difficulty,
            max: rules.max_difficulty,
        });
    }

    let dice: Vec<u8> = (0..pool_size).map(|_| random.roll_d10()).collect();
    Ok(score_dice(dice, pool_size, difficulty, rules))
}

/// Score an already-drawn sequence of faces
fn score_dice(
    dice: Vec<u8>,
    pool_size: u32,
    difficulty: i32,
    rules: &ScoringRules,
) -> RollOutcome {
    let success_count = dice
        .iter()
        .map(|&face| rules.contribution(face, difficulty))
        .sum();

    RollOutcome {
        outcome: classify(success_count, pool_size),
        dice,
        pool_size,
        difficulty,
        success_count,
        timestamp: Utc::now(),
    }
}

/// Classify net successes against the pool size
fn classify(success_count: i32, pool_size: u32) -> OutcomeClass {
    if pool_size == 0 || success_count < 0 {
        return OutcomeClass::Botch;
    }
    if success_count == 0 {
        return OutcomeClass::Failure;
    }
    if success_count > pool_size as i32 {
        return OutcomeClass::Critical;
    }
    OutcomeClass::Success
}
