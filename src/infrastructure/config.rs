//! Engine configuration
//!
//! Scoring rules and cost schedules are game-line configuration, loaded from
//! the environment with sensible house-system defaults. Callers embedding
//! the engine can also build an `EngineConfig` directly.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CostSchedule, ScoringRules};

/// All configurable engine behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub scoring: ScoringRules,
    pub costs: CostSchedule,
    /// Experience granted per cool point
    pub cool_point_value: u32,
    /// Bounded retries for commits that lose an optimistic-concurrency race
    pub commit_attempts: u32,
    /// Trials used by the probability estimator
    pub probability_trials: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringRules::default(),
            costs: CostSchedule::default(),
            cool_point_value: 10,
            commit_attempts: 3,
            probability_trials: 10_000,
        }
    }
}

impl EngineConfig {
    /// Load from environment variables, using defaults for missing values
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            scoring: ScoringRules {
                ten_bonus: env_or("CHRONICLE_TEN_BONUS", defaults.scoring.ten_bonus),
                one_penalty: env_or("CHRONICLE_ONE_PENALTY", defaults.scoring.one_penalty),
                min_difficulty: env_or("CHRONICLE_MIN_DIFFICULTY", defaults.scoring.min_difficulty),
                max_difficulty: env_or("CHRONICLE_MAX_DIFFICULTY", defaults.scoring.max_difficulty),
                max_pool_size: env_or("CHRONICLE_MAX_POOL_SIZE", defaults.scoring.max_pool_size),
            },
            costs: CostSchedule {
                attribute_multiplier: env_or(
                    "CHRONICLE_ATTRIBUTE_MULTIPLIER",
                    defaults.costs.attribute_multiplier,
                ),
                ability_multiplier: env_or(
                    "CHRONICLE_ABILITY_MULTIPLIER",
                    defaults.costs.ability_multiplier,
                ),
                special_multiplier: env_or(
                    "CHRONICLE_SPECIAL_MULTIPLIER",
                    defaults.costs.special_multiplier,
                ),
                virtue_multiplier: env_or(
                    "CHRONICLE_VIRTUE_MULTIPLIER",
                    defaults.costs.virtue_multiplier,
                ),
                other_multiplier: env_or(
                    "CHRONICLE_OTHER_MULTIPLIER",
                    defaults.costs.other_multiplier,
                ),
                first_dot_cost: env_or("CHRONICLE_FIRST_DOT_COST", defaults.costs.first_dot_cost),
            },
            cool_point_value: env_or("CHRONICLE_COOL_POINT_VALUE", defaults.cool_point_value),
            commit_attempts: env_or("CHRONICLE_COMMIT_ATTEMPTS", defaults.commit_attempts),
            probability_trials: env_or(
                "CHRONICLE_PROBABILITY_TRIALS",
                defaults.probability_trials,
            ),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
