//! Roll probability estimation
//!
//! Monte-Carlo estimate of how a (pool, difficulty) pair behaves under a
//! scoring rule set. Used by presentation layers to answer "what are my
//! odds?" before a player commits to a roll. Deterministic under a seeded
//! random source.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::errors::EngineError;
use crate::domain::value_objects::ScoringRules;

use super::dice_pool::{resolve_pool, OutcomeClass, RandomSource};

/// Estimated outcome distribution for one pool/difficulty pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbabilityReport {
    pub pool_size: u32,
    pub difficulty: i32,
    pub trials: u32,
    /// Fraction of trials landing in each outcome class
    pub outcome_rates: HashMap<OutcomeClass, f64>,
    /// Mean net successes across all trials
    pub mean_successes: f64,
}

impl ProbabilityReport {
    /// Fraction of trials classified as the given outcome
    pub fn rate(&self, outcome: OutcomeClass) -> f64 {
        self.outcome_rates.get(&outcome).copied().unwrap_or(0.0)
    }

    /// Combined rate of success and critical outcomes
    pub fn success_rate(&self) -> f64 {
        self.rate(OutcomeClass::Success) + self.rate(OutcomeClass::Critical)
    }
}

/// Estimate the outcome distribution over `trials` simulated rolls
pub fn estimate_probability(
    pool_size: u32,
    difficulty: i32,
    trials: u32,
    rules: &ScoringRules,
    random: &mut dyn RandomSource,
) -> Result<ProbabilityReport, EngineError> {
    let mut counts: HashMap<OutcomeClass, u32> = HashMap::new();
    let mut total_successes = 0i64;

    for _ in 0..trials {
        let outcome = resolve_pool(pool_size, difficulty, rules, random)?;
        *counts.entry(outcome.outcome).or_insert(0) += 1;
        total_successes += i64::from(outcome.success_count);
    }

    let denominator = f64::from(trials.max(1));
    let outcome_rates = counts
        .into_iter()
        .map(|(class, count)| (class, f64::from(count) / denominator))
        .collect();

    Ok(ProbabilityReport {
        pool_size,
        difficulty,
        trials,
        outcome_rates,
        mean_successes: total_successes as f64 / denominator,
    })
}
