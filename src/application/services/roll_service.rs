//! Roll orchestrator
//!
//! Turns a roll request (a raw pool, one or two named traits, or a saved
//! macro) into a concrete pool size, hands it to the dice pool resolver, and
//! returns the outcome together with the resolved breakdown. Reads a single
//! consistent snapshot of the character document and never writes; persisting
//! roll history is the caller's business.

use std::sync::Arc;

use crate::application::ports::outbound::CharacterStorePort;
use crate::application::services::load_character;
use crate::domain::entities::Character;
use crate::domain::errors::EngineError;
use crate::domain::services::dice_pool::{resolve_pool, RandomSource, RollOutcome};
use crate::domain::services::probability::{estimate_probability, ProbabilityReport};
use crate::domain::value_objects::{CharacterId, MacroId};
use crate::infrastructure::config::EngineConfig;

/// How the pool for a roll is determined
#[derive(Debug, Clone)]
pub enum PoolSpec {
    /// Roll exactly `size` dice
    Direct { size: i64 },
    /// Sum one or two named traits plus a modifier
    Traits {
        one: String,
        two: Option<String>,
        modifier: i32,
    },
    /// Delegate to a saved macro
    Macro { id: MacroId },
}

/// A request to resolve one roll
#[derive(Debug, Clone)]
pub struct RollRequest {
    pub pool: PoolSpec,
    pub difficulty: i32,
}

/// Outcome of a resolved request plus how the pool was assembled
#[derive(Debug, Clone)]
pub struct RollResolution {
    pub character_id: CharacterId,
    pub character_name: String,
    /// Resolved (trait name, rating) pairs contributing to the pool
    pub traits: Vec<(String, i32)>,
    pub modifier: i32,
    pub outcome: RollOutcome,
}

impl RollResolution {
    /// Human-readable breakdown for chat replies
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = self
            .traits
            .iter()
            .map(|(name, rating)| format!("{name} ({rating})"))
            .collect();
        if self.modifier != 0 || parts.is_empty() {
            parts.push(format!("{:+}", self.modifier));
        }
        format!(
            "{} rolled {}d10 vs difficulty {} [{}]: {} ({})",
            self.character_name,
            self.outcome.pool_size,
            self.outcome.difficulty,
            parts.join(" + "),
            self.outcome.success_count,
            self.outcome.outcome,
        )
    }
}

/// Service resolving roll requests against stored characters
pub struct RollService<S: CharacterStorePort> {
    store: Arc<S>,
    config: EngineConfig,
}

impl<S: CharacterStorePort> RollService<S> {
    pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Resolve a roll request for a character.
    ///
    /// Trait sums driven negative by a modifier clamp to a pool of zero,
    /// which the resolver treats as an automatic botch.
    pub async fn resolve_request(
        &self,
        character_id: CharacterId,
        request: RollRequest,
        random: &mut dyn RandomSource,
    ) -> Result<RollResolution, EngineError> {
        let record = load_character(self.store.as_ref(), character_id).await?;
        let character = &record.character;

        let (pool_size, traits, modifier) = match &request.pool {
            PoolSpec::Direct { size } => {
                if *size < 0 || *size > i64::from(self.config.scoring.max_pool_size) {
                    return Err(EngineError::InvalidPoolSize(*size));
                }
                (*size as u32, Vec::new(), 0)
            }
            PoolSpec::Traits { one, two, modifier } => {
                let traits = direct_trait_breakdown(character, one, two.as_deref())?;
                (clamped_pool(&traits, *modifier), traits, *modifier)
            }
            PoolSpec::Macro { id } => {
                let m = character.macro_by_id(*id)?.clone();
                // fails with a dangling reference if any trait was removed
                let (sum, modifier) = character.resolve_macro(&m)?;
                let traits =
                    direct_trait_breakdown(character, &m.trait_one, m.trait_two.as_deref())?;
                ((sum + modifier).max(0) as u32, traits, modifier)
            }
        };

        let outcome = resolve_pool(pool_size, request.difficulty, &self.config.scoring, random)?;
        tracing::debug!(
            character = %character_id,
            pool = pool_size,
            difficulty = request.difficulty,
            result = %outcome.outcome,
            "resolved roll"
        );

        Ok(RollResolution {
            character_id,
            character_name: character.name.clone(),
            traits,
            modifier,
            outcome,
        })
    }

    /// Estimate the odds of a pool/difficulty pair before rolling it
    pub fn estimate(
        &self,
        pool_size: u32,
        difficulty: i32,
        random: &mut dyn RandomSource,
    ) -> Result<ProbabilityReport, EngineError> {
        estimate_probability(
            pool_size,
            difficulty,
            self.config.probability_trials,
            &self.config.scoring,
            random,
        )
    }
}

fn direct_trait_breakdown(
    character: &Character,
    one: &str,
    two: Option<&str>,
) -> Result<Vec<(String, i32)>, EngineError> {
    let mut traits = Vec::with_capacity(2);
    for name in std::iter::once(one).chain(two) {
        let t = character.trait_named(name)?;
        traits.push((t.name.clone(), t.rating));
    }
    Ok(traits)
}

fn clamped_pool(traits: &[(String, i32)], modifier: i32) -> u32 {
    let sum: i32 = traits.iter().map(|(_, rating)| rating).sum::<i32>() + modifier;
    sum.max(0) as u32
}
