//! Experience ledger service
//!
//! Grants and spends against a character's append-only experience ledger.
//! Every mutation goes through the compare-and-swap commit loop, so two
//! concurrent spends that would jointly overdraw the balance resolve to one
//! winner and one `InsufficientBalance`.

use std::sync::Arc;

use crate::application::ports::outbound::CharacterStorePort;
use crate::application::services::{load_character, update_character};
use crate::domain::entities::LedgerEntry;
use crate::domain::errors::EngineError;
use crate::domain::value_objects::CharacterId;
use crate::infrastructure::config::EngineConfig;

/// Service managing experience and cool-point ledgers
pub struct ExperienceService<S: CharacterStorePort> {
    store: Arc<S>,
    config: EngineConfig,
}

impl<S: CharacterStorePort> ExperienceService<S> {
    pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Grant experience to a character
    pub async fn grant(
        &self,
        character_id: CharacterId,
        amount: i64,
        reason: impl Into<String>,
    ) -> Result<LedgerEntry, EngineError> {
        let reason = reason.into();
        let entry = update_character(
            self.store.as_ref(),
            character_id,
            self.config.commit_attempts,
            |record| {
                record
                    .ledger
                    .grant(character_id, amount, reason.clone())
                    .map(Clone::clone)
            },
        )
        .await?;
        tracing::info!(character = %character_id, amount, "granted experience");
        Ok(entry)
    }

    /// Award cool points, converted to experience at the configured rate
    pub async fn grant_cool_points(
        &self,
        character_id: CharacterId,
        points: u32,
        reason: impl Into<String>,
    ) -> Result<LedgerEntry, EngineError> {
        let reason = reason.into();
        let xp_per_point = self.config.cool_point_value;
        let entry = update_character(
            self.store.as_ref(),
            character_id,
            self.config.commit_attempts,
            |record| {
                record
                    .ledger
                    .grant_cool_points(character_id, points, xp_per_point, reason.clone())
                    .map(Clone::clone)
            },
        )
        .await?;
        tracing::info!(character = %character_id, points, "awarded cool points");
        Ok(entry)
    }

    /// Spend experience, failing with `InsufficientBalance` on overdraw.
    ///
    /// The balance check and the ledger append commit as one conditional
    /// write; a spend that loses the race re-reads and re-validates.
    pub async fn spend(
        &self,
        character_id: CharacterId,
        amount: i64,
        reason: impl Into<String>,
    ) -> Result<LedgerEntry, EngineError> {
        let reason = reason.into();
        let entry = update_character(
            self.store.as_ref(),
            character_id,
            self.config.commit_attempts,
            |record| {
                record
                    .ledger
                    .spend(character_id, amount, reason.clone())
                    .map(Clone::clone)
            },
        )
        .await?;
        tracing::info!(character = %character_id, amount, "spent experience");
        Ok(entry)
    }

    /// Current spendable balance
    pub async fn current_balance(&self, character_id: CharacterId) -> Result<i64, EngineError> {
        let record = load_character(self.store.as_ref(), character_id).await?;
        Ok(record.ledger.current_balance())
    }

    /// Full ledger history, oldest first
    pub async fn history(&self, character_id: CharacterId) -> Result<Vec<LedgerEntry>, EngineError> {
        let record = load_character(self.store.as_ref(), character_id).await?;
        Ok(record.ledger.entries().to_vec())
    }
}
