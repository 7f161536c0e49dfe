//! Trait progression engine
//!
//! Validates and applies trait raises (and lowers) against the experience
//! ledger and the trait's bounds. Cost comes from the configured schedule:
//! each dot costs a pure function of (category, target level). The rating
//! change and the matching ledger entry land in the same document commit, so
//! a crash or lost race can never leave one without the other.

use std::sync::Arc;

use crate::application::ports::outbound::CharacterStorePort;
use crate::application::services::update_character;
use crate::domain::entities::LedgerEntry;
use crate::domain::errors::EngineError;
use crate::domain::value_objects::CharacterId;
use crate::infrastructure::config::EngineConfig;

/// Service applying experience-funded trait changes
pub struct ProgressionService<S: CharacterStorePort> {
    store: Arc<S>,
    config: EngineConfig,
}

impl<S: CharacterStorePort> ProgressionService<S> {
    pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Quote the cost of raising a trait by `levels` without committing
    pub async fn cost_to_raise(
        &self,
        character_id: CharacterId,
        trait_name: &str,
        levels: u32,
    ) -> Result<i64, EngineError> {
        let record =
            crate::application::services::load_character(self.store.as_ref(), character_id).await?;
        let t = record.character.trait_named(trait_name)?;
        let target = checked_target(t.name.clone(), t.rating, levels, t.max)?;
        Ok(self
            .config
            .costs
            .cost_to_raise(t.category, t.rating, target))
    }

    /// Spend experience to raise a trait by `levels` dots.
    ///
    /// Returns the new rating and the ledger debit that paid for it. Both
    /// commit atomically or not at all.
    pub async fn raise_trait(
        &self,
        character_id: CharacterId,
        trait_name: &str,
        levels: u32,
    ) -> Result<(i32, LedgerEntry), EngineError> {
        if levels == 0 {
            return Err(EngineError::InvalidAmount(0));
        }
        let costs = self.config.costs.clone();
        let trait_name = trait_name.to_string();

        let result = update_character(
            self.store.as_ref(),
            character_id,
            self.config.commit_attempts,
            move |record| {
                let t = record.character.trait_named(&trait_name)?;
                let (category, current, max) = (t.category, t.rating, t.max);
                let canonical = t.name.clone();
                let target = checked_target(canonical.clone(), current, levels, max)?;
                let cost = costs.cost_to_raise(category, current, target);

                let entry = record
                    .ledger
                    .spend(
                        character_id,
                        cost,
                        format!("raise {canonical} {current} -> {target}"),
                    )?
                    .clone();
                let new_rating = record.character.set_trait_rating(&trait_name, target)?;
                Ok((new_rating, entry))
            },
        )
        .await?;

        tracing::info!(
            character = %character_id,
            rating = result.0,
            cost = -result.1.delta,
            "raised trait"
        );
        Ok(result)
    }

    /// Lower a trait by `levels` dots, refunding the experience the vacated
    /// dots would cost. Fails with `OutOfBounds` below the trait's minimum.
    pub async fn lower_trait(
        &self,
        character_id: CharacterId,
        trait_name: &str,
        levels: u32,
    ) -> Result<(i32, LedgerEntry), EngineError> {
        if levels == 0 {
            return Err(EngineError::InvalidAmount(0));
        }
        let costs = self.config.costs.clone();
        let trait_name = trait_name.to_string();

        let result = update_character(
            self.store.as_ref(),
            character_id,
            self.config.commit_attempts,
            move |record| {
                let t = record.character.trait_named(&trait_name)?;
                let (category, current, min, max) = (t.category, t.rating, t.min, t.max);
                let canonical = t.name.clone();
                let target = current - levels as i32;
                if target < min {
                    return Err(EngineError::OutOfBounds {
                        name: canonical,
                        rating: target,
                        min,
                        max,
                    });
                }
                let refund = costs.refund_for_lowering(category, current, target);

                let entry = record
                    .ledger
                    .grant(
                        character_id,
                        refund,
                        format!("lower {canonical} {current} -> {target}"),
                    )?
                    .clone();
                let new_rating = record.character.set_trait_rating(&trait_name, target)?;
                Ok((new_rating, entry))
            },
        )
        .await?;

        tracing::info!(
            character = %character_id,
            rating = result.0,
            refund = result.1.delta,
            "lowered trait"
        );
        Ok(result)
    }
}

fn checked_target(name: String, current: i32, levels: u32, max: i32) -> Result<i32, EngineError> {
    let target = current + levels as i32;
    if target > max {
        return Err(EngineError::ExceedsMaximum { name, levels, max });
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::{CharacterRecord, VersionedRecord};
    use crate::domain::entities::{Character, CharacterTrait};
    use crate::domain::value_objects::{CampaignId, TraitCategory};
    use crate::infrastructure::persistence::InMemoryCharacterStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    async fn setup(starting_xp: i64) -> (Arc<InMemoryCharacterStore>, CharacterId) {
        let character = Character::new(CampaignId::new(), "Astrid")
            .with_trait(CharacterTrait::new("Strength", TraitCategory::Attribute, 2).unwrap())
            .with_trait(CharacterTrait::new("Brawl", TraitCategory::Ability, 1).unwrap());
        let id = character.id;
        let mut record = CharacterRecord::new(character);
        if starting_xp > 0 {
            record.ledger.grant(id, starting_xp, "starting xp").unwrap();
        }
        let store = Arc::new(InMemoryCharacterStore::new());
        store.insert(record).await.unwrap();
        (store, id)
    }

    #[tokio::test]
    async fn raise_debits_ledger_and_bumps_rating() {
        let (store, id) = setup(50).await;
        let service = ProgressionService::new(Arc::clone(&store), EngineConfig::default());

        // Strength 2 -> 3 costs 3 * 5 = 15
        let (rating, entry) = service.raise_trait(id, "strength", 1).await.unwrap();
        assert_eq!(rating, 3);
        assert_eq!(entry.delta, -15);

        let record = store.load(id).await.unwrap().unwrap().record;
        assert_eq!(record.character.trait_named("Strength").unwrap().rating, 3);
        assert_eq!(record.ledger.current_balance(), 35);
        assert!(record.ledger.verify());
    }

    #[tokio::test]
    async fn multi_level_raise_sums_each_dot() {
        let (store, id) = setup(100).await;
        let service = ProgressionService::new(Arc::clone(&store), EngineConfig::default());

        let quoted = service.cost_to_raise(id, "Strength", 2).await.unwrap();
        assert_eq!(quoted, 15 + 20);

        let (rating, entry) = service.raise_trait(id, "Strength", 2).await.unwrap();
        assert_eq!(rating, 4);
        assert_eq!(entry.delta, -35);
    }

    #[tokio::test]
    async fn raise_past_maximum_is_rejected() {
        let (store, id) = setup(500).await;
        let service = ProgressionService::new(store, EngineConfig::default());
        let err = service.raise_trait(id, "Strength", 4).await.unwrap_err();
        assert!(matches!(err, EngineError::ExceedsMaximum { max: 5, .. }));
    }

    #[tokio::test]
    async fn insufficient_balance_changes_nothing() {
        let (store, id) = setup(5).await;
        let service = ProgressionService::new(Arc::clone(&store), EngineConfig::default());

        let err = service.raise_trait(id, "Strength", 1).await.unwrap_err();
        assert!(matches!(err, EngineError::InsufficientBalance { .. }));

        let record = store.load(id).await.unwrap().unwrap().record;
        assert_eq!(record.character.trait_named("Strength").unwrap().rating, 2);
        assert_eq!(record.ledger.current_balance(), 5);
        assert_eq!(record.ledger.entries().len(), 1);
    }

    #[tokio::test]
    async fn lower_refunds_what_raising_would_cost() {
        let (store, id) = setup(0).await;
        let service = ProgressionService::new(Arc::clone(&store), EngineConfig::default());

        // Brawl 1 -> 0 refunds the first-dot price
        let (rating, entry) = service.lower_trait(id, "Brawl", 1).await.unwrap();
        assert_eq!(rating, 0);
        assert_eq!(entry.delta, 3);

        let record = store.load(id).await.unwrap().unwrap().record;
        assert_eq!(record.ledger.current_balance(), 3);
    }

    #[tokio::test]
    async fn lower_below_minimum_is_rejected() {
        let (store, id) = setup(0).await;
        let service = ProgressionService::new(store, EngineConfig::default());
        // attributes bottom out at 1
        let err = service.lower_trait(id, "Strength", 2).await.unwrap_err();
        assert!(matches!(err, EngineError::OutOfBounds { .. }));
    }

    /// Store wrapper that fails the first commit, simulating a crash between
    /// validation and the durable write
    struct FailingOnceStore {
        inner: InMemoryCharacterStore,
        failed: AtomicBool,
    }

    #[async_trait]
    impl CharacterStorePort for FailingOnceStore {
        async fn insert(&self, record: CharacterRecord) -> Result<(), EngineError> {
            self.inner.insert(record).await
        }

        async fn load(&self, id: CharacterId) -> Result<Option<VersionedRecord>, EngineError> {
            self.inner.load(id).await
        }

        async fn commit(
            &self,
            record: &CharacterRecord,
            expected_version: u64,
        ) -> Result<u64, EngineError> {
            if !self.failed.swap(true, Ordering::SeqCst) {
                return Err(EngineError::Persistence(anyhow::anyhow!(
                    "storage unreachable"
                )));
            }
            self.inner.commit(record, expected_version).await
        }

        async fn list_by_campaign(
            &self,
            campaign_id: crate::domain::value_objects::CampaignId,
        ) -> Result<Vec<CharacterRecord>, EngineError> {
            self.inner.list_by_campaign(campaign_id).await
        }
    }

    #[tokio::test]
    async fn failed_commit_leaves_no_partial_state() {
        let character = Character::new(CampaignId::new(), "Astrid")
            .with_trait(CharacterTrait::new("Strength", TraitCategory::Attribute, 2).unwrap());
        let id = character.id;
        let mut record = CharacterRecord::new(character);
        record.ledger.grant(id, 50, "starting xp").unwrap();

        let store = Arc::new(FailingOnceStore {
            inner: InMemoryCharacterStore::new(),
            failed: AtomicBool::new(false),
        });
        store.insert(record).await.unwrap();
        let service = ProgressionService::new(Arc::clone(&store), EngineConfig::default());

        let err = service.raise_trait(id, "Strength", 1).await.unwrap_err();
        assert!(matches!(err, EngineError::Persistence(_)));

        // neither the rating nor the ledger moved
        let record = store.load(id).await.unwrap().unwrap().record;
        assert_eq!(record.character.trait_named("Strength").unwrap().rating, 2);
        assert_eq!(record.ledger.current_balance(), 50);
        assert_eq!(record.ledger.entries().len(), 1);

        // the next attempt goes through
        let (rating, _) = service.raise_trait(id, "Strength", 1).await.unwrap();
        assert_eq!(rating, 3);
    }

    #[tokio::test]
    async fn concurrent_raises_never_double_spend() {
        let (store, id) = setup(15).await;
        let service = Arc::new(ProgressionService::new(
            Arc::clone(&store),
            EngineConfig::default(),
        ));

        // Strength 2 -> 3 costs 15; only one of the two raises can afford it
        let first = {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.raise_trait(id, "Strength", 1).await })
        };
        let second = {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.raise_trait(id, "Strength", 1).await })
        };

        let results = [first.await.unwrap(), second.await.unwrap()];
        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);

        let record = store.load(id).await.unwrap().unwrap().record;
        assert_eq!(record.character.trait_named("Strength").unwrap().rating, 3);
        assert_eq!(record.ledger.current_balance(), 0);
        assert!(record.ledger.verify());
    }
}
