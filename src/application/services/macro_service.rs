//! Macro registry service
//!
//! Creates and removes saved roll macros on a character. Creation checks
//! that the referenced traits exist right now; afterwards the macro only
//! holds names, and the roll orchestrator re-resolves them on every use.

use std::sync::Arc;

use crate::application::ports::outbound::CharacterStorePort;
use crate::application::services::{load_character, update_character};
use crate::domain::entities::RollMacro;
use crate::domain::errors::EngineError;
use crate::domain::value_objects::{CharacterId, MacroId};
use crate::infrastructure::config::EngineConfig;

/// Request to create a macro
#[derive(Debug, Clone)]
pub struct CreateMacroRequest {
    pub name: String,
    pub abbreviation: Option<String>,
    pub description: Option<String>,
    pub trait_one: String,
    pub trait_two: Option<String>,
    pub modifier: i32,
}

/// Service managing a character's saved roll macros
pub struct MacroService<S: CharacterStorePort> {
    store: Arc<S>,
    config: EngineConfig,
}

impl<S: CharacterStorePort> MacroService<S> {
    pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Create a macro bound to one or two existing traits
    pub async fn create_macro(
        &self,
        character_id: CharacterId,
        request: CreateMacroRequest,
    ) -> Result<RollMacro, EngineError> {
        let created = update_character(
            self.store.as_ref(),
            character_id,
            self.config.commit_attempts,
            move |record| {
                // referenced traits must exist at creation time too
                record.character.trait_named(&request.trait_one)?;
                if let Some(second) = &request.trait_two {
                    record.character.trait_named(second)?;
                }

                let mut m = RollMacro::new(
                    character_id,
                    request.name.clone(),
                    request.trait_one.clone(),
                    request.trait_two.as_deref(),
                    request.modifier,
                );
                if let Some(abbreviation) = &request.abbreviation {
                    m = m.with_abbreviation(abbreviation);
                }
                if let Some(description) = &request.description {
                    m = m.with_description(description);
                }

                let created = m.clone();
                record.character.add_macro(m)?;
                Ok(created)
            },
        )
        .await?;

        tracing::info!(character = %character_id, name = %created.name, "created macro");
        Ok(created)
    }

    /// Delete a macro by id
    pub async fn delete_macro(
        &self,
        character_id: CharacterId,
        macro_id: MacroId,
    ) -> Result<RollMacro, EngineError> {
        let removed = update_character(
            self.store.as_ref(),
            character_id,
            self.config.commit_attempts,
            move |record| record.character.remove_macro(macro_id),
        )
        .await?;
        tracing::info!(character = %character_id, name = %removed.name, "deleted macro");
        Ok(removed)
    }

    /// List a character's macros
    pub async fn list_macros(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<RollMacro>, EngineError> {
        let record = load_character(self.store.as_ref(), character_id).await?;
        Ok(record.character.macros().to_vec())
    }

    /// Resolve a macro to (pool size before clamping, modifier) against the
    /// live trait store
    pub async fn resolve(
        &self,
        character_id: CharacterId,
        macro_id: MacroId,
    ) -> Result<(i32, i32), EngineError> {
        let record = load_character(self.store.as_ref(), character_id).await?;
        let m = record.character.macro_by_id(macro_id)?;
        record.character.resolve_macro(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::CharacterRecord;
    use crate::domain::entities::{Character, CharacterTrait};
    use crate::domain::value_objects::{CampaignId, TraitCategory};
    use crate::infrastructure::persistence::InMemoryCharacterStore;

    fn request(name: &str) -> CreateMacroRequest {
        CreateMacroRequest {
            name: name.to_string(),
            abbreviation: None,
            description: None,
            trait_one: "Strength".to_string(),
            trait_two: Some("Brawl".to_string()),
            modifier: 0,
        }
    }

    async fn setup() -> (
        MacroService<InMemoryCharacterStore>,
        Arc<InMemoryCharacterStore>,
        CharacterId,
    ) {
        let character = Character::new(CampaignId::new(), "Astrid")
            .with_trait(CharacterTrait::new("Strength", TraitCategory::Attribute, 3).unwrap())
            .with_trait(CharacterTrait::new("Brawl", TraitCategory::Ability, 2).unwrap());
        let id = character.id;
        let store = Arc::new(InMemoryCharacterStore::new());
        store
            .insert(CharacterRecord::new(character))
            .await
            .unwrap();
        (
            MacroService::new(Arc::clone(&store), EngineConfig::default()),
            store,
            id,
        )
    }

    #[tokio::test]
    async fn creates_and_lists_macros() {
        let (service, _, id) = setup().await;
        let created = service.create_macro(id, request("punch")).await.unwrap();
        assert_eq!(created.trait_one, "Strength");

        let macros = service.list_macros(id).await.unwrap();
        assert_eq!(macros.len(), 1);
        assert_eq!(macros[0].name, "punch");
    }

    #[tokio::test]
    async fn keeps_abbreviation_and_description() {
        let (service, _, id) = setup().await;
        let mut req = request("punch");
        req.abbreviation = Some("pn".to_string());
        req.description = Some("a quick jab".to_string());
        service.create_macro(id, req).await.unwrap();

        let macros = service.list_macros(id).await.unwrap();
        assert_eq!(macros[0].abbreviation.as_deref(), Some("pn"));
        assert_eq!(macros[0].description.as_deref(), Some("a quick jab"));
    }

    #[tokio::test]
    async fn duplicate_macro_name_is_rejected() {
        let (service, _, id) = setup().await;
        service.create_macro(id, request("punch")).await.unwrap();
        let err = service.create_macro(id, request("PUNCH")).await.unwrap_err();
        assert!(matches!(err, EngineError::DuplicateName { .. }));
    }

    #[tokio::test]
    async fn creation_requires_existing_traits() {
        let (service, _, id) = setup().await;
        let mut bad = request("haunt");
        bad.trait_two = Some("Occult".to_string());
        let err = service.create_macro(id, bad).await.unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
        assert!(service.list_macros(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn resolve_reflects_later_trait_edits() {
        let (service, store, id) = setup().await;
        let created = service.create_macro(id, request("punch")).await.unwrap();
        assert_eq!(service.resolve(id, created.id).await.unwrap(), (5, 0));

        // bump Brawl out from underneath the macro
        let loaded = store.load(id).await.unwrap().unwrap();
        let mut record = loaded.record;
        record.character.set_trait_rating("Brawl", 4).unwrap();
        store.commit(&record, loaded.version).await.unwrap();

        assert_eq!(service.resolve(id, created.id).await.unwrap(), (7, 0));
    }

    #[tokio::test]
    async fn resolve_fails_when_trait_removed() {
        let (service, store, id) = setup().await;
        let created = service.create_macro(id, request("punch")).await.unwrap();

        let loaded = store.load(id).await.unwrap().unwrap();
        let mut record = loaded.record;
        record.character.remove_trait("Brawl").unwrap();
        store.commit(&record, loaded.version).await.unwrap();

        let err = service.resolve(id, created.id).await.unwrap_err();
        assert!(matches!(err, EngineError::DanglingReference { .. }));
    }

    #[tokio::test]
    async fn delete_removes_the_macro() {
        let (service, _, id) = setup().await;
        let created = service.create_macro(id, request("punch")).await.unwrap();
        service.delete_macro(id, created.id).await.unwrap();
        assert!(service.list_macros(id).await.unwrap().is_empty());

        let err = service.delete_macro(id, created.id).await.unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }
}
