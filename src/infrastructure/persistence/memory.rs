//! In-memory character store
//!
//! A versioned JSON document store behind an async lock. Documents are
//! serialized on commit and deserialized on load, mimicking a real document
//! database so serialization bugs surface in tests. The compare-and-swap in
//! `commit` is the only concurrency primitive the engine relies on.

use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{CharacterRecord, CharacterStorePort, VersionedRecord};
use crate::domain::errors::EngineError;
use crate::domain::value_objects::{CampaignId, CharacterId};

struct StoredDocument {
    version: u64,
    body: serde_json::Value,
}

/// Character store backed by process memory
#[derive(Default)]
pub struct InMemoryCharacterStore {
    documents: RwLock<HashMap<CharacterId, StoredDocument>>,
}

impl InMemoryCharacterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn serialize(record: &CharacterRecord) -> Result<serde_json::Value, EngineError> {
    serde_json::to_value(record)
        .context("serializing character document")
        .map_err(EngineError::Persistence)
}

fn deserialize(body: &serde_json::Value) -> Result<CharacterRecord, EngineError> {
    serde_json::from_value(body.clone())
        .context("deserializing character document")
        .map_err(EngineError::Persistence)
}

#[async_trait]
impl CharacterStorePort for InMemoryCharacterStore {
    async fn insert(&self, record: CharacterRecord) -> Result<(), EngineError> {
        let body = serialize(&record)?;
        let mut documents = self.documents.write().await;
        if documents.contains_key(&record.id()) {
            return Err(EngineError::DuplicateName {
                kind: "character",
                name: record.id().to_string(),
            });
        }
        documents.insert(record.id(), StoredDocument { version: 1, body });
        Ok(())
    }

    async fn load(&self, id: CharacterId) -> Result<Option<VersionedRecord>, EngineError> {
        let documents = self.documents.read().await;
        match documents.get(&id) {
            Some(doc) => Ok(Some(VersionedRecord {
                version: doc.version,
                record: deserialize(&doc.body)?,
            })),
            None => Ok(None),
        }
    }

    async fn commit(
        &self,
        record: &CharacterRecord,
        expected_version: u64,
    ) -> Result<u64, EngineError> {
        let body = serialize(record)?;
        let mut documents = self.documents.write().await;
        let doc = documents
            .get_mut(&record.id())
            .ok_or_else(|| EngineError::character_not_found(record.id().to_string()))?;
        if doc.version != expected_version {
            return Err(EngineError::Conflict);
        }
        doc.version += 1;
        doc.body = body;
        Ok(doc.version)
    }

    async fn list_by_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<CharacterRecord>, EngineError> {
        let documents = self.documents.read().await;
        let mut records = Vec::new();
        for doc in documents.values() {
            let record = deserialize(&doc.body)?;
            if record.character.campaign_id == campaign_id {
                records.push(record);
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Character;

    fn record() -> CharacterRecord {
        CharacterRecord::new(Character::new(CampaignId::new(), "Astrid"))
    }

    #[tokio::test]
    async fn round_trips_documents() {
        let store = InMemoryCharacterStore::new();
        let record = record();
        let id = record.id();
        store.insert(record).await.unwrap();

        let loaded = store.load(id).await.unwrap().unwrap();
        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.record.character.name, "Astrid");
    }

    #[tokio::test]
    async fn commit_bumps_version_and_checks_expectation() {
        let store = InMemoryCharacterStore::new();
        let record = record();
        let id = record.id();
        store.insert(record).await.unwrap();

        let loaded = store.load(id).await.unwrap().unwrap();
        let new_version = store.commit(&loaded.record, loaded.version).await.unwrap();
        assert_eq!(new_version, 2);

        // a second commit against the stale version loses
        let err = store.commit(&loaded.record, loaded.version).await.unwrap_err();
        assert!(matches!(err, EngineError::Conflict));
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = InMemoryCharacterStore::new();
        let record = record();
        store.insert(record.clone()).await.unwrap();
        assert!(matches!(
            store.insert(record).await,
            Err(EngineError::DuplicateName { .. })
        ));
    }

    #[tokio::test]
    async fn lists_only_matching_campaign() {
        let store = InMemoryCharacterStore::new();
        let campaign = CampaignId::new();
        let mine = CharacterRecord::new(Character::new(campaign, "Astrid"));
        let other = record();
        store.insert(mine).await.unwrap();
        store.insert(other).await.unwrap();

        let listed = store.list_by_campaign(campaign).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].character.name, "Astrid");
    }
}
