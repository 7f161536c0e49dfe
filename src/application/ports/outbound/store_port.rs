//! Persistence gateway port
//!
//! The engine treats durable storage as an abstract document store with a
//! per-document conditional update. A character's trait map, macros, and
//! ledger tail live in one document, so a trait bump and its ledger debit
//! commit in a single atomic write. Optimistic concurrency: every document
//! carries a version, and `commit` fails with `Conflict` when the version
//! moved underneath the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Character, ExperienceLedger};
use crate::domain::errors::EngineError;
use crate::domain::value_objects::{CampaignId, CharacterId};

/// Everything the engine persists for one character, as one atomic unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub character: Character,
    pub ledger: ExperienceLedger,
}

impl CharacterRecord {
    pub fn new(character: Character) -> Self {
        Self {
            character,
            ledger: ExperienceLedger::new(),
        }
    }

    pub fn id(&self) -> CharacterId {
        self.character.id
    }
}

/// A record together with the document version it was read at
#[derive(Debug, Clone)]
pub struct VersionedRecord {
    pub version: u64,
    pub record: CharacterRecord,
}

/// Durable store for character documents with compare-and-swap commits
#[async_trait]
pub trait CharacterStorePort: Send + Sync {
    /// Insert a new character document at version 1
    async fn insert(&self, record: CharacterRecord) -> Result<(), EngineError>;

    /// Read a character document and its current version
    async fn load(&self, id: CharacterId) -> Result<Option<VersionedRecord>, EngineError>;

    /// Conditionally write a document: succeeds and returns the new version
    /// only if the stored version still equals `expected_version`, otherwise
    /// fails with [`EngineError::Conflict`] and writes nothing.
    async fn commit(
        &self,
        record: &CharacterRecord,
        expected_version: u64,
    ) -> Result<u64, EngineError>;

    /// List all character documents in a campaign
    async fn list_by_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<CharacterRecord>, EngineError>;
}
