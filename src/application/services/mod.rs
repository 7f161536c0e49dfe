//! Application services - use case implementations
//!
//! Each service follows the same shape: it holds the character store port,
//! reads a versioned character document, applies domain logic, and commits
//! the whole document back with a compare-and-swap. Lost races retry a
//! bounded number of times before surfacing `Conflict`.

pub mod experience_service;
pub mod macro_service;
pub mod progression_service;
pub mod roll_service;

pub use experience_service::ExperienceService;
pub use macro_service::{CreateMacroRequest, MacroService};
pub use progression_service::ProgressionService;
pub use roll_service::{PoolSpec, RollRequest, RollResolution, RollService};

use crate::application::ports::outbound::{CharacterRecord, CharacterStorePort};
use crate::domain::errors::EngineError;
use crate::domain::value_objects::CharacterId;

/// Read-modify-commit loop shared by every mutating service.
///
/// `mutate` runs against a private copy of the document; nothing is visible
/// to other callers until `commit` succeeds, so an abandoned or failed
/// attempt has no observable effect. Only `Conflict` is retried.
pub(crate) async fn update_character<S, T, F>(
    store: &S,
    id: CharacterId,
    max_attempts: u32,
    mut mutate: F,
) -> Result<T, EngineError>
where
    S: CharacterStorePort + ?Sized,
    F: FnMut(&mut CharacterRecord) -> Result<T, EngineError> + Send,
    T: Send,
{
    let mut attempt = 0u32;
    loop {
        let versioned = store
            .load(id)
            .await?
            .ok_or_else(|| EngineError::character_not_found(id.to_string()))?;
        let mut record = versioned.record;
        let value = mutate(&mut record)?;

        match store.commit(&record, versioned.version).await {
            Ok(_) => return Ok(value),
            Err(err) if err.is_retryable() && attempt + 1 < max_attempts => {
                attempt += 1;
                tracing::debug!(character = %id, attempt, "commit lost a race, retrying");
            }
            Err(err) => return Err(err),
        }
    }
}

/// Snapshot read used by the read-only paths
pub(crate) async fn load_character<S>(
    store: &S,
    id: CharacterId,
) -> Result<CharacterRecord, EngineError>
where
    S: CharacterStorePort + ?Sized,
{
    Ok(store
        .load(id)
        .await?
        .ok_or_else(|| EngineError::character_not_found(id.to_string()))?
        .record)
}
