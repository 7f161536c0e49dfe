//! Engine error types
//!
//! Every fallible engine operation returns one of these kinds. Nothing in the
//! engine silently defaults: a missing trait is an error, not a zero.

use thiserror::Error;

/// Errors surfaced by engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    #[error("{kind} named '{name}' already exists")]
    DuplicateName { kind: &'static str, name: String },

    #[error("rating {rating} for trait '{name}' is outside [{min}, {max}]")]
    OutOfBounds {
        name: String,
        rating: i32,
        min: i32,
        max: i32,
    },

    #[error("invalid pool size {0}")]
    InvalidPoolSize(i64),

    #[error("amount must be positive (got {0})")]
    InvalidAmount(i64),

    #[error("difficulty must be between {min} and {max} (got {got})")]
    InvalidDifficulty { got: i32, min: i32, max: i32 },

    #[error("macro '{macro_name}' references missing trait '{trait_name}'")]
    DanglingReference {
        macro_name: String,
        trait_name: String,
    },

    #[error("cannot spend {requested} experience with only {available} available")]
    InsufficientBalance { requested: i64, available: i64 },

    #[error("raising '{name}' by {levels} would exceed its maximum of {max}")]
    ExceedsMaximum {
        name: String,
        levels: u32,
        max: i32,
    },

    #[error("concurrent update conflict on character document")]
    Conflict,

    #[error("persistence failure: {0}")]
    Persistence(#[source] anyhow::Error),
}

impl EngineError {
    /// Whether a retry with a fresh read could succeed.
    ///
    /// Only lost optimistic-concurrency races are retryable; every other
    /// kind reflects a request that will fail identically on replay.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict)
    }

    pub(crate) fn trait_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "trait",
            name: name.into(),
        }
    }

    pub(crate) fn macro_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "macro",
            name: name.into(),
        }
    }

    pub(crate) fn character_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "character",
            name: name.into(),
        }
    }
}
