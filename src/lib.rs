//! Chronicle Engine - Dice-pool resolution and character progression
//!
//! The engine resolves dice-pool rolls against character traits and tracks
//! experience/cool-point progression over time. It is the core behind a
//! tabletop RPG assistant:
//! - Resolves roll requests (raw pools, trait pairs, saved macros) into
//!   scored outcomes
//! - Maintains append-only experience ledgers per character
//! - Validates and applies trait raises against cost schedules
//!
//! Transport layers (Discord commands, web UI) and concrete database drivers
//! live outside this crate; they talk to the engine through the application
//! services and implement the outbound ports.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::ports::outbound::{CharacterRecord, CharacterStorePort, VersionedRecord};
pub use application::services::{
    CreateMacroRequest, ExperienceService, MacroService, PoolSpec, ProgressionService,
    RollRequest, RollResolution, RollService,
};
pub use domain::entities::{Character, CharacterTrait, ExperienceLedger, LedgerEntry, RollMacro};
pub use domain::errors::EngineError;
pub use domain::services::{OutcomeClass, RandomSource, RollOutcome};
pub use infrastructure::config::EngineConfig;
