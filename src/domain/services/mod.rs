//! Domain services - Pure business logic operations

pub mod dice_pool;
pub mod probability;

pub use dice_pool::{resolve_pool, OutcomeClass, RandomSource, RollOutcome};
pub use probability::{estimate_probability, ProbabilityReport};
