//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Character (with its trait store), RollMacro, ExperienceLedger
//! - Value Objects: typed ids, trait categories, scoring rules, cost schedules
//! - Domain Services: the pure dice pool resolver and probability estimator

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
