//! Domain value objects - immutable types without identity

mod cost_schedule;
mod ids;
mod scoring;
mod trait_category;

pub use cost_schedule::CostSchedule;
pub use ids::{CampaignId, CharacterId, LedgerEntryId, MacroId};
pub use scoring::ScoringRules;
pub use trait_category::TraitCategory;
