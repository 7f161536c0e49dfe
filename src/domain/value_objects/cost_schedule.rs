//! Experience cost schedule for trait progression
//!
//! Costs are game-line configuration, not engine logic. The engine only
//! requires that the cost of a dot is a pure function of (category, target
//! level) and non-decreasing in the level, which the multiplier form
//! guarantees: each dot costs `target_level * multiplier`, except the first
//! dot of a trait which has a flat price.

use serde::{Deserialize, Serialize};

use super::TraitCategory;

/// Per-category experience pricing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSchedule {
    pub attribute_multiplier: i64,
    pub ability_multiplier: i64,
    pub special_multiplier: i64,
    pub virtue_multiplier: i64,
    pub other_multiplier: i64,
    /// Flat cost of the first dot of a brand-new ability-style trait
    pub first_dot_cost: i64,
}

impl Default for CostSchedule {
    fn default() -> Self {
        Self {
            attribute_multiplier: 5,
            ability_multiplier: 2,
            special_multiplier: 7,
            virtue_multiplier: 2,
            other_multiplier: 2,
            first_dot_cost: 3,
        }
    }
}

impl CostSchedule {
    fn multiplier(&self, category: TraitCategory) -> i64 {
        match category {
            TraitCategory::Attribute => self.attribute_multiplier,
            TraitCategory::Ability => self.ability_multiplier,
            TraitCategory::Special => self.special_multiplier,
            TraitCategory::Virtue => self.virtue_multiplier,
            TraitCategory::Other => self.other_multiplier,
        }
    }

    /// Experience cost of the dot that takes a trait to `target_level`
    pub fn cost(&self, category: TraitCategory, target_level: i32) -> i64 {
        if target_level <= 1 {
            return self.first_dot_cost;
        }
        i64::from(target_level) * self.multiplier(category)
    }

    /// Total cost to go from `current` up to `target` (exclusive/inclusive)
    pub fn cost_to_raise(&self, category: TraitCategory, current: i32, target: i32) -> i64 {
        (current + 1..=target)
            .map(|level| self.cost(category, level))
            .sum()
    }

    /// Experience refunded when a trait drops from `current` to `target`
    pub fn refund_for_lowering(&self, category: TraitCategory, current: i32, target: i32) -> i64 {
        (target + 1..=current)
            .map(|level| self.cost(category, level))
            .sum()
    }
}
