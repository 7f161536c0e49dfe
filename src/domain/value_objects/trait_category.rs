//! Trait categories
//!
//! The category determines a trait's default rating bounds and which row of
//! the cost schedule applies when the trait is raised with experience.

use serde::{Deserialize, Serialize};

/// Category of a character trait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitCategory {
    /// Innate capabilities (Strength, Wits, ...); rated 1-5
    Attribute,
    /// Learned skills (Brawl, Occult, ...); rated 0-5
    Ability,
    /// Game-line specific powers; rated 0-10
    Special,
    /// Moral ratings (Conscience, Courage, ...); rated 0-5
    Virtue,
    /// Anything that doesn't fit the above
    Other,
}

impl TraitCategory {
    /// Default minimum rating for traits in this category
    pub fn default_min(&self) -> i32 {
        match self {
            Self::Attribute => 1,
            _ => 0,
        }
    }

    /// Default maximum rating for traits in this category
    pub fn default_max(&self) -> i32 {
        match self {
            Self::Special => 10,
            _ => 5,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Attribute => "Attribute",
            Self::Ability => "Ability",
            Self::Special => "Special",
            Self::Virtue => "Virtue",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for TraitCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
