//! Character entity and its trait store
//!
//! A character exclusively owns its traits, keyed case-insensitively by name.
//! Macros are owned by the character too but only reference traits by name;
//! the lookup happens at roll time so trait edits and macro edits stay
//! independent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::errors::EngineError;
use crate::domain::value_objects::{CampaignId, CharacterId, MacroId, TraitCategory};

use super::RollMacro;

/// A named integer rating on a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterTrait {
    pub name: String,
    pub category: TraitCategory,
    pub rating: i32,
    pub min: i32,
    pub max: i32,
}

impl CharacterTrait {
    /// Create a trait with the category's default bounds
    pub fn new(
        name: impl Into<String>,
        category: TraitCategory,
        rating: i32,
    ) -> Result<Self, EngineError> {
        Self::with_bounds(
            name,
            category,
            rating,
            category.default_min(),
            category.default_max(),
        )
    }

    /// Create a trait with explicit bounds
    pub fn with_bounds(
        name: impl Into<String>,
        category: TraitCategory,
        rating: i32,
        min: i32,
        max: i32,
    ) -> Result<Self, EngineError> {
        let name = name.into();
        if rating < min || rating > max {
            return Err(EngineError::OutOfBounds {
                name,
                rating,
                min,
                max,
            });
        }
        Ok(Self {
            name,
            category,
            rating,
            min,
            max,
        })
    }
}

/// A player character with its traits and saved roll macros
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub campaign_id: CampaignId,
    pub name: String,
    /// Traits keyed by lowercased name; the display name lives on the trait
    traits: BTreeMap<String, CharacterTrait>,
    /// Saved roll macros, unique by name per character
    macros: Vec<RollMacro>,
    pub is_alive: bool,
}

impl Character {
    pub fn new(campaign_id: CampaignId, name: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(),
            campaign_id,
            name: name.into(),
            traits: BTreeMap::new(),
            macros: Vec::new(),
            is_alive: true,
        }
    }

    pub fn with_trait(mut self, t: CharacterTrait) -> Self {
        self.traits.insert(t.name.to_lowercase(), t);
        self
    }

    // ------------------------------------------------------------------
    // Trait store
    // ------------------------------------------------------------------

    /// Look up a trait by name, case-insensitively
    pub fn trait_named(&self, name: &str) -> Result<&CharacterTrait, EngineError> {
        self.traits
            .get(&name.to_lowercase())
            .ok_or_else(|| EngineError::trait_not_found(name))
    }

    pub fn traits(&self) -> impl Iterator<Item = &CharacterTrait> {
        self.traits.values()
    }

    /// Add a new trait; names must be unique per character
    pub fn add_trait(&mut self, t: CharacterTrait) -> Result<(), EngineError> {
        let key = t.name.to_lowercase();
        if self.traits.contains_key(&key) {
            return Err(EngineError::DuplicateName {
                kind: "trait",
                name: t.name,
            });
        }
        self.traits.insert(key, t);
        Ok(())
    }

    /// Set a trait's rating, enforcing its bounds
    pub fn set_trait_rating(&mut self, name: &str, rating: i32) -> Result<i32, EngineError> {
        let t = self
            .traits
            .get_mut(&name.to_lowercase())
            .ok_or_else(|| EngineError::trait_not_found(name))?;
        if rating < t.min || rating > t.max {
            return Err(EngineError::OutOfBounds {
                name: t.name.clone(),
                rating,
                min: t.min,
                max: t.max,
            });
        }
        t.rating = rating;
        Ok(t.rating)
    }

    /// Remove a trait. Macros referencing it are left alone: they fail with
    /// a dangling reference at resolution time instead of being silently
    /// rewritten.
    pub fn remove_trait(&mut self, name: &str) -> Result<CharacterTrait, EngineError> {
        self.traits
            .remove(&name.to_lowercase())
            .ok_or_else(|| EngineError::trait_not_found(name))
    }

    // ------------------------------------------------------------------
    // Macro registry
    // ------------------------------------------------------------------

    pub fn macros(&self) -> &[RollMacro] {
        &self.macros
    }

    pub fn macro_by_id(&self, id: MacroId) -> Result<&RollMacro, EngineError> {
        self.macros
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| EngineError::macro_not_found(id.to_string()))
    }

    pub fn macro_named(&self, name: &str) -> Result<&RollMacro, EngineError> {
        self.macros
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| EngineError::macro_not_found(name))
    }

    pub fn add_macro(&mut self, m: RollMacro) -> Result<(), EngineError> {
        if self
            .macros
            .iter()
            .any(|existing| existing.name.eq_ignore_ascii_case(&m.name))
        {
            return Err(EngineError::DuplicateName {
                kind: "macro",
                name: m.name,
            });
        }
        self.macros.push(m);
        Ok(())
    }

    pub fn remove_macro(&mut self, id: MacroId) -> Result<RollMacro, EngineError> {
        let pos = self
            .macros
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| EngineError::macro_not_found(id.to_string()))?;
        Ok(self.macros.remove(pos))
    }

    /// Resolve a macro against the live trait store.
    ///
    /// Ratings are looked up at call time, never cached on the macro. A
    /// referenced trait that no longer exists is a hard failure.
    pub fn resolve_macro(&self, m: &RollMacro) -> Result<(i32, i32), EngineError> {
        let mut sum = self.macro_trait_rating(m, &m.trait_one)?;
        if let Some(second) = &m.trait_two {
            sum += self.macro_trait_rating(m, second)?;
        }
        Ok((sum, m.modifier))
    }

    fn macro_trait_rating(&self, m: &RollMacro, trait_name: &str) -> Result<i32, EngineError> {
        self.trait_named(trait_name)
            .map(|t| t.rating)
            .map_err(|_| EngineError::DanglingReference {
                macro_name: m.name.clone(),
                trait_name: trait_name.to_string(),
            })
    }
}
