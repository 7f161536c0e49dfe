//! Saved roll macros
//!
//! A macro is a named shortcut binding one or two trait names plus a flat
//! modifier. It stores names, not ratings or trait ids: resolution against
//! the live trait store is the contract.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CharacterId, MacroId};

/// A reusable roll definition owned by a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollMacro {
    pub id: MacroId,
    pub character_id: CharacterId,
    pub name: String,
    /// Optional short form for chat commands
    pub abbreviation: Option<String>,
    pub description: Option<String>,
    pub trait_one: String,
    pub trait_two: Option<String>,
    pub modifier: i32,
}

impl RollMacro {
    pub fn new(
        character_id: CharacterId,
        name: impl Into<String>,
        trait_one: impl Into<String>,
        trait_two: Option<&str>,
        modifier: i32,
    ) -> Self {
        Self {
            id: MacroId::new(),
            character_id,
            name: name.into(),
            abbreviation: None,
            description: None,
            trait_one: trait_one.into(),
            trait_two: trait_two.map(str::to_string),
            modifier,
        }
    }

    pub fn with_abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.abbreviation = Some(abbreviation.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
