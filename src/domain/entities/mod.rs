//! Domain entities - Core business objects with identity

mod character;
mod ledger;
mod macro_def;

pub use character::{Character, CharacterTrait};
pub use ledger::{ExperienceLedger, LedgerEntry};
pub use macro_def::RollMacro;
