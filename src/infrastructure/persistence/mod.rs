//! Persistence implementations of the character store port

mod memory;

pub use memory::InMemoryCharacterStore;
