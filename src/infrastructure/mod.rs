//! Infrastructure layer - configuration and port implementations

pub mod config;
pub mod persistence;
pub mod random;
