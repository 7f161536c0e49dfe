//! Application layer - use case implementations and outbound ports

pub mod ports;
pub mod services;
