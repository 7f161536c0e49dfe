//! Outbound ports - contracts the infrastructure must fulfil

mod store_port;

pub use store_port::{CharacterRecord, CharacterStorePort, VersionedRecord};
