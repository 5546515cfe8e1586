//! Core type definitions for SpawnGuard.
//!
//! This crate defines the host-agnostic vocabulary shared by the engine and
//! by host adapters:
//! - Entity, owner, kind and item identifiers
//! - The entity class table reported by the host
//! - Case-insensitive name hashing and the name-or-hash config value
//!
//! Nothing here talks to a host; adapters translate their native values into
//! these types at the port boundary.

mod class;
mod hash;
mod ids;

pub use class::EntityClass;
pub use hash::{ModelRef, joaat};
pub use ids::{EntityHandle, ItemId, KindId, OwnerId};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("empty model name")]
    EmptyName,

    #[error("invalid hash literal: {0}")]
    InvalidHashLiteral(String),

    #[error("hash out of 32-bit range: {0}")]
    HashOutOfRange(i64),

    #[error("class code 0 does not name an entity class")]
    NoEntityClass,
}
