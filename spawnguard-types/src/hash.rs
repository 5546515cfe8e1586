//! Name hashing and the name-or-hash configuration value.
//!
//! Hosts identify models and weapons by the Jenkins one-at-a-time hash of
//! their lower-cased name. Configuration may list either the name or the
//! already-hashed value; [`ModelRef`] covers both spellings.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Case-insensitive Jenkins one-at-a-time hash, as computed by the host's
/// `GET_HASH_KEY` native.
#[must_use]
pub fn joaat(name: &str) -> u32 {
    let mut hash: u32 = 0;
    for byte in name.bytes() {
        hash = hash.wrapping_add(u32::from(byte.to_ascii_lowercase()));
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}

/// A model or item reference as written in configuration.
///
/// Strings are names unless they carry a `0x` prefix, in which case they are
/// literal hexadecimal hashes. Integers are literal hashes; negative values
/// in the signed 32-bit range are taken as their unsigned bit pattern because
/// hosts commonly report hashes as signed integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelRef {
    Hash(i64),
    Name(String),
}

impl ModelRef {
    /// Resolves this reference to its runtime hash.
    pub fn resolve(&self) -> Result<u32> {
        match self {
            Self::Hash(value) => hash_from_integer(*value),
            Self::Name(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(Error::EmptyName);
                }
                match hex_literal(name) {
                    Some(digits) => u32::from_str_radix(digits, 16)
                        .map_err(|_| Error::InvalidHashLiteral(name.to_string())),
                    None => Ok(joaat(name)),
                }
            }
        }
    }
}

impl From<&str> for ModelRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ModelRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<u32> for ModelRef {
    fn from(hash: u32) -> Self {
        Self::Hash(i64::from(hash))
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hash(value) => write!(f, "{value}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

fn hex_literal(name: &str) -> Option<&str> {
    name.strip_prefix("0x").or_else(|| name.strip_prefix("0X"))
}

fn hash_from_integer(value: i64) -> Result<u32> {
    if let Ok(unsigned) = u32::try_from(value) {
        return Ok(unsigned);
    }
    i32::try_from(value)
        .map(|signed| signed as u32)
        .map_err(|_| Error::HashOutOfRange(value))
}
