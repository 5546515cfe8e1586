//! Identifier types used throughout the SpawnGuard core.
//!
//! Hosts hand out small integer handles; these newtypes keep entity, owner,
//! kind and item values from being mixed up at the port boundary.

use crate::{ModelRef, Result, joaat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Host handle of a simulation entity. Zero is never a live entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityHandle(u32);

impl EntityHandle {
    /// The null handle.
    pub const NONE: Self = Self(0);

    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn as_raw(&self) -> u32 {
        self.0
    }

    /// Returns true unless this is the null handle.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Session participant that owns an entity on the network.
///
/// Hosts report "no owner" as `-1`; any non-positive value is treated as the
/// sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(i32);

impl OwnerId {
    /// The "no owner" sentinel.
    pub const NONE: Self = Self(-1);

    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn as_raw(&self) -> i32 {
        self.0
    }

    /// Returns true if this refers to an actual participant.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "player#{}", self.0)
        } else {
            f.write_str("no-owner")
        }
    }
}

/// Generates a hash-backed identifier newtype.
macro_rules! hashed_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            #[must_use]
            pub const fn from_hash(hash: u32) -> Self {
                Self(hash)
            }

            /// Hashes a name the way the host does.
            #[must_use]
            pub fn from_name(name: &str) -> Self {
                Self(joaat(name))
            }

            /// Resolves a configured name or hash.
            pub fn resolve(reference: &ModelRef) -> Result<Self> {
                reference.resolve().map(Self)
            }

            #[must_use]
            pub const fn hash(&self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{:08X}", self.0)
            }
        }
    };
}

hashed_id!(
    /// Model identifier of an entity (vehicle, ped or object model).
    KindId
);

hashed_id!(
    /// Identifier of an item a ped can hold, such as a weapon.
    ItemId
);
