use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Broad category of a simulation entity as reported by the host.
///
/// Codes follow the host's `GET_ENTITY_TYPE` native: `0` means "no entity",
/// `1` ped, `2` vehicle, `3` object. Anything else is kept verbatim.
///
/// The code is canonical: equality, hashing and serialization all go through
/// [`EntityClass::code`], so `Other(1)` is the same class as `Ped`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum EntityClass {
    Ped,
    Vehicle,
    Object,
    Other(u8),
}

impl EntityClass {
    /// Maps a host class code. Returns `None` for code `0` (no entity).
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => None,
            1 => Some(Self::Ped),
            2 => Some(Self::Vehicle),
            3 => Some(Self::Object),
            other => Some(Self::Other(other)),
        }
    }

    /// Returns the host class code.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Ped => 1,
            Self::Vehicle => 2,
            Self::Object => 3,
            Self::Other(code) => *code,
        }
    }

    #[must_use]
    pub const fn is_ped(&self) -> bool {
        self.code() == 1
    }
}

impl PartialEq for EntityClass {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for EntityClass {}

impl Hash for EntityClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl TryFrom<u8> for EntityClass {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(Error::NoEntityClass)
    }
}

impl From<EntityClass> for u8 {
    fn from(class: EntityClass) -> Self {
        class.code()
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Self::from_code(self.code()).unwrap_or(*self) {
            Self::Ped => f.write_str("ped"),
            Self::Vehicle => f.write_str("vehicle"),
            Self::Object => f.write_str("object"),
            Self::Other(code) => write!(f, "class#{code}"),
        }
    }
}
