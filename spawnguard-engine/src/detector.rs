//! Violation detection: a pure function of an observation and the rules.

use crate::observation::EntityObservation;
use crate::rules::RuleSet;
use serde::{Deserialize, Serialize};
use spawnguard_types::{EntityHandle, OwnerId};
use std::fmt;

/// Which blacklist an entity tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    IllegalKind,
    IllegalEquippedItem,
}

impl ViolationKind {
    /// Audit label attached to sanctions.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::IllegalKind => "Illegal Entity [Vehicle Owned]",
            Self::IllegalEquippedItem => "Illegal Entity [Weapon]",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A detected rule breach, consumed immediately by the enforcer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub offender: OwnerId,
    pub subject: EntityHandle,
    pub rule_label: &'static str,
}

impl Violation {
    fn from_observation(kind: ViolationKind, observation: &EntityObservation) -> Self {
        Self {
            kind,
            offender: observation.network_owner,
            subject: observation.entity,
            rule_label: kind.label(),
        }
    }
}

/// Evaluates the rules against one observation. First match wins:
/// 1. blacklisted kind, regardless of class or item;
/// 2. with the weapon check on, a ped holding a blacklisted item.
pub fn detect(observation: &EntityObservation, rules: &RuleSet) -> Option<Violation> {
    if observation.kind.is_some_and(|kind| rules.is_illegal_kind(kind)) {
        return Some(Violation::from_observation(
            ViolationKind::IllegalKind,
            observation,
        ));
    }

    if rules.weapon_check_enabled()
        && observation.class.is_some_and(|class| class.is_ped())
        && observation
            .equipped_item
            .is_some_and(|item| rules.is_illegal_item(item))
    {
        return Some(Violation::from_observation(
            ViolationKind::IllegalEquippedItem,
            observation,
        ));
    }

    None
}
