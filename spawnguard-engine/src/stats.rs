//! Running counters for the creation pipeline.

use crate::detector::{Violation, ViolationKind};
use crate::enforcer::EnforcementResult;
use serde::{Deserialize, Serialize};
use std::cell::Cell;

/// Counters updated by the pipeline and read by the controller, both on the
/// host's dispatch thread.
#[derive(Debug, Default)]
pub struct GuardStats {
    observed: Cell<u64>,
    illegal_kinds: Cell<u64>,
    illegal_items: Cell<u64>,
    sanctions_issued: Cell<u64>,
    sanctions_failed: Cell<u64>,
    removals_failed: Cell<u64>,
    cancelled: Cell<u64>,
}

/// Point-in-time copy of [`GuardStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub observed: u64,
    pub illegal_kinds: u64,
    pub illegal_items: u64,
    pub sanctions_issued: u64,
    pub sanctions_failed: u64,
    pub removals_failed: u64,
    pub cancelled: u64,
}

impl StatsSnapshot {
    pub fn violations(&self) -> u64 {
        self.illegal_kinds + self.illegal_items
    }
}

impl GuardStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_observation(&self) {
        bump(&self.observed);
    }

    pub(crate) fn record_enforcement(&self, violation: &Violation, result: &EnforcementResult) {
        let counter = match violation.kind {
            ViolationKind::IllegalKind => &self.illegal_kinds,
            ViolationKind::IllegalEquippedItem => &self.illegal_items,
        };
        bump(counter);

        if result.sanction.is_performed() {
            bump(&self.sanctions_issued);
        } else if result.sanction.is_failed() {
            bump(&self.sanctions_failed);
        }
        if result.removal.is_failed() {
            bump(&self.removals_failed);
        }
        if result.cancelled {
            bump(&self.cancelled);
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            observed: self.observed.get(),
            illegal_kinds: self.illegal_kinds.get(),
            illegal_items: self.illegal_items.get(),
            sanctions_issued: self.sanctions_issued.get(),
            sanctions_failed: self.sanctions_failed.get(),
            removals_failed: self.removals_failed.get(),
            cancelled: self.cancelled.get(),
        }
    }
}

fn bump(counter: &Cell<u64>) {
    counter.set(counter.get() + 1);
}
