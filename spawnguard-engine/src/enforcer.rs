//! Enforcement: sanction the offender, remove the entity, cancel the creation.
//!
//! The three actions are independent. A failed sanction or removal is
//! reported in the [`EnforcementResult`] and never stops the cancel.

use crate::detector::Violation;
use crate::error::EngineError;
use crate::host::{CreatingEvent, HostPorts};
use crate::rules::RuleSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spawnguard_types::{EntityHandle, OwnerId};
use std::fmt;
use tracing::{info, warn};
use uuid::Uuid;

/// Module name stamped on sanctions when none is configured.
pub const DEFAULT_MODULE_NAME: &str = "EntityCreate";

/// Unique identifier for a sanction request, time-ordered for audit logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SanctionId(Uuid);

impl SanctionId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SanctionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SanctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Audit record handed to the sanction service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanctionRequest {
    pub id: SanctionId,
    pub offender: OwnerId,
    pub reason: String,
    pub source_module: String,
    pub subject: EntityHandle,
    pub issued_at: DateTime<Utc>,
}

impl SanctionRequest {
    pub fn for_violation(violation: &Violation, source_module: &str) -> Self {
        Self {
            id: SanctionId::new(),
            offender: violation.offender,
            reason: violation.rule_label.to_string(),
            source_module: source_module.to_string(),
            subject: violation.subject,
            issued_at: Utc::now(),
        }
    }

    /// Serializes the request for backends that queue JSON.
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Why an action was not attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    BanDisabled,
    NoOffender,
    InvalidHandle,
}

/// Outcome of a single enforcement action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    Performed,
    Skipped(SkipReason),
    Failed(String),
}

impl ActionOutcome {
    pub fn is_performed(&self) -> bool {
        matches!(self, Self::Performed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// What happened while enforcing one violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforcementResult {
    pub sanction: ActionOutcome,
    pub removal: ActionOutcome,
    pub cancelled: bool,
}

/// Carries out enforcement against the host.
#[derive(Debug, Clone)]
pub struct Enforcer {
    ports: HostPorts,
    module_name: String,
}

impl Enforcer {
    pub fn new(ports: HostPorts) -> Self {
        Self::with_module_name(ports, DEFAULT_MODULE_NAME)
    }

    pub fn with_module_name(ports: HostPorts, module_name: impl Into<String>) -> Self {
        Self {
            ports,
            module_name: module_name.into(),
        }
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Applies every enforcement action for `violation`.
    /// The creation event is always cancelled, exactly once.
    pub fn enforce(
        &self,
        violation: &Violation,
        rules: &RuleSet,
        event: &mut dyn CreatingEvent,
    ) -> EnforcementResult {
        let sanction = self.sanction_offender(violation, rules);
        let removal = self.remove_subject(violation);

        event.cancel();

        info!(
            entity = %violation.subject,
            owner = %violation.offender,
            rule = violation.rule_label,
            sanctioned = sanction.is_performed(),
            removed = removal.is_performed(),
            "Creation cancelled"
        );

        EnforcementResult {
            sanction,
            removal,
            cancelled: true,
        }
    }

    fn sanction_offender(&self, violation: &Violation, rules: &RuleSet) -> ActionOutcome {
        if !rules.ban_owner_enabled() {
            return ActionOutcome::Skipped(SkipReason::BanDisabled);
        }
        if !violation.offender.is_valid() {
            warn!(
                entity = %violation.subject,
                rule = violation.rule_label,
                "No network owner to sanction"
            );
            return ActionOutcome::Skipped(SkipReason::NoOffender);
        }

        let request = SanctionRequest::for_violation(violation, &self.module_name);
        match self.ports.sanctions.sanction(&request) {
            Ok(()) => {
                info!(
                    sanction_id = %request.id,
                    owner = %request.offender,
                    rule = violation.rule_label,
                    "Sanction issued"
                );
                ActionOutcome::Performed
            }
            Err(e) => {
                warn!(owner = %request.offender, "Sanction failed: {}", e);
                ActionOutcome::Failed(e.to_string())
            }
        }
    }

    fn remove_subject(&self, violation: &Violation) -> ActionOutcome {
        if !violation.subject.is_valid() {
            return ActionOutcome::Skipped(SkipReason::InvalidHandle);
        }
        match self.ports.mutation.remove(violation.subject) {
            Ok(()) => ActionOutcome::Performed,
            Err(e) => {
                warn!(entity = %violation.subject, "Entity removal failed: {}", e);
                ActionOutcome::Failed(e.to_string())
            }
        }
    }
}
