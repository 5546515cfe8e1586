//! Entity-creation rule engine for SpawnGuard.
//!
//! Inspects entities while the host is still creating them and decides,
//! before the creation completes, whether they break the session's
//! blacklists. Violations cancel the creation, remove the entity and
//! optionally sanction the participant that owns it.
//!
//! The host is reached only through the port traits in [`host`]; the
//! [`LifecycleController`] wires the detection pipeline to the host's event
//! stream for as long as the module is loaded.

mod config;
mod detector;
mod enforcer;
mod error;
pub mod host;
mod lifecycle;
mod observation;
mod rules;
mod stats;

pub use config::{ConfigProvider, GuardConfig, TomlConfigFile};
pub use detector::{Violation, ViolationKind, detect};
pub use enforcer::{
    ActionOutcome, DEFAULT_MODULE_NAME, EnforcementResult, Enforcer, SanctionId, SanctionRequest,
    SkipReason,
};
pub use error::{EngineError, HostError};
pub use host::{
    CreatingEvent, CreationHandler, EntityIntrospection, EntityMutation, EventSource, HostPorts,
    PendingCreation, SanctionService, SubscriptionHandle,
};
pub use lifecycle::{CreationPipeline, GuardModule, LifecycleController};
pub use observation::{EntityObservation, observe, owner_of};
pub use rules::RuleSet;
pub use stats::{GuardStats, StatsSnapshot};
pub use spawnguard_types as types;
