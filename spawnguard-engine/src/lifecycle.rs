//! Module lifecycle: builds the rule set and wires the creation pipeline to
//! the host's event stream.
//!
//! A module moves `Unloaded -> Loaded -> Unloaded`. The rule set is fully
//! built before the pipeline is subscribed, and the pipeline is unsubscribed
//! before the rule set is dropped, so no event ever sees partial rules.

use crate::config::ConfigProvider;
use crate::detector::detect;
use crate::enforcer::{DEFAULT_MODULE_NAME, EnforcementResult, Enforcer};
use crate::error::EngineError;
use crate::host::{CreatingEvent, CreationHandler, EventSource, HostPorts, SubscriptionHandle};
use crate::observation::{observe, owner_of};
use crate::rules::RuleSet;
use crate::stats::{GuardStats, StatsSnapshot};
use std::rc::Rc;
use tracing::{info, warn};

/// A loadable rule module hosted by the session.
pub trait GuardModule {
    fn name(&self) -> &str;

    fn load(&mut self) -> Result<(), EngineError>;

    fn unload(&mut self) -> Result<(), EngineError>;

    fn is_loaded(&self) -> bool;

    /// Unloads (if loaded) and loads again with fresh configuration.
    ///
    /// A lost subscription does not stop the reload: the old handler is
    /// already gone, so loading again is safe. The loss is logged by
    /// `unload`.
    fn reload(&mut self) -> Result<(), EngineError> {
        if self.is_loaded() {
            match self.unload() {
                Ok(()) | Err(EngineError::SubscriptionLost { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        self.load()
    }
}

/// Handler subscribed to the event source while a module is loaded.
///
/// Runs observe, detect and enforce for each creating entity.
pub struct CreationPipeline {
    rules: Rc<RuleSet>,
    ports: HostPorts,
    enforcer: Enforcer,
    stats: Rc<GuardStats>,
}

impl CreationPipeline {
    pub fn new(
        rules: Rc<RuleSet>,
        ports: HostPorts,
        module_name: &str,
        stats: Rc<GuardStats>,
    ) -> Self {
        let enforcer = Enforcer::with_module_name(ports.clone(), module_name);
        Self {
            rules,
            ports,
            enforcer,
            stats,
        }
    }

    /// Handles one creating event. Returns the enforcement result if the
    /// entity violated a rule; the event is left untouched otherwise.
    pub fn process(&self, event: &mut dyn CreatingEvent) -> Option<EnforcementResult> {
        self.stats.record_observation();

        let entity = event.entity();
        let introspection = self.ports.introspection.as_ref();
        let observation = observe(entity, introspection, &self.rules);
        let mut violation = detect(&observation, &self.rules)?;
        violation.offender = owner_of(entity, introspection);

        warn!(
            entity = %entity,
            owner = %violation.offender,
            kind = ?observation.kind,
            rule = violation.rule_label,
            "Violation detected"
        );

        let result = self.enforcer.enforce(&violation, &self.rules, event);
        self.stats.record_enforcement(&violation, &result);
        Some(result)
    }
}

impl CreationHandler for CreationPipeline {
    fn on_entity_creating(&mut self, event: &mut dyn CreatingEvent) {
        self.process(event);
    }
}

enum ModuleState {
    Unloaded,
    Loaded {
        rules: Rc<RuleSet>,
        subscription: SubscriptionHandle,
    },
}

/// Owns the rule set and the event subscription for the entity-creation
/// module.
pub struct LifecycleController<C: ConfigProvider, S: EventSource> {
    name: String,
    config: C,
    events: S,
    ports: HostPorts,
    stats: Rc<GuardStats>,
    state: ModuleState,
}

impl<C: ConfigProvider, S: EventSource> LifecycleController<C, S> {
    pub fn new(config: C, events: S, ports: HostPorts) -> Self {
        Self::with_module_name(config, events, ports, DEFAULT_MODULE_NAME)
    }

    pub fn with_module_name(
        config: C,
        events: S,
        ports: HostPorts,
        name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            config,
            events,
            ports,
            stats: Rc::new(GuardStats::new()),
            state: ModuleState::Unloaded,
        }
    }

    // ================================================================
    // Accessors
    // ================================================================

    /// The active rule set, if loaded.
    pub fn rules(&self) -> Option<Rc<RuleSet>> {
        match &self.state {
            ModuleState::Loaded { rules, .. } => Some(Rc::clone(rules)),
            ModuleState::Unloaded => None,
        }
    }

    pub fn subscription(&self) -> Option<SubscriptionHandle> {
        match &self.state {
            ModuleState::Loaded { subscription, .. } => Some(*subscription),
            ModuleState::Unloaded => None,
        }
    }

    /// Counters accumulated over the controller's lifetime, across reloads.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn event_source(&self) -> &S {
        &self.events
    }

    pub fn config_provider(&self) -> &C {
        &self.config
    }
}

impl<C: ConfigProvider, S: EventSource> GuardModule for LifecycleController<C, S> {
    fn name(&self) -> &str {
        &self.name
    }

    // ================================================================
    // Loading / Unloading
    // ================================================================

    fn load(&mut self) -> Result<(), EngineError> {
        if self.is_loaded() {
            return Err(EngineError::AlreadyLoaded(self.name.clone()));
        }

        let config = self.config.guard_config()?;
        let rules = Rc::new(RuleSet::from_config(&config));

        let pipeline = CreationPipeline::new(
            Rc::clone(&rules),
            self.ports.clone(),
            &self.name,
            Rc::clone(&self.stats),
        );
        let subscription = self.events.subscribe(Box::new(pipeline));

        info!(module = %self.name, subscription = %subscription, "Module loaded");
        self.state = ModuleState::Loaded {
            rules,
            subscription,
        };
        Ok(())
    }

    fn unload(&mut self) -> Result<(), EngineError> {
        match std::mem::replace(&mut self.state, ModuleState::Unloaded) {
            ModuleState::Unloaded => Err(EngineError::NotLoaded(self.name.clone())),
            ModuleState::Loaded { subscription, .. } => {
                if !self.events.unsubscribe(subscription) {
                    warn!(
                        module = %self.name,
                        subscription = %subscription,
                        "Event source did not know our subscription"
                    );
                    return Err(EngineError::SubscriptionLost {
                        module: self.name.clone(),
                    });
                }
                info!(module = %self.name, "Module unloaded");
                Ok(())
            }
        }
    }

    fn is_loaded(&self) -> bool {
        matches!(self.state, ModuleState::Loaded { .. })
    }
}

impl<C: ConfigProvider, S: EventSource> Drop for LifecycleController<C, S> {
    fn drop(&mut self) {
        if self.is_loaded() {
            if let Err(e) = self.unload() {
                warn!(module = %self.name, "unload failed during drop: {}", e);
            }
        }
    }
}
