//! Capabilities the host simulation supplies to the engine.
//!
//! Every host native the engine needs is reached through one of these
//! traits, so detection and enforcement can run against in-memory fakes.
//! All calls are synchronous; the host dispatches creation events on a
//! single thread and each one is fully handled before the next.

use crate::enforcer::SanctionRequest;
use crate::error::HostError;
use spawnguard_types::{EntityClass, EntityHandle, ItemId, KindId, OwnerId};
use std::fmt;
use std::rc::Rc;

/// Read-only queries about a live entity.
pub trait EntityIntrospection {
    fn kind(&self, entity: EntityHandle) -> Result<KindId, HostError>;

    /// Host class of the entity. `Ok(None)` means the host reports no entity.
    fn class(&self, entity: EntityHandle) -> Result<Option<EntityClass>, HostError>;

    /// Item currently selected by a ped. Only meaningful for peds.
    fn equipped_item(&self, entity: EntityHandle) -> Result<Option<ItemId>, HostError>;

    /// First network owner of the entity, or [`OwnerId::NONE`].
    fn network_owner(&self, entity: EntityHandle) -> Result<OwnerId, HostError>;
}

/// Entity mutation.
pub trait EntityMutation {
    fn remove(&self, entity: EntityHandle) -> Result<(), HostError>;
}

/// Backend that executes sanctions against session participants.
pub trait SanctionService {
    fn sanction(&self, request: &SanctionRequest) -> Result<(), HostError>;
}

/// The in-flight creation being dispatched by the host.
///
/// Only exists for the duration of one dispatch, which is the only window in
/// which the creation can still be cancelled.
pub trait CreatingEvent {
    fn entity(&self) -> EntityHandle;

    /// Aborts the creation. Cancellation is terminal for this event.
    fn cancel(&mut self);
}

/// Receives creation events from the host.
pub trait CreationHandler {
    fn on_entity_creating(&mut self, event: &mut dyn CreatingEvent);
}

/// Opaque token returned by [`EventSource::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// The host's "entity creating" event stream.
pub trait EventSource {
    fn subscribe(&self, handler: Box<dyn CreationHandler>) -> SubscriptionHandle;

    /// Removes a handler. Returns false if the handle was not registered.
    fn unsubscribe(&self, subscription: SubscriptionHandle) -> bool;
}

impl<T: EventSource + ?Sized> EventSource for Rc<T> {
    fn subscribe(&self, handler: Box<dyn CreationHandler>) -> SubscriptionHandle {
        (**self).subscribe(handler)
    }

    fn unsubscribe(&self, subscription: SubscriptionHandle) -> bool {
        (**self).unsubscribe(subscription)
    }
}

impl<T: EventSource + ?Sized> EventSource for &T {
    fn subscribe(&self, handler: Box<dyn CreationHandler>) -> SubscriptionHandle {
        (**self).subscribe(handler)
    }

    fn unsubscribe(&self, subscription: SubscriptionHandle) -> bool {
        (**self).unsubscribe(subscription)
    }
}

/// A plain [`CreatingEvent`] for hosts that only need the cancel flag back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCreation {
    entity: EntityHandle,
    cancelled: bool,
}

impl PendingCreation {
    pub fn new(entity: EntityHandle) -> Self {
        Self {
            entity,
            cancelled: false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl CreatingEvent for PendingCreation {
    fn entity(&self) -> EntityHandle {
        self.entity
    }

    fn cancel(&mut self) {
        self.cancelled = true;
    }
}

/// The entity-facing host capabilities the pipeline needs.
#[derive(Clone)]
pub struct HostPorts {
    pub introspection: Rc<dyn EntityIntrospection>,
    pub mutation: Rc<dyn EntityMutation>,
    pub sanctions: Rc<dyn SanctionService>,
}

impl HostPorts {
    pub fn new(
        introspection: Rc<dyn EntityIntrospection>,
        mutation: Rc<dyn EntityMutation>,
        sanctions: Rc<dyn SanctionService>,
    ) -> Self {
        Self {
            introspection,
            mutation,
            sanctions,
        }
    }
}

impl fmt::Debug for HostPorts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostPorts").finish_non_exhaustive()
    }
}
