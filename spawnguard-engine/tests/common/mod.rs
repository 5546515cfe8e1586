//! In-memory host fakes shared by the integration tests.

#![allow(dead_code)]

use spawnguard_engine::types::{EntityClass, EntityHandle, ItemId, KindId, OwnerId};
use spawnguard_engine::{
    CreatingEvent, CreationHandler, EntityIntrospection, EntityMutation, EventSource, HostError,
    HostPorts, SanctionRequest, SanctionService, SubscriptionHandle,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ================================================================
// Entities
// ================================================================

#[derive(Debug, Clone)]
pub struct FakeEntity {
    pub kind: KindId,
    pub class: EntityClass,
    pub equipped_item: Option<ItemId>,
    pub owner: OwnerId,
}

impl FakeEntity {
    pub fn vehicle(kind: u32, owner: i32) -> Self {
        Self {
            kind: KindId::from_hash(kind),
            class: EntityClass::Vehicle,
            equipped_item: None,
            owner: OwnerId::from_raw(owner),
        }
    }

    pub fn ped(kind: u32, item: Option<u32>, owner: i32) -> Self {
        Self {
            kind: KindId::from_hash(kind),
            class: EntityClass::Ped,
            equipped_item: item.map(ItemId::from_hash),
            owner: OwnerId::from_raw(owner),
        }
    }
}

/// Introspection and mutation over a map of live entities.
#[derive(Default)]
pub struct FakeWorld {
    entities: RefCell<HashMap<EntityHandle, FakeEntity>>,
    removed: RefCell<Vec<EntityHandle>>,
    fail_removal: Cell<bool>,
    fail_owner_lookup: Cell<bool>,
    class_queries: Cell<usize>,
    item_queries: Cell<usize>,
    owner_queries: Cell<usize>,
}

impl FakeWorld {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn spawn(&self, raw: u32, entity: FakeEntity) -> EntityHandle {
        let handle = EntityHandle::from_raw(raw);
        self.entities.borrow_mut().insert(handle, entity);
        handle
    }

    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.entities.borrow().contains_key(&handle)
    }

    pub fn removed(&self) -> Vec<EntityHandle> {
        self.removed.borrow().clone()
    }

    pub fn fail_removal(&self, fail: bool) {
        self.fail_removal.set(fail);
    }

    pub fn fail_owner_lookup(&self, fail: bool) {
        self.fail_owner_lookup.set(fail);
    }

    pub fn class_queries(&self) -> usize {
        self.class_queries.get()
    }

    pub fn item_queries(&self) -> usize {
        self.item_queries.get()
    }

    pub fn owner_queries(&self) -> usize {
        self.owner_queries.get()
    }

    fn with_entity<T>(
        &self,
        handle: EntityHandle,
        f: impl FnOnce(&FakeEntity) -> T,
    ) -> Result<T, HostError> {
        self.entities
            .borrow()
            .get(&handle)
            .map(f)
            .ok_or(HostError::StaleHandle)
    }
}

impl EntityIntrospection for FakeWorld {
    fn kind(&self, entity: EntityHandle) -> Result<KindId, HostError> {
        self.with_entity(entity, |e| e.kind)
    }

    fn class(&self, entity: EntityHandle) -> Result<Option<EntityClass>, HostError> {
        self.class_queries.set(self.class_queries.get() + 1);
        self.with_entity(entity, |e| Some(e.class))
    }

    fn equipped_item(&self, entity: EntityHandle) -> Result<Option<ItemId>, HostError> {
        self.item_queries.set(self.item_queries.get() + 1);
        self.with_entity(entity, |e| e.equipped_item)
    }

    fn network_owner(&self, entity: EntityHandle) -> Result<OwnerId, HostError> {
        self.owner_queries.set(self.owner_queries.get() + 1);
        if self.fail_owner_lookup.get() {
            return Err(HostError::Unavailable("ownership table locked".into()));
        }
        self.with_entity(entity, |e| e.owner)
    }
}

impl EntityMutation for FakeWorld {
    fn remove(&self, entity: EntityHandle) -> Result<(), HostError> {
        if self.fail_removal.get() {
            return Err(HostError::Rejected("entity is script-owned".into()));
        }
        self.entities
            .borrow_mut()
            .remove(&entity)
            .ok_or(HostError::StaleHandle)?;
        self.removed.borrow_mut().push(entity);
        Ok(())
    }
}

// ================================================================
// Sanctions
// ================================================================

#[derive(Default)]
pub struct FakeSanctions {
    issued: RefCell<Vec<SanctionRequest>>,
    unreachable: Cell<bool>,
}

impl FakeSanctions {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn issued(&self) -> Vec<SanctionRequest> {
        self.issued.borrow().clone()
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.set(unreachable);
    }
}

impl SanctionService for FakeSanctions {
    fn sanction(&self, request: &SanctionRequest) -> Result<(), HostError> {
        if self.unreachable.get() {
            return Err(HostError::Unavailable("ban backend offline".into()));
        }
        self.issued.borrow_mut().push(request.clone());
        Ok(())
    }
}

pub fn ports(world: &Rc<FakeWorld>, sanctions: &Rc<FakeSanctions>) -> HostPorts {
    HostPorts::new(world.clone(), world.clone(), sanctions.clone())
}

// ================================================================
// Events
// ================================================================

/// Creating event that counts how often it was cancelled.
#[derive(Debug)]
pub struct CountingEvent {
    entity: EntityHandle,
    pub cancels: usize,
}

impl CountingEvent {
    pub fn new(entity: EntityHandle) -> Self {
        Self { entity, cancels: 0 }
    }
}

impl CreatingEvent for CountingEvent {
    fn entity(&self) -> EntityHandle {
        self.entity
    }

    fn cancel(&mut self) {
        self.cancels += 1;
    }
}

/// Single-threaded event bus dispatching to subscribed handlers in order.
#[derive(Default)]
pub struct FakeBus {
    handlers: RefCell<Vec<(SubscriptionHandle, Box<dyn CreationHandler>)>>,
    next_id: Cell<u64>,
}

impl FakeBus {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Dispatches a creating event and returns how many times it was cancelled.
    pub fn emit(&self, entity: EntityHandle) -> usize {
        let mut event = CountingEvent::new(entity);
        for (_, handler) in self.handlers.borrow_mut().iter_mut() {
            handler.on_entity_creating(&mut event);
        }
        event.cancels
    }
}

impl EventSource for FakeBus {
    fn subscribe(&self, handler: Box<dyn CreationHandler>) -> SubscriptionHandle {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let handle = SubscriptionHandle::from_raw(id);
        self.handlers.borrow_mut().push((handle, handler));
        handle
    }

    fn unsubscribe(&self, subscription: SubscriptionHandle) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(handle, _)| *handle != subscription);
        handlers.len() != before
    }
}
