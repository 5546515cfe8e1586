//! Snapshot of a creating entity, gathered from the host before detection.

use crate::host::EntityIntrospection;
use crate::rules::RuleSet;
use serde::{Deserialize, Serialize};
use spawnguard_types::{EntityClass, EntityHandle, ItemId, KindId, OwnerId};
use tracing::debug;

/// What the engine knows about one creating entity.
///
/// A field is `None` when the host could not answer for it (stale handle,
/// service hiccup) or when the active rules never need it. `network_owner`
/// is filled in by the caller once a rule has matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityObservation {
    pub entity: EntityHandle,
    pub kind: Option<KindId>,
    pub class: Option<EntityClass>,
    pub equipped_item: Option<ItemId>,
    pub network_owner: OwnerId,
}

impl EntityObservation {
    /// An observation with only the entity and kind known.
    pub fn new(entity: EntityHandle, kind: KindId) -> Self {
        Self {
            entity,
            kind: Some(kind),
            class: None,
            equipped_item: None,
            network_owner: OwnerId::NONE,
        }
    }

    pub fn with_class(mut self, class: EntityClass) -> Self {
        self.class = Some(class);
        self
    }

    pub fn with_equipped_item(mut self, item: ItemId) -> Self {
        self.equipped_item = Some(item);
        self
    }

    pub fn with_owner(mut self, owner: OwnerId) -> Self {
        self.network_owner = owner;
        self
    }
}

/// Queries the host for everything the active rules can match on.
///
/// Class and equipped item are only fetched when the weapon check is on, and
/// the item only for peds. Each failed query degrades its own field. The
/// owner is left as [`OwnerId::NONE`]; it only matters once a rule matched,
/// see [`owner_of`].
pub fn observe(
    entity: EntityHandle,
    host: &dyn EntityIntrospection,
    rules: &RuleSet,
) -> EntityObservation {
    let kind = host
        .kind(entity)
        .inspect_err(|e| debug!(entity = %entity, "kind lookup failed: {}", e))
        .ok();

    let (class, equipped_item) = if rules.weapon_check_enabled() {
        let class = host
            .class(entity)
            .inspect_err(|e| debug!(entity = %entity, "class lookup failed: {}", e))
            .ok()
            .flatten();
        let equipped_item = match class {
            Some(class) if class.is_ped() => host
                .equipped_item(entity)
                .inspect_err(|e| debug!(entity = %entity, "equipped item lookup failed: {}", e))
                .ok()
                .flatten(),
            _ => None,
        };
        (class, equipped_item)
    } else {
        (None, None)
    };

    EntityObservation {
        entity,
        kind,
        class,
        equipped_item,
        network_owner: OwnerId::NONE,
    }
}

/// First network owner of `entity`, or [`OwnerId::NONE`] if the host
/// cannot say.
pub fn owner_of(entity: EntityHandle, host: &dyn EntityIntrospection) -> OwnerId {
    host.network_owner(entity).unwrap_or_else(|e| {
        debug!(entity = %entity, "owner lookup failed: {}", e);
        OwnerId::NONE
    })
}
