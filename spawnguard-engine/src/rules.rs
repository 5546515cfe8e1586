//! Immutable rule snapshot built once per module load.

use crate::config::GuardConfig;
use spawnguard_types::{ItemId, KindId, ModelRef};
use std::collections::HashSet;
use tracing::{info, warn};

/// Blacklists and enforcement flags for one loaded session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    illegal_entity_kinds: HashSet<KindId>,
    illegal_item_kinds: HashSet<ItemId>,
    ban_owner_enabled: bool,
    weapon_check_enabled: bool,
}

impl RuleSet {
    /// Builds the rule set from raw configuration.
    ///
    /// Entries that cannot be resolved to a hash are dropped with a warning.
    /// The weapon blacklist is only resolved when ped weapon checks are on.
    pub fn from_config(config: &GuardConfig) -> Self {
        let illegal_entity_kinds: HashSet<KindId> =
            resolve_all(&config.illegal_models, "illegal-models", KindId::resolve);

        let illegal_item_kinds: HashSet<ItemId> = if config.check_peds_for_weapons {
            resolve_all(&config.blacklisted_weapons, "blacklisted-weapons", ItemId::resolve)
        } else {
            HashSet::new()
        };

        let rules = Self {
            illegal_entity_kinds,
            illegal_item_kinds,
            ban_owner_enabled: config.ban_network_owner,
            weapon_check_enabled: config.check_peds_for_weapons,
        };

        info!(
            illegal_kinds = rules.illegal_entity_kinds.len(),
            illegal_items = rules.illegal_item_kinds.len(),
            ban_owner = rules.ban_owner_enabled,
            weapon_check = rules.weapon_check_enabled,
            "Built entity-create rule set"
        );
        rules
    }

    /// Builds a rule set from already-resolved ids.
    pub fn new(
        illegal_entity_kinds: impl IntoIterator<Item = KindId>,
        illegal_item_kinds: impl IntoIterator<Item = ItemId>,
        ban_owner_enabled: bool,
        weapon_check_enabled: bool,
    ) -> Self {
        let illegal_item_kinds = if weapon_check_enabled {
            illegal_item_kinds.into_iter().collect()
        } else {
            HashSet::new()
        };
        Self {
            illegal_entity_kinds: illegal_entity_kinds.into_iter().collect(),
            illegal_item_kinds,
            ban_owner_enabled,
            weapon_check_enabled,
        }
    }

    pub fn is_illegal_kind(&self, kind: KindId) -> bool {
        self.illegal_entity_kinds.contains(&kind)
    }

    pub fn is_illegal_item(&self, item: ItemId) -> bool {
        self.illegal_item_kinds.contains(&item)
    }

    pub fn illegal_entity_kinds(&self) -> &HashSet<KindId> {
        &self.illegal_entity_kinds
    }

    pub fn illegal_item_kinds(&self) -> &HashSet<ItemId> {
        &self.illegal_item_kinds
    }

    pub fn ban_owner_enabled(&self) -> bool {
        self.ban_owner_enabled
    }

    pub fn weapon_check_enabled(&self) -> bool {
        self.weapon_check_enabled
    }
}

fn resolve_all<T, F>(entries: &[ModelRef], list: &str, resolve: F) -> HashSet<T>
where
    T: Eq + std::hash::Hash,
    F: Fn(&ModelRef) -> spawnguard_types::Result<T>,
{
    entries
        .iter()
        .filter_map(|entry| match resolve(entry) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(list, entry = %entry, "Dropping unresolvable entry: {}", e);
                None
            }
        })
        .collect()
}
