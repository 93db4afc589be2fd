//! Sorted item and location snapshots refreshed from the store.

use crate::model::event::{touches, ChangeEvent, EntityKind};
use crate::model::item::{Item, ItemId};
use crate::model::location::{Location, LocationId};
use crate::repo::item_repo::ItemFilter;
use crate::repo::location_repo::LocationFilter;
use crate::repo::RepoResult;
use crate::store::EntityStore;
use log::debug;

/// Which collections an `apply` call refetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Refresh {
    pub items: bool,
    pub locations: bool,
}

impl Refresh {
    pub fn any(&self) -> bool {
        self.items || self.locations
    }
}

/// Published snapshots of all items and all locations.
#[derive(Debug, Default)]
pub struct LiveCollections {
    items: Vec<Item>,
    locations: Vec<Location>,
    item_revision: u64,
    location_revision: u64,
}

impl LiveCollections {
    /// Performs the initial full load of both collections.
    pub fn load(store: &EntityStore) -> RepoResult<Self> {
        let mut live = Self::default();
        live.refetch_items(store)?;
        live.refetch_locations(store)?;
        Ok(live)
    }

    /// Refetches every collection touched by `events`.
    pub fn apply(&mut self, events: &[ChangeEvent], store: &EntityStore) -> RepoResult<Refresh> {
        let refresh = Refresh {
            items: touches(events, EntityKind::Item),
            locations: touches(events, EntityKind::Location),
        };
        if refresh.items {
            self.refetch_items(store)?;
        }
        if refresh.locations {
            self.refetch_locations(store)?;
        }
        Ok(refresh)
    }

    fn refetch_items(&mut self, store: &EntityStore) -> RepoResult<()> {
        self.items = store.all_items(&ItemFilter::default())?;
        self.item_revision += 1;
        debug!(
            "event=items_refetch module=live status=ok count={} revision={}",
            self.items.len(),
            self.item_revision
        );
        Ok(())
    }

    fn refetch_locations(&mut self, store: &EntityStore) -> RepoResult<()> {
        self.locations = store.all_locations(&LocationFilter::default())?;
        self.location_revision += 1;
        debug!(
            "event=locations_refetch module=live status=ok count={} revision={}",
            self.locations.len(),
            self.location_revision
        );
        Ok(())
    }

    /// All items, sorted by name.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// All locations, sorted by visitation order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Items currently on the shopping list. Computed on every call.
    pub fn items_on_list(&self) -> Vec<&Item> {
        self.items.iter().filter(|item| item.on_list).collect()
    }

    /// Items currently off the shopping list. Computed on every call.
    pub fn items_off_list(&self) -> Vec<&Item> {
        self.items.iter().filter(|item| !item.on_list).collect()
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.iter().find(|location| location.id == id)
    }

    /// Items whose location is `location_id`, in name order.
    pub fn items_at(&self, location_id: LocationId) -> impl Iterator<Item = &Item> + '_ {
        self.items
            .iter()
            .filter(move |item| item.location_id == location_id)
    }

    /// Number of item refetches so far, starting at 1 after `load`.
    pub fn item_revision(&self) -> u64 {
        self.item_revision
    }

    /// Number of location refetches so far, starting at 1 after `load`.
    pub fn location_revision(&self) -> u64 {
        self.location_revision
    }
}
