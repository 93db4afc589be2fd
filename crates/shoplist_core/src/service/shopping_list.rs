//! Application facade tying the store to live collections and views.

use crate::draft::{ItemDraft, LocationDraft};
use crate::live::LiveCollections;
use crate::model::item::{Item, ItemId};
use crate::model::location::{clamp_user_order, Color, Location, LocationId};
use crate::model::now_epoch_ms;
use crate::repo::item_repo::ItemFilter;
use crate::repo::location_repo::LocationFilter;
use crate::repo::RepoResult;
use crate::store::EntityStore;
use crate::view::{
    self, ItemView, LocationSection, LocationView, PurchaseHistory, RelationalViews,
    SignalFilter, SignalHub, SubscriptionId, ViewSignal,
};
use log::info;
use std::path::Path;

/// Top-level application object for one shopping list database.
///
/// Every mutating call completes in this order before returning: store
/// mutation, live collection refetch, view invalidation, signal delivery.
pub struct ShoppingList {
    store: EntityStore,
    live: LiveCollections,
    views: RelationalViews,
    hub: SignalHub,
}

impl ShoppingList {
    /// Opens the database at `path`. An error here is fatal for the app.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::from_store(EntityStore::open(path)?)
    }

    pub fn open_in_memory() -> RepoResult<Self> {
        Self::from_store(EntityStore::open_in_memory()?)
    }

    /// Takes ownership of `store` and performs the initial load.
    pub fn from_store(mut store: EntityStore) -> RepoResult<Self> {
        store.take_events();
        let live = LiveCollections::load(&store)?;
        let views = RelationalViews::new(&live);
        info!(
            "event=shopping_list_open module=service status=ok items={} locations={}",
            live.items().len(),
            live.locations().len()
        );
        Ok(Self {
            store,
            live,
            views,
            hub: SignalHub::new(),
        })
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn live(&self) -> &LiveCollections {
        &self.live
    }

    pub fn subscribe(
        &mut self,
        filter: SignalFilter,
        listener: impl FnMut(&ViewSignal) + 'static,
    ) -> SubscriptionId {
        self.hub.subscribe(filter, listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.hub.unsubscribe(id)
    }

    /// Runs `mutation` against the store as one atomic step, then settles once.
    ///
    /// A failed mutation leaves no writes behind and publishes nothing.
    pub fn with_store<T>(
        &mut self,
        mutation: impl FnOnce(&mut EntityStore) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let result = self.store.atomically(mutation);
        self.settle()?;
        result
    }

    /// Propagates pending store events to collections, views and listeners.
    fn settle(&mut self) -> RepoResult<Vec<ViewSignal>> {
        let events = self.store.take_events();
        if events.is_empty() {
            return Ok(Vec::new());
        }
        let refresh = self.live.apply(&events, &self.store)?;
        let signals = self.views.invalidate(&events, refresh, &self.live);
        self.hub.publish(&signals);
        Ok(signals)
    }

    /// Screen-appear hook: makes sure the Unknown Location exists.
    pub fn on_appear(&mut self) -> RepoResult<Location> {
        self.unknown_location()
    }

    /// Screen-disappear hook: flushes pending changes.
    pub fn on_disappear(&mut self) {
        self.save();
    }

    /// Commits pending changes, logging and swallowing failures.
    pub fn save(&mut self) {
        self.store.save();
    }

    /// Commits pending changes and reports failures.
    pub fn try_save(&mut self) -> RepoResult<()> {
        self.store.try_save()
    }

    pub fn unknown_location(&mut self) -> RepoResult<Location> {
        self.with_store(EntityStore::unknown_location)
    }

    pub fn create_item(&mut self) -> RepoResult<Item> {
        self.with_store(EntityStore::create_item)
    }

    pub fn create_location(&mut self) -> RepoResult<Location> {
        self.with_store(EntityStore::create_location)
    }

    pub fn insert_item(&mut self, item: &Item) -> RepoResult<Item> {
        self.with_store(|store| store.insert_item(item))
    }

    pub fn insert_location(&mut self, location: &Location) -> RepoResult<Location> {
        self.with_store(|store| store.insert_location(location))
    }

    pub fn find_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        self.store.find_item(id)
    }

    pub fn find_location(&self, id: LocationId) -> RepoResult<Option<Location>> {
        self.store.find_location(id)
    }

    pub fn update_item(&mut self, item: &Item) -> RepoResult<bool> {
        self.with_store(|store| store.update_item(item))
    }

    pub fn update_location(&mut self, location: &Location) -> RepoResult<bool> {
        self.with_store(|store| store.update_location(location))
    }

    pub fn delete_item(&mut self, id: ItemId) -> RepoResult<bool> {
        self.with_store(|store| store.delete_item(id))
    }

    /// No-op for the Unknown Location; otherwise re-homes items first.
    pub fn delete_location(&mut self, id: LocationId) -> RepoResult<bool> {
        self.with_store(|store| store.delete_location(id))
    }

    pub fn count_items(&self, filter: &ItemFilter) -> RepoResult<u64> {
        self.store.count_items(filter)
    }

    pub fn all_items(&self, filter: &ItemFilter) -> RepoResult<Vec<Item>> {
        self.store.all_items(filter)
    }

    pub fn count_locations(&self, filter: &LocationFilter) -> RepoResult<u64> {
        self.store.count_locations(filter)
    }

    pub fn all_locations(&self, filter: &LocationFilter) -> RepoResult<Vec<Location>> {
        self.store.all_locations(filter)
    }

    /// Flips an item on or off the list. Returns the updated item.
    pub fn toggle_on_list(&mut self, id: ItemId) -> RepoResult<Option<Item>> {
        self.modify_item(id, |item| item.toggle_on_list(now_epoch_ms()))
    }

    pub fn set_on_list(&mut self, id: ItemId, on_list: bool) -> RepoResult<Option<Item>> {
        self.modify_item(id, |item| {
            item.set_on_list(on_list, now_epoch_ms());
        })
    }

    /// Re-points an item; both locations are signalled.
    pub fn set_item_location(
        &mut self,
        id: ItemId,
        location_id: LocationId,
    ) -> RepoResult<Option<Item>> {
        self.modify_item(id, |item| item.location_id = location_id)
    }

    /// Renames a location; every member item is signalled.
    pub fn set_location_name(
        &mut self,
        id: LocationId,
        name: impl Into<String>,
    ) -> RepoResult<Option<Location>> {
        let name = name.into();
        self.modify_location(id, |location| location.name = Some(name))
    }

    /// Reorders a location within the user range; every member item is
    /// signalled. The Unknown Location keeps its reserved order.
    pub fn set_location_order(
        &mut self,
        id: LocationId,
        visitation_order: i32,
    ) -> RepoResult<Option<Location>> {
        self.modify_location(id, |location| {
            location.visitation_order = clamp_user_order(visitation_order)
        })
    }

    /// Recolors a location; every member item is signalled.
    pub fn set_location_color(
        &mut self,
        id: LocationId,
        color: Color,
    ) -> RepoResult<Option<Location>> {
        self.modify_location(id, |location| location.set_color(color))
    }

    /// Moves every on-list item off the list, stamping purchase dates.
    pub fn move_all_off_list(&mut self) -> RepoResult<usize> {
        let now_ms = now_epoch_ms();
        self.with_store(|store| {
            let mut moved = 0;
            for mut item in store.all_items(&ItemFilter::on_list(true))? {
                item.set_on_list(false, now_ms);
                if store.update_item(&item)? {
                    moved += 1;
                }
            }
            Ok(moved)
        })
    }

    /// Marks every unavailable item available again.
    pub fn mark_all_available(&mut self) -> RepoResult<usize> {
        self.with_store(|store| {
            let filter = ItemFilter {
                is_available: Some(false),
                ..ItemFilter::default()
            };
            let mut marked = 0;
            for mut item in store.all_items(&filter)? {
                item.is_available = true;
                if store.update_item(&item)? {
                    marked += 1;
                }
            }
            Ok(marked)
        })
    }

    fn modify_item(
        &mut self,
        id: ItemId,
        change: impl FnOnce(&mut Item),
    ) -> RepoResult<Option<Item>> {
        self.with_store(|store| {
            let Some(mut item) = store.find_item(id)? else {
                return Ok(None);
            };
            change(&mut item);
            store.update_item(&item)?;
            store.find_item(id)
        })
    }

    fn modify_location(
        &mut self,
        id: LocationId,
        change: impl FnOnce(&mut Location),
    ) -> RepoResult<Option<Location>> {
        self.with_store(|store| {
            let Some(mut location) = store.find_location(id)? else {
                return Ok(None);
            };
            change(&mut location);
            store.update_location(&location)?;
            store.find_location(id)
        })
    }

    pub fn item_view(&self, id: ItemId) -> Option<ItemView> {
        view::item_view(&self.live, id)
    }

    /// Every item, sorted by name.
    pub fn item_views(&self) -> Vec<ItemView> {
        view::item_views(&self.live, self.live.items())
    }

    pub fn items_on_list(&self) -> Vec<ItemView> {
        view::item_views(&self.live, self.live.items_on_list())
    }

    pub fn items_off_list(&self) -> Vec<ItemView> {
        view::item_views(&self.live, self.live.items_off_list())
    }

    pub fn location_view(&self, id: LocationId) -> Option<LocationView> {
        view::location_view(&self.live, id)
    }

    /// Every location, in visitation order.
    pub fn location_views(&self) -> Vec<LocationView> {
        view::location_views(&self.live)
    }

    pub fn members(&self, location_id: LocationId) -> Vec<ItemView> {
        view::member_views(&self.live, location_id)
    }

    pub fn list_sections(&self, on_list: bool) -> Vec<LocationSection> {
        view::list_sections(&self.live, on_list)
    }

    pub fn purchased_within(&self, days: u32, now_ms: i64) -> PurchaseHistory {
        view::purchase_history(&self.live, days, now_ms)
    }

    /// Draft of an existing item, or `None` if it vanished.
    pub fn checkout_item_draft(&self, id: ItemId) -> RepoResult<Option<ItemDraft>> {
        Ok(self.store.find_item(id)?.as_ref().map(ItemDraft::from_item))
    }

    /// Draft of a not-yet-created item at `location` (or the Unknown Location).
    pub fn new_item_draft(
        &mut self,
        name_hint: Option<&str>,
        location: Option<LocationId>,
    ) -> RepoResult<ItemDraft> {
        let location_id = match location {
            Some(id) if self.store.find_location(id)?.is_some() => id,
            _ => self.unknown_location()?.id,
        };
        Ok(ItemDraft::new(name_hint, location_id))
    }

    /// Writes `draft` into the store, creating the item when needed, and saves.
    ///
    /// Callers must only commit drafts whose `can_be_saved()` is true.
    pub fn commit_item_draft(&mut self, draft: &ItemDraft) -> RepoResult<ItemId> {
        let now_ms = now_epoch_ms();
        let id = self.with_store(|store| {
            let existing = match draft.id {
                Some(id) => store.find_item(id)?,
                None => None,
            };
            let mut item = match existing {
                Some(item) => item,
                None => store.create_item()?,
            };
            draft.apply_to(&mut item, now_ms);
            store.update_item(&item)?;
            Ok(item.id)
        })?;
        self.save();
        info!(
            "event=item_draft_commit module=service status=ok item_id={} created={}",
            id,
            draft.id != Some(id)
        );
        Ok(id)
    }

    /// Draft of an existing location, or `None` if it vanished.
    pub fn checkout_location_draft(&self, id: LocationId) -> RepoResult<Option<LocationDraft>> {
        Ok(self
            .store
            .find_location(id)?
            .as_ref()
            .map(LocationDraft::from_location))
    }

    pub fn new_location_draft(&self) -> LocationDraft {
        LocationDraft::new()
    }

    /// Writes `draft` into the store, creating the location when needed, and saves.
    ///
    /// Callers must only commit drafts whose `can_be_saved()` is true.
    pub fn commit_location_draft(&mut self, draft: &LocationDraft) -> RepoResult<LocationId> {
        let id = self.with_store(|store| {
            let existing = match draft.id {
                Some(id) => store.find_location(id)?,
                None => None,
            };
            let mut location = match existing {
                Some(location) => location,
                None => store.create_location()?,
            };
            draft.apply_to(&mut location);
            store.update_location(&location)?;
            Ok(location.id)
        })?;
        self.save();
        info!(
            "event=location_draft_commit module=service status=ok location_id={} created={}",
            id,
            draft.id != Some(id)
        );
        Ok(id)
    }

    /// Deletes the item behind `draft`, if any, and saves.
    pub fn delete_associated_item(&mut self, draft: &ItemDraft) -> RepoResult<bool> {
        let Some(id) = draft.id else {
            return Ok(false);
        };
        let deleted = self.delete_item(id)?;
        self.save();
        Ok(deleted)
    }

    /// Deletes the location behind `draft` unless it is the Unknown Location.
    pub fn delete_associated_location(&mut self, draft: &LocationDraft) -> RepoResult<bool> {
        let Some(id) = draft.id else {
            return Ok(false);
        };
        let deleted = self.delete_location(id)?;
        self.save();
        Ok(deleted)
    }

    /// `false` once the item a draft was checked out from is gone.
    pub fn item_draft_still_exists(&self, draft: &ItemDraft) -> RepoResult<bool> {
        match draft.id {
            Some(id) => Ok(self.store.find_item(id)?.is_some()),
            None => Ok(true),
        }
    }

    /// `false` once the location a draft was checked out from is gone.
    pub fn location_draft_still_exists(&self, draft: &LocationDraft) -> RepoResult<bool> {
        match draft.id {
            Some(id) => Ok(self.store.find_location(id)?.is_some()),
            None => Ok(true),
        }
    }
}
