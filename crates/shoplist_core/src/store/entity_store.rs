//! SQLite-backed entity store with a pending-changes transaction.

use crate::db::{open_db, open_db_in_memory};
use crate::model::event::{ChangeEvent, ChangeKind};
use crate::model::item::{Item, ItemId};
use crate::model::location::{
    Location, LocationId, DEFAULT_USER_ORDER, MAX_USER_ORDER, UNKNOWN_LOCATION_ORDER,
};
use crate::repo::item_repo::{ItemFilter, ItemRepository, SqliteItemRepository};
use crate::repo::location_repo::{LocationFilter, LocationRepository, SqliteLocationRepository};
use crate::repo::{ensure_connection_ready, RepoResult};
use log::{debug, error, info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

/// SQLite-backed store for items and locations.
///
/// Construct exactly one per database file and hand it around by reference.
pub struct EntityStore {
    conn: Connection,
    events: Vec<ChangeEvent>,
    unknown_location_id: Option<LocationId>,
}

impl EntityStore {
    /// Opens the store at `path`. Failure here is fatal for the application.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::from_connection(open_db(path)?)
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::from_connection(open_db_in_memory()?)
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> RepoResult<Self> {
        ensure_connection_ready(&conn)?;
        Ok(Self {
            conn,
            events: Vec::new(),
            unknown_location_id: None,
        })
    }

    /// Raw connection access for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn items(&self) -> SqliteItemRepository<'_> {
        SqliteItemRepository::new(&self.conn)
    }

    fn locations(&self) -> SqliteLocationRepository<'_> {
        SqliteLocationRepository::new(&self.conn)
    }

    /// Opens the pending-changes transaction if none is active.
    fn begin_changes(&self) -> RepoResult<()> {
        if self.conn.is_autocommit() {
            self.conn.execute_batch("BEGIN IMMEDIATE;")?;
        }
        Ok(())
    }

    /// Runs `mutation` as one all-or-nothing step inside the pending changes.
    ///
    /// On `Err` every write and event made by `mutation` is discarded; changes
    /// pending from earlier steps are kept.
    pub fn atomically<T>(
        &mut self,
        mutation: impl FnOnce(&mut Self) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let opened_here = self.conn.is_autocommit();
        let events_before = self.events.len();
        let unknown_before = self.unknown_location_id;
        self.begin_changes()?;
        self.conn.execute_batch("SAVEPOINT store_mutation;")?;

        let result = mutation(self);
        match &result {
            Ok(_) => {
                self.conn.execute_batch("RELEASE store_mutation;")?;
                if opened_here && self.events.len() == events_before {
                    self.conn.execute_batch("ROLLBACK;")?;
                }
            }
            Err(err) => {
                self.events.truncate(events_before);
                self.unknown_location_id = unknown_before;
                let undo = if opened_here {
                    "ROLLBACK;"
                } else {
                    "ROLLBACK TO store_mutation; RELEASE store_mutation;"
                };
                if let Err(undo_err) = self.conn.execute_batch(undo) {
                    error!("event=store_rollback module=store status=error error={undo_err}");
                }
                warn!("event=store_mutation module=store status=rolled_back error={err}");
            }
        }
        result
    }

    fn emit(&mut self, event: ChangeEvent) {
        self.events.push(event);
    }

    /// Drains the change feed in emission order.
    pub fn take_events(&mut self) -> Vec<ChangeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events recorded since the last `take_events`.
    pub fn pending_events(&self) -> &[ChangeEvent] {
        &self.events
    }

    /// Whether mutations are waiting for `save()`.
    pub fn has_changes(&self) -> bool {
        !self.conn.is_autocommit()
    }

    /// Returns the Unknown Location, creating it on first use.
    ///
    /// Repeated calls return the same id.
    pub fn unknown_location(&mut self) -> RepoResult<Location> {
        if let Some(id) = self.unknown_location_id {
            if let Some(location) = self.locations().get_location(id)? {
                if location.is_unknown() {
                    return Ok(location);
                }
            }
            self.unknown_location_id = None;
        }

        if let Some(location) = self.locations().find_by_order(UNKNOWN_LOCATION_ORDER)? {
            self.unknown_location_id = Some(location.id);
            return Ok(location);
        }

        let location = Location::unknown();
        self.begin_changes()?;
        self.locations().insert_location(&location)?;
        self.unknown_location_id = Some(location.id);
        self.emit(ChangeEvent::location(ChangeKind::Created, location.id));
        info!(
            "event=unknown_location_create module=store status=ok location_id={}",
            location.id
        );
        Ok(location)
    }

    pub fn unknown_location_id(&mut self) -> RepoResult<LocationId> {
        self.unknown_location().map(|location| location.id)
    }

    /// Creates an item with default fields, placed at the Unknown Location.
    pub fn create_item(&mut self) -> RepoResult<Item> {
        let item = Item::new(self.unknown_location_id()?);
        self.insert_item(&item)?;
        Ok(item)
    }

    /// Persists a fully populated new item.
    ///
    /// A dangling `location_id` is redirected to the Unknown Location.
    pub fn insert_item(&mut self, item: &Item) -> RepoResult<Item> {
        let mut item = item.clone();
        item.location_id = self.resolve_location_id(item.location_id)?;
        self.begin_changes()?;
        self.items().insert_item(&item)?;
        self.emit(ChangeEvent::item(ChangeKind::Created, item.id));
        debug!(
            "event=item_create module=store status=ok item_id={} location_id={}",
            item.id, item.location_id
        );
        Ok(item)
    }

    /// Creates a user location with default name, order and color.
    pub fn create_location(&mut self) -> RepoResult<Location> {
        let mut location = Location::new(String::new(), DEFAULT_USER_ORDER);
        location.name = None;
        self.insert_location(&location)
    }

    /// Persists a fully populated new location.
    ///
    /// The reserved order is never granted here; use `unknown_location()`.
    pub fn insert_location(&mut self, location: &Location) -> RepoResult<Location> {
        let mut location = location.clone();
        if location.is_unknown() {
            location.visitation_order = MAX_USER_ORDER;
        }
        self.begin_changes()?;
        self.locations().insert_location(&location)?;
        self.emit(ChangeEvent::location(ChangeKind::Created, location.id));
        debug!(
            "event=location_create module=store status=ok location_id={} order={}",
            location.id, location.visitation_order
        );
        Ok(location)
    }

    pub fn find_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        self.items().get_item(id)
    }

    pub fn find_location(&self, id: LocationId) -> RepoResult<Option<Location>> {
        self.locations().get_location(id)
    }

    /// Writes `item` over the stored row with the same id.
    ///
    /// Returns `false` when the item does not exist or nothing changed.
    pub fn update_item(&mut self, item: &Item) -> RepoResult<bool> {
        let Some(current) = self.find_item(item.id)? else {
            return Ok(false);
        };
        let mut next = item.clone();
        next.location_id = self.resolve_location_id(next.location_id)?;
        if next == current {
            return Ok(false);
        }

        self.begin_changes()?;
        self.items().update_item(&next)?;
        self.emit(ChangeEvent::item(ChangeKind::Updated, next.id));
        debug!(
            "event=item_update module=store status=ok item_id={} location_changed={}",
            next.id,
            current.location_id != next.location_id
        );
        Ok(true)
    }

    /// Writes `location` over the stored row with the same id.
    ///
    /// The Unknown Location keeps its reserved order; other locations can
    /// never acquire it. Returns `false` when absent or unchanged.
    pub fn update_location(&mut self, location: &Location) -> RepoResult<bool> {
        let Some(current) = self.find_location(location.id)? else {
            return Ok(false);
        };
        let mut next = location.clone();
        if current.is_unknown() {
            next.visitation_order = UNKNOWN_LOCATION_ORDER;
        } else if next.is_unknown() {
            next.visitation_order = MAX_USER_ORDER;
        }
        if next == current {
            return Ok(false);
        }

        self.begin_changes()?;
        self.locations().update_location(&next)?;
        self.emit(ChangeEvent::location(ChangeKind::Updated, next.id));
        debug!(
            "event=location_update module=store status=ok location_id={}",
            next.id
        );
        Ok(true)
    }

    /// Removes an item. Missing ids are a no-op returning `false`.
    pub fn delete_item(&mut self, id: ItemId) -> RepoResult<bool> {
        if self.find_item(id)?.is_none() {
            return Ok(false);
        }
        self.begin_changes()?;
        self.items().delete_item(id)?;
        self.emit(ChangeEvent::item(ChangeKind::Deleted, id));
        debug!("event=item_delete module=store status=ok item_id={id}");
        Ok(true)
    }

    /// Removes a location after moving its items to the Unknown Location.
    ///
    /// The Unknown Location and missing ids are a no-op returning `false`.
    pub fn delete_location(&mut self, id: LocationId) -> RepoResult<bool> {
        let Some(location) = self.find_location(id)? else {
            return Ok(false);
        };
        if location.is_unknown() {
            debug!("event=location_delete module=store status=skipped reason=unknown_location");
            return Ok(false);
        }

        let unknown_id = self.unknown_location_id()?;
        self.begin_changes()?;
        let moved = self.items().reassign_location(id, unknown_id)?;
        for item_id in &moved {
            self.emit(ChangeEvent::item(ChangeKind::Updated, *item_id));
        }
        self.locations().delete_location(id)?;
        self.emit(ChangeEvent::location(ChangeKind::Deleted, id));
        debug!(
            "event=location_delete module=store status=ok location_id={} reassigned_items={}",
            id,
            moved.len()
        );
        Ok(true)
    }

    /// Commits pending changes, logging and swallowing any failure.
    ///
    /// Mutations stay visible in memory when the commit fails.
    pub fn save(&mut self) {
        if let Err(err) = self.try_save() {
            error!("event=store_save module=store status=error error={err}");
        }
    }

    /// Commits pending changes and reports failure to the caller.
    pub fn try_save(&mut self) -> RepoResult<()> {
        if !self.has_changes() {
            return Ok(());
        }
        let started_at = Instant::now();
        self.conn.execute_batch("COMMIT;")?;
        info!(
            "event=store_save module=store status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    pub fn count_items(&self, filter: &ItemFilter) -> RepoResult<u64> {
        self.items().count_items(filter)
    }

    /// Items matching `filter`, sorted by name.
    pub fn all_items(&self, filter: &ItemFilter) -> RepoResult<Vec<Item>> {
        self.items().list_items(filter)
    }

    pub fn count_locations(&self, filter: &LocationFilter) -> RepoResult<u64> {
        self.locations().count_locations(filter)
    }

    /// Locations matching `filter`, sorted by visitation order.
    pub fn all_locations(&self, filter: &LocationFilter) -> RepoResult<Vec<Location>> {
        self.locations().list_locations(filter)
    }

    fn resolve_location_id(&mut self, id: LocationId) -> RepoResult<LocationId> {
        if self.find_location(id)?.is_some() {
            return Ok(id);
        }
        self.unknown_location_id()
    }
}
