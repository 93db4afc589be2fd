//! Entity store: the single owner of durable items and locations.
//!
//! # Responsibility
//! - Create, read, update and delete items and locations by stable id.
//! - Resolve (find-or-create) the Unknown Location.
//! - Record a change feed of `ChangeEvent`s for every applied mutation.
//!
//! # Invariants
//! - Mutations accumulate in one open SQLite transaction until `save()`.
//! - At most one location carries `UNKNOWN_LOCATION_ORDER`; it is never deleted.
//! - Items never reference a missing location.

mod entity_store;

pub use entity_store::EntityStore;
