//! Live, sorted in-memory collections mirroring the entity store.
//!
//! # Invariants
//! - `items` is sorted by name, `locations` by visitation order, exactly as
//!   the store returns them.
//! - A collection is replaced wholesale whenever any event touches its
//!   entity kind; there is no incremental merge.

mod projector;

pub use projector::{LiveCollections, Refresh};
