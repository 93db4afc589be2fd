//! Relational view builder: UI-ready joins of items and locations, plus the
//! change signals that keep those joins fresh.
//!
//! # Responsibility
//! - Flatten an item together with its location's name, order and color.
//! - Count and list the members of each location.
//! - Turn store change events into per-entity view signals, including the
//!   cross-entity ones a plain event feed would miss.
//!
//! # Invariants
//! - Editing a location's display fields signals every member item.
//! - Re-pointing an item signals both its old and its new location.

mod invalidation;
mod projection;
mod signals;

pub use invalidation::RelationalViews;
pub use projection::{
    item_view, item_views, list_sections, location_view, location_views, member_views,
    purchase_history, ItemView, LocationSection, LocationView, PurchaseHistory, MS_PER_DAY,
};
pub use signals::{SignalFilter, SignalHub, SubscriptionId, ViewSignal};
