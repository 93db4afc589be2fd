//! Core of the shopping list app: storage, live collections, relational
//! views and draft editing.
//! This crate is the single source of truth for list invariants.

pub mod config;
pub mod db;
pub mod draft;
pub mod live;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod store;
pub mod view;

pub use config::CoreConfig;
pub use draft::{
    Draft, DraftSessions, ItemDraft, LocationDraft, ResumeOutcome, SessionError, SessionId,
    SessionState,
};
pub use live::{LiveCollections, Refresh};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::event::{ChangeEvent, ChangeKind, EntityKind};
pub use model::item::{Item, ItemId};
pub use model::location::{
    Color, Location, LocationId, UNKNOWN_LOCATION_NAME, UNKNOWN_LOCATION_ORDER,
};
pub use repo::item_repo::ItemFilter;
pub use repo::location_repo::LocationFilter;
pub use repo::{RepoError, RepoResult};
pub use seed::{ImportSummary, ItemRecord, LocationRecord, SeedError};
pub use service::ShoppingList;
pub use store::EntityStore;
pub use view::{
    ItemView, LocationSection, LocationView, PurchaseHistory, SignalFilter, SignalHub,
    SubscriptionId, ViewSignal,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
