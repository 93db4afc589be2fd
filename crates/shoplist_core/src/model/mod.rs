//! Domain model for the shopping list.
//!
//! # Responsibility
//! - Define the two persisted entities (`Item`, `Location`) and the change
//!   events the entity store emits for them.
//!
//! # Invariants
//! - Every entity carries a stable UUID that is never reassigned.
//! - Every item points at exactly one location.
//! - Exactly one location carries `UNKNOWN_LOCATION_ORDER`.

pub mod event;
pub mod item;
pub mod location;

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
