//! Item domain model.
//!
//! # Invariants
//! - `quantity` is always within `1..=MAX_QUANTITY`.
//! - Moving an item off the list stamps `date_last_purchased`; moving it back
//!   on the list leaves the stamp untouched.
//! - `date_last_purchased == None` means the item was never purchased.

use crate::model::location::LocationId;
use uuid::Uuid;

/// Stable item identifier.
pub type ItemId = Uuid;

/// Display value for items without a usable name.
pub const ITEM_NAME_PLACEHOLDER: &str = "Not Available";
/// Name given to item drafts opened without a hint.
pub const NEW_ITEM_NAME: &str = "New Item";
/// Largest storable quantity. Quantities are stored compactly as `i16`.
pub const MAX_QUANTITY: i64 = i16::MAX as i64;

/// One shopping list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    /// `None` and blank names render as `ITEM_NAME_PLACEHOLDER`.
    pub name: Option<String>,
    quantity: i16,
    pub is_available: bool,
    pub on_list: bool,
    /// Unix epoch milliseconds of the last move off the list.
    pub date_last_purchased: Option<i64>,
    /// Owning location. Never dangling once persisted.
    pub location_id: LocationId,
}

impl Item {
    /// Creates an item with default fields and a fresh id.
    pub fn new(location_id: LocationId) -> Self {
        Self::with_id(Uuid::new_v4(), location_id)
    }

    /// Creates an item with default fields and a caller-provided id.
    pub fn with_id(id: ItemId, location_id: LocationId) -> Self {
        Self {
            id,
            name: Some(String::new()),
            quantity: 1,
            is_available: true,
            on_list: true,
            date_last_purchased: None,
            location_id,
        }
    }

    pub fn quantity(&self) -> i64 {
        i64::from(self.quantity)
    }

    /// Sets quantity, clamped into `1..=MAX_QUANTITY`.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = clamp_quantity(quantity);
    }

    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => ITEM_NAME_PLACEHOLDER,
        }
    }

    /// Moves the item on or off the list.
    ///
    /// Returns whether `on_list` changed. Only the on→off transition touches
    /// `date_last_purchased`.
    pub fn set_on_list(&mut self, on_list: bool, now_ms: i64) -> bool {
        if self.on_list == on_list {
            return false;
        }
        if self.on_list && !on_list {
            self.date_last_purchased = Some(now_ms);
        }
        self.on_list = on_list;
        true
    }

    /// Flips `on_list`, applying purchase stamping.
    pub fn toggle_on_list(&mut self, now_ms: i64) {
        self.set_on_list(!self.on_list, now_ms);
    }

    pub fn is_never_purchased(&self) -> bool {
        self.date_last_purchased.is_none()
    }
}

/// Clamps an arbitrary quantity into the storable positive range.
pub fn clamp_quantity(quantity: i64) -> i16 {
    // Bounded by MAX_QUANTITY, the cast cannot truncate.
    quantity.clamp(1, MAX_QUANTITY) as i16
}

#[cfg(test)]
mod tests {
    use super::{clamp_quantity, Item, ITEM_NAME_PLACEHOLDER, MAX_QUANTITY};
    use uuid::Uuid;

    #[test]
    fn new_item_uses_list_defaults() {
        let location = Uuid::new_v4();
        let item = Item::new(location);
        assert_eq!(item.name.as_deref(), Some(""));
        assert_eq!(item.quantity(), 1);
        assert!(item.is_available);
        assert!(item.on_list);
        assert!(item.is_never_purchased());
        assert_eq!(item.location_id, location);
    }

    #[test]
    fn quantity_is_clamped_to_positive_compact_range() {
        assert_eq!(clamp_quantity(0), 1);
        assert_eq!(clamp_quantity(-7), 1);
        assert_eq!(i64::from(clamp_quantity(1_000_000)), MAX_QUANTITY);

        let mut item = Item::new(Uuid::new_v4());
        item.set_quantity(12);
        assert_eq!(item.quantity(), 12);
    }

    #[test]
    fn display_name_falls_back_for_missing_or_blank_names() {
        let mut item = Item::new(Uuid::new_v4());
        assert_eq!(item.display_name(), ITEM_NAME_PLACEHOLDER);
        item.name = None;
        assert_eq!(item.display_name(), ITEM_NAME_PLACEHOLDER);
        item.name = Some("Milk".to_string());
        assert_eq!(item.display_name(), "Milk");
    }

    #[test]
    fn moving_off_list_stamps_purchase_date_and_back_on_keeps_it() {
        let mut item = Item::new(Uuid::new_v4());

        assert!(item.set_on_list(false, 1_000));
        assert_eq!(item.date_last_purchased, Some(1_000));

        assert!(item.set_on_list(true, 2_000));
        assert_eq!(item.date_last_purchased, Some(1_000));

        item.toggle_on_list(3_000);
        assert!(!item.on_list);
        assert_eq!(item.date_last_purchased, Some(3_000));
    }

    #[test]
    fn setting_same_state_is_a_no_op() {
        let mut item = Item::new(Uuid::new_v4());
        assert!(!item.set_on_list(true, 5_000));
        assert!(item.is_never_purchased());
    }
}
