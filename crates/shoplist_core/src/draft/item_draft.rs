//! Editable copy of an item.

use crate::model::item::{Item, ItemId, NEW_ITEM_NAME};
use crate::model::location::LocationId;

/// Editable copy of an item's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    /// Source item, or `None` for an item that does not exist yet.
    pub id: Option<ItemId>,
    pub name: String,
    pub quantity: i64,
    pub is_available: bool,
    pub on_list: bool,
    pub date_last_purchased: Option<i64>,
    pub location_id: LocationId,
}

impl ItemDraft {
    /// Copies every editable field of `item`.
    pub fn from_item(item: &Item) -> Self {
        Self {
            id: Some(item.id),
            name: item.name.clone().unwrap_or_default(),
            quantity: item.quantity(),
            is_available: item.is_available,
            on_list: item.on_list,
            date_last_purchased: item.date_last_purchased,
            location_id: item.location_id,
        }
    }

    /// Defaults for a new item named `name_hint` (or "New Item").
    pub fn new(name_hint: Option<&str>, location_id: LocationId) -> Self {
        let name = name_hint
            .map(str::trim)
            .filter(|hint| !hint.is_empty())
            .unwrap_or(NEW_ITEM_NAME);
        Self {
            id: None,
            name: name.to_string(),
            quantity: 1,
            is_available: true,
            on_list: true,
            date_last_purchased: None,
            location_id,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Whether the name is usable. Callers check this before committing.
    pub fn can_be_saved(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Writes the draft's fields onto `item`.
    ///
    /// The purchase date is copied first so that an on→off change in the
    /// draft still stamps `now_ms`. A missing name stays missing when the
    /// draft left it empty.
    pub(crate) fn apply_to(&self, item: &mut Item, now_ms: i64) {
        if !(self.name.is_empty() && item.name.is_none()) {
            item.name = Some(self.name.clone());
        }
        item.set_quantity(self.quantity);
        item.is_available = self.is_available;
        item.date_last_purchased = self.date_last_purchased;
        item.set_on_list(self.on_list, now_ms);
        item.location_id = self.location_id;
    }
}

#[cfg(test)]
mod tests {
    use super::ItemDraft;
    use crate::model::item::Item;
    use uuid::Uuid;

    #[test]
    fn new_draft_uses_hint_or_default_name() {
        let location = Uuid::new_v4();
        assert_eq!(ItemDraft::new(Some(" Milk "), location).name, "Milk");
        assert_eq!(ItemDraft::new(None, location).name, "New Item");
        assert_eq!(ItemDraft::new(Some("  "), location).name, "New Item");

        let draft = ItemDraft::new(None, location);
        assert!(draft.is_new());
        assert_eq!(draft.quantity, 1);
        assert!(draft.on_list && draft.is_available);
        assert!(draft.date_last_purchased.is_none());
    }

    #[test]
    fn blank_name_cannot_be_saved() {
        let mut draft = ItemDraft::new(None, Uuid::new_v4());
        assert!(draft.can_be_saved());
        draft.name = "   ".to_string();
        assert!(!draft.can_be_saved());
    }

    #[test]
    fn unchanged_draft_applies_back_identically() {
        let mut item = Item::new(Uuid::new_v4());
        item.name = None;
        item.set_quantity(4);
        item.set_on_list(false, 77);

        let before = item.clone();
        ItemDraft::from_item(&item).apply_to(&mut item, 999);
        assert_eq!(item, before);
    }

    #[test]
    fn unchecking_in_draft_stamps_purchase_date() {
        let mut item = Item::new(Uuid::new_v4());
        let mut draft = ItemDraft::from_item(&item);
        draft.on_list = false;
        draft.apply_to(&mut item, 1_234);
        assert_eq!(item.date_last_purchased, Some(1_234));
    }
}
