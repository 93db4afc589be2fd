//! UI-ready joins of items with their locations.

use crate::live::LiveCollections;
use crate::model::item::{Item, ItemId};
use crate::model::location::{
    Color, Location, LocationId, LOCATION_NAME_PLACEHOLDER, UNKNOWN_LOCATION_ORDER,
};

pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// An item joined with its location's display attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemView {
    pub id: ItemId,
    pub name: String,
    pub is_available: bool,
    pub on_list: bool,
    pub quantity: i64,
    pub date_last_purchased: Option<i64>,
    pub location_id: LocationId,
    pub location_name: String,
    pub visitation_order: i32,
    pub color: Color,
}

impl ItemView {
    /// Joins `item` with `location`; a missing location renders as unknown.
    pub fn build(item: &Item, location: Option<&Location>) -> Self {
        let (location_name, visitation_order, color) = match location {
            Some(location) => (
                location.display_name().to_string(),
                location.visitation_order,
                location.color(),
            ),
            None => (
                LOCATION_NAME_PLACEHOLDER.to_string(),
                UNKNOWN_LOCATION_ORDER,
                Color::UNKNOWN,
            ),
        };
        Self {
            id: item.id,
            name: item.display_name().to_string(),
            is_available: item.is_available,
            on_list: item.on_list,
            quantity: item.quantity(),
            date_last_purchased: item.date_last_purchased,
            location_id: item.location_id,
            location_name,
            visitation_order,
            color,
        }
    }
}

/// A location together with its live membership count.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationView {
    pub id: LocationId,
    pub name: String,
    pub visitation_order: i32,
    pub color: Color,
    pub item_count: usize,
    pub is_unknown_location: bool,
    /// `false` for views of locations that are not persisted yet.
    pub is_existing_location: bool,
}

impl LocationView {
    pub fn build(location: &Location, item_count: usize, is_existing_location: bool) -> Self {
        Self {
            id: location.id,
            name: location.display_name().to_string(),
            visitation_order: location.visitation_order,
            color: location.color(),
            item_count,
            is_unknown_location: location.is_unknown(),
            is_existing_location,
        }
    }
}

/// One location heading with the items listed under it.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSection {
    pub location: LocationView,
    pub items: Vec<ItemView>,
}

/// Off-list items split by how recently they were purchased.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurchaseHistory {
    pub recent: Vec<ItemView>,
    /// Purchased earlier than the window, or never purchased.
    pub older: Vec<ItemView>,
}

pub fn item_view(live: &LiveCollections, id: ItemId) -> Option<ItemView> {
    let item = live.item(id)?;
    Some(ItemView::build(item, live.location(item.location_id)))
}

/// Views for `items`, preserving their order.
pub fn item_views<'a>(
    live: &LiveCollections,
    items: impl IntoIterator<Item = &'a Item>,
) -> Vec<ItemView> {
    items
        .into_iter()
        .map(|item| ItemView::build(item, live.location(item.location_id)))
        .collect()
}

pub fn location_view(live: &LiveCollections, id: LocationId) -> Option<LocationView> {
    let location = live.location(id)?;
    Some(LocationView::build(
        location,
        live.items_at(id).count(),
        true,
    ))
}

/// Views for every location, in visitation order.
pub fn location_views(live: &LiveCollections) -> Vec<LocationView> {
    live.locations()
        .iter()
        .map(|location| LocationView::build(location, live.items_at(location.id).count(), true))
        .collect()
}

/// Items stored at `location_id`, in name order.
pub fn member_views(live: &LiveCollections, location_id: LocationId) -> Vec<ItemView> {
    item_views(live, live.items_at(location_id))
}

/// Groups items with the given `on_list` state under their locations.
///
/// Sections follow visitation order; empty sections are omitted.
pub fn list_sections(live: &LiveCollections, on_list: bool) -> Vec<LocationSection> {
    live.locations()
        .iter()
        .filter_map(|location| {
            let items = item_views(
                live,
                live.items_at(location.id)
                    .filter(|item| item.on_list == on_list),
            );
            if items.is_empty() {
                return None;
            }
            let count = live.items_at(location.id).count();
            Some(LocationSection {
                location: LocationView::build(location, count, true),
                items,
            })
        })
        .collect()
}

/// Splits off-list items at `now_ms - days`.
pub fn purchase_history(live: &LiveCollections, days: u32, now_ms: i64) -> PurchaseHistory {
    let cutoff = now_ms.saturating_sub(i64::from(days).saturating_mul(MS_PER_DAY));
    let mut history = PurchaseHistory::default();
    for item in live.items_off_list() {
        let view = ItemView::build(item, live.location(item.location_id));
        match item.date_last_purchased {
            Some(purchased_at) if purchased_at >= cutoff => history.recent.push(view),
            _ => history.older.push(view),
        }
    }
    history
}
