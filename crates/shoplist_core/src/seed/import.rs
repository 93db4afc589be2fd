//! Seed import from JSON strings or a seed directory.

use super::{
    ImportSummary, ItemRecord, LocationRecord, SeedError, ITEMS_FILE_NAME, LOCATIONS_FILE_NAME,
};
use crate::model::item::Item;
use crate::model::location::{
    clamp_user_order, Color, Location, LocationId, UNKNOWN_LOCATION_ORDER,
};
use crate::service::ShoppingList;
use log::info;
use std::collections::HashMap;
use std::path::Path;

pub fn parse_locations(json: &str) -> Result<Vec<LocationRecord>, SeedError> {
    Ok(serde_json::from_str(json)?)
}

pub fn parse_items(json: &str) -> Result<Vec<ItemRecord>, SeedError> {
    Ok(serde_json::from_str(json)?)
}

/// Inserts `locations`, then `items`, and saves.
///
/// Item location names resolve only against locations created by this
/// import (first one wins on duplicates); anything else lands in the
/// Unknown Location. A location record carrying the reserved order is folded
/// into the Unknown Location.
pub fn import_records(
    list: &mut ShoppingList,
    locations: &[LocationRecord],
    items: &[ItemRecord],
) -> Result<ImportSummary, SeedError> {
    let summary = list.with_store(|store| {
        let unknown_id = store.unknown_location_id()?;
        let mut summary = ImportSummary::default();
        let mut by_name: HashMap<String, LocationId> = HashMap::new();

        for record in locations {
            if record.visitation_order == UNKNOWN_LOCATION_ORDER {
                by_name.entry(record.name.clone()).or_insert(unknown_id);
                continue;
            }
            let mut location =
                Location::new(record.name.clone(), clamp_user_order(record.visitation_order));
            location.set_color(Color::new(
                record.red,
                record.green,
                record.blue,
                record.opacity,
            ));
            let location = store.insert_location(&location)?;
            by_name.entry(record.name.clone()).or_insert(location.id);
            summary.locations_created += 1;
        }

        for record in items {
            let location_id = match by_name.get(&record.location_name) {
                Some(id) => *id,
                None => {
                    summary.items_unmatched += 1;
                    unknown_id
                }
            };
            let mut item = Item::new(location_id);
            item.name = Some(record.name.clone());
            item.set_quantity(record.quantity);
            item.on_list = record.on_list;
            item.is_available = record.is_available;
            store.insert_item(&item)?;
            summary.items_created += 1;
        }
        Ok(summary)
    })?;
    list.try_save()?;

    info!(
        "event=seed_import module=seed status=ok locations={} items={} unmatched={}",
        summary.locations_created, summary.items_created, summary.items_unmatched
    );
    Ok(summary)
}

/// Parses both JSON arrays before touching the store.
pub fn import_json(
    list: &mut ShoppingList,
    locations_json: &str,
    items_json: &str,
) -> Result<ImportSummary, SeedError> {
    let locations = parse_locations(locations_json)?;
    let items = parse_items(items_json)?;
    import_records(list, &locations, &items)
}

/// Imports `locations.json` and `items.json` from `dir`.
pub fn import_dir(
    list: &mut ShoppingList,
    dir: impl AsRef<Path>,
) -> Result<ImportSummary, SeedError> {
    let dir = dir.as_ref();
    let locations_json = read_file(&dir.join(LOCATIONS_FILE_NAME))?;
    let items_json = read_file(&dir.join(ITEMS_FILE_NAME))?;
    import_json(list, &locations_json, &items_json)
}

fn read_file(path: &Path) -> Result<String, SeedError> {
    std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{import_json, import_records};
    use crate::model::location::{Location, UNKNOWN_LOCATION_ORDER};
    use crate::seed::{ItemRecord, LocationRecord, SeedError};
    use crate::service::ShoppingList;

    fn location(name: &str, order: i32) -> LocationRecord {
        LocationRecord {
            name: name.to_string(),
            visitation_order: order,
            red: 0.1,
            green: 0.2,
            blue: 0.3,
            opacity: 1.0,
        }
    }

    fn item(name: &str, location_name: &str) -> ItemRecord {
        ItemRecord {
            name: name.to_string(),
            quantity: 1,
            on_list: true,
            is_available: true,
            location_name: location_name.to_string(),
        }
    }

    #[test]
    fn duplicate_location_names_resolve_to_first_inserted() {
        let mut list = ShoppingList::open_in_memory().unwrap();
        let summary = import_records(
            &mut list,
            &[location("Deli", 4), location("Deli", 9)],
            &[item("Ham", "Deli")],
        )
        .unwrap();
        assert_eq!(summary.locations_created, 2);

        let ham = &list.item_views()[0];
        assert_eq!(ham.visitation_order, 4);
    }

    #[test]
    fn reserved_order_record_maps_to_unknown_location() {
        let mut list = ShoppingList::open_in_memory().unwrap();
        let summary = import_records(
            &mut list,
            &[location("Unknown Location", UNKNOWN_LOCATION_ORDER)],
            &[item("Mystery", "Unknown Location")],
        )
        .unwrap();
        assert_eq!(summary.locations_created, 0);
        assert_eq!(summary.items_unmatched, 0);

        let unknown = list.unknown_location().unwrap();
        assert_eq!(list.members(unknown.id).len(), 1);
        assert_eq!(list.location_views().len(), 1);
    }

    #[test]
    fn locations_already_in_store_are_not_matched() {
        let mut list = ShoppingList::open_in_memory().unwrap();
        let dairy = list.insert_location(&Location::new("Dairy", 2)).unwrap();

        let summary = import_records(&mut list, &[], &[item("Milk", "Dairy")]).unwrap();
        assert_eq!(summary.items_unmatched, 1);

        let unknown = list.unknown_location().unwrap();
        assert_eq!(list.members(unknown.id).len(), 1);
        assert!(list.members(dairy.id).is_empty());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut list = ShoppingList::open_in_memory().unwrap();
        let mut record = location("Far", 400);
        record.red = 3.0;
        let mut big = item("Rice", "Far");
        big.quantity = 100_000;
        import_records(&mut list, &[record], &[big]).unwrap();

        let rice = &list.item_views()[0];
        assert_eq!(rice.quantity, 32767);
        assert_eq!(rice.visitation_order, 100);
        assert_eq!(rice.color.red, 1.0);
    }

    #[test]
    fn malformed_items_abort_before_any_insert() {
        let mut list = ShoppingList::open_in_memory().unwrap();
        let err = import_json(&mut list, "[]", "{not json").unwrap_err();
        assert!(matches!(err, SeedError::Json(_)));
        assert!(list.item_views().is_empty());
    }
}
