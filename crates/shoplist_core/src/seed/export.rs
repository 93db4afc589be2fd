//! Backup export to JSON strings or a seed directory.

use super::{ItemRecord, LocationRecord, SeedError, ITEMS_FILE_NAME, LOCATIONS_FILE_NAME};
use crate::repo::item_repo::ItemFilter;
use crate::repo::location_repo::LocationFilter;
use crate::repo::RepoResult;
use crate::service::ShoppingList;
use log::info;
use std::collections::HashMap;
use std::path::Path;

/// Pretty-printed export documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedJson {
    pub locations: String,
    pub items: String,
}

/// Every user location, in visitation order.
pub fn export_locations(list: &ShoppingList) -> RepoResult<Vec<LocationRecord>> {
    let filter = LocationFilter {
        exclude_unknown: true,
    };
    Ok(list
        .all_locations(&filter)?
        .into_iter()
        .map(|location| LocationRecord {
            name: location.name.clone().unwrap_or_default(),
            visitation_order: location.visitation_order,
            red: location.red,
            green: location.green,
            blue: location.blue,
            opacity: location.opacity,
        })
        .collect())
}

/// Every item, in name order. Items at the Unknown Location export its name,
/// which matches nothing on re-import.
pub fn export_items(list: &ShoppingList) -> RepoResult<Vec<ItemRecord>> {
    let names: HashMap<_, _> = list
        .all_locations(&LocationFilter::default())?
        .into_iter()
        .map(|location| (location.id, location.name.unwrap_or_default()))
        .collect();
    Ok(list
        .all_items(&ItemFilter::default())?
        .into_iter()
        .map(|item| ItemRecord {
            quantity: item.quantity(),
            location_name: names.get(&item.location_id).cloned().unwrap_or_default(),
            name: item.name.unwrap_or_default(),
            on_list: item.on_list,
            is_available: item.is_available,
        })
        .collect())
}

pub fn export_json(list: &ShoppingList) -> Result<SeedJson, SeedError> {
    Ok(SeedJson {
        locations: serde_json::to_string_pretty(&export_locations(list)?)?,
        items: serde_json::to_string_pretty(&export_items(list)?)?,
    })
}

/// Writes `locations.json` and `items.json` into `dir`, creating it if needed.
pub fn export_dir(list: &ShoppingList, dir: impl AsRef<Path>) -> Result<(), SeedError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|source| SeedError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let json = export_json(list)?;
    let files = [
        (LOCATIONS_FILE_NAME, &json.locations),
        (ITEMS_FILE_NAME, &json.items),
    ];
    for (file_name, body) in files {
        let path = dir.join(file_name);
        std::fs::write(&path, body).map_err(|source| SeedError::Io { path, source })?;
    }
    info!("event=seed_export module=seed status=ok dir={}", dir.display());
    Ok(())
}
