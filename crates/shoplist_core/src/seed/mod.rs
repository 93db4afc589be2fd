//! Seed data import and backup export.
//!
//! # Responsibility
//! - Bulk-populate an empty store from `locations.json` / `items.json`.
//! - Export the current store in the same JSON shape.
//!
//! # Invariants
//! - Items resolve `locationName` by exact match; unmatched names land in
//!   the Unknown Location.
//! - The Unknown Location is never exported as a record.

use crate::repo::RepoError;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod export;
mod import;

pub use export::{export_dir, export_items, export_json, export_locations, SeedJson};
pub use import::{import_dir, import_json, import_records, parse_items, parse_locations};

pub const LOCATIONS_FILE_NAME: &str = "locations.json";
pub const ITEMS_FILE_NAME: &str = "items.json";

/// One location in seed/export JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub name: String,
    pub visitation_order: i32,
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub opacity: f64,
}

/// One item in seed/export JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub name: String,
    pub quantity: i64,
    pub on_list: bool,
    pub is_available: bool,
    pub location_name: String,
}

/// Counts reported by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub locations_created: usize,
    pub items_created: usize,
    /// Items whose `locationName` matched nothing.
    pub items_unmatched: usize,
}

#[derive(Debug)]
pub enum SeedError {
    Json(serde_json::Error),
    Io { path: PathBuf, source: std::io::Error },
    Repo(RepoError),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid seed json: {err}"),
            Self::Io { path, source } => write!(f, "seed file `{}`: {source}", path.display()),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<RepoError> for SeedError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}
