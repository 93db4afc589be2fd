//! Location repository contract and SQLite implementation.
//!
//! # Invariants
//! - Lists are ordered by `visitation_order ASC`, ties broken by name, then id.
//! - The Unknown Location is found by its reserved order, never by name.

use crate::model::location::{Location, LocationId, UNKNOWN_LOCATION_ORDER};
use crate::repo::{ensure_connection_ready, parse_uuid, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const LOCATION_SELECT_SQL: &str = "SELECT
    id,
    name,
    visitation_order,
    red,
    green,
    blue,
    opacity
FROM locations";

/// Query options for listing and counting locations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocationFilter {
    /// Leave the Unknown Location out of the result.
    pub exclude_unknown: bool,
}

/// Repository interface for location rows.
pub trait LocationRepository {
    fn insert_location(&self, location: &Location) -> RepoResult<()>;
    /// Returns `false` when no row has `location.id`.
    fn update_location(&self, location: &Location) -> RepoResult<bool>;
    fn get_location(&self, id: LocationId) -> RepoResult<Option<Location>>;
    fn find_by_order(&self, visitation_order: i32) -> RepoResult<Option<Location>>;
    fn list_locations(&self, filter: &LocationFilter) -> RepoResult<Vec<Location>>;
    fn count_locations(&self, filter: &LocationFilter) -> RepoResult<u64>;
    /// Returns `false` when no row has `id`.
    fn delete_location(&self, id: LocationId) -> RepoResult<bool>;
}

/// SQLite-backed location repository.
pub struct SqliteLocationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLocationRepository<'conn> {
    /// Wraps a connection already verified by the entity store.
    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps a connection after checking schema readiness.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl LocationRepository for SqliteLocationRepository<'_> {
    fn insert_location(&self, location: &Location) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO locations (
                id,
                name,
                visitation_order,
                red,
                green,
                blue,
                opacity
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                location.id.to_string(),
                location.name.as_deref(),
                location.visitation_order,
                location.red,
                location.green,
                location.blue,
                location.opacity,
            ],
        )?;
        Ok(())
    }

    fn update_location(&self, location: &Location) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE locations
             SET
                name = ?1,
                visitation_order = ?2,
                red = ?3,
                green = ?4,
                blue = ?5,
                opacity = ?6
             WHERE id = ?7;",
            params![
                location.name.as_deref(),
                location.visitation_order,
                location.red,
                location.green,
                location.blue,
                location.opacity,
                location.id.to_string(),
            ],
        )?;
        Ok(changed > 0)
    }

    fn get_location(&self, id: LocationId) -> RepoResult<Option<Location>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LOCATION_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_location_row(row)?)),
            None => Ok(None),
        }
    }

    fn find_by_order(&self, visitation_order: i32) -> RepoResult<Option<Location>> {
        let id_text: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM locations
                 WHERE visitation_order = ?1
                 ORDER BY id ASC
                 LIMIT 1;",
                [visitation_order],
                |row| row.get(0),
            )
            .optional()?;
        match id_text {
            Some(text) => self.get_location(parse_uuid(&text, "locations.id")?),
            None => Ok(None),
        }
    }

    fn list_locations(&self, filter: &LocationFilter) -> RepoResult<Vec<Location>> {
        let mut stmt = self.conn.prepare(&format!(
            "{LOCATION_SELECT_SQL}
             WHERE (?1 = 0 OR visitation_order <> ?2)
             ORDER BY visitation_order ASC, COALESCE(name, '') COLLATE NOCASE ASC, id ASC;"
        ))?;
        let mut rows = stmt.query(params![
            i64::from(filter.exclude_unknown),
            UNKNOWN_LOCATION_ORDER
        ])?;
        let mut locations = Vec::new();
        while let Some(row) = rows.next()? {
            locations.push(parse_location_row(row)?);
        }
        Ok(locations)
    }

    fn count_locations(&self, filter: &LocationFilter) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM locations WHERE (?1 = 0 OR visitation_order <> ?2);",
            params![i64::from(filter.exclude_unknown), UNKNOWN_LOCATION_ORDER],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }

    fn delete_location(&self, id: LocationId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM locations WHERE id = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }
}

fn parse_location_row(row: &Row<'_>) -> RepoResult<Location> {
    let id_text: String = row.get("id")?;
    Ok(Location {
        id: parse_uuid(&id_text, "locations.id")?,
        name: row.get("name")?,
        visitation_order: row.get("visitation_order")?,
        red: row.get("red")?,
        green: row.get("green")?,
        blue: row.get("blue")?,
        opacity: row.get("opacity")?,
    })
}
