//! Item repository contract and SQLite implementation.
//!
//! # Invariants
//! - Lists are ordered by name (case-insensitive, missing names first), then id.
//! - Quantities read back are clamped into the storable range.

use crate::model::item::{Item, ItemId};
use crate::model::location::LocationId;
use crate::repo::{bool_to_int, ensure_connection_ready, parse_bool, parse_uuid, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const ITEM_SELECT_SQL: &str = "SELECT
    id,
    name,
    quantity,
    is_available,
    on_list,
    date_last_purchased,
    location_id
FROM items";

/// Predicate for listing and counting items. `None` fields do not filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub on_list: Option<bool>,
    pub is_available: Option<bool>,
    pub location_id: Option<LocationId>,
}

impl ItemFilter {
    pub fn on_list(on_list: bool) -> Self {
        Self {
            on_list: Some(on_list),
            ..Self::default()
        }
    }

    pub fn at_location(location_id: LocationId) -> Self {
        Self {
            location_id: Some(location_id),
            ..Self::default()
        }
    }

    fn where_clause(&self) -> (String, Vec<Value>) {
        let mut sql = String::from(" WHERE 1 = 1");
        let mut bind_values = Vec::new();
        if let Some(on_list) = self.on_list {
            sql.push_str(" AND on_list = ?");
            bind_values.push(Value::Integer(bool_to_int(on_list)));
        }
        if let Some(is_available) = self.is_available {
            sql.push_str(" AND is_available = ?");
            bind_values.push(Value::Integer(bool_to_int(is_available)));
        }
        if let Some(location_id) = self.location_id {
            sql.push_str(" AND location_id = ?");
            bind_values.push(Value::Text(location_id.to_string()));
        }
        (sql, bind_values)
    }
}

/// Repository interface for item rows.
pub trait ItemRepository {
    fn insert_item(&self, item: &Item) -> RepoResult<()>;
    /// Returns `false` when no row has `item.id`.
    fn update_item(&self, item: &Item) -> RepoResult<bool>;
    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>>;
    fn list_items(&self, filter: &ItemFilter) -> RepoResult<Vec<Item>>;
    fn count_items(&self, filter: &ItemFilter) -> RepoResult<u64>;
    /// Returns `false` when no row has `id`.
    fn delete_item(&self, id: ItemId) -> RepoResult<bool>;
    /// Points every item of `from` at `to`; returns the moved ids.
    fn reassign_location(&self, from: LocationId, to: LocationId) -> RepoResult<Vec<ItemId>>;
}

/// SQLite-backed item repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
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

impl ItemRepository for SqliteItemRepository<'_> {
    fn insert_item(&self, item: &Item) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO items (
                id,
                name,
                quantity,
                is_available,
                on_list,
                date_last_purchased,
                location_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                item.id.to_string(),
                item.name.as_deref(),
                item.quantity(),
                bool_to_int(item.is_available),
                bool_to_int(item.on_list),
                item.date_last_purchased,
                item.location_id.to_string(),
            ],
        )?;
        Ok(())
    }

    fn update_item(&self, item: &Item) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE items
             SET
                name = ?1,
                quantity = ?2,
                is_available = ?3,
                on_list = ?4,
                date_last_purchased = ?5,
                location_id = ?6
             WHERE id = ?7;",
            params![
                item.name.as_deref(),
                item.quantity(),
                bool_to_int(item.is_available),
                bool_to_int(item.on_list),
                item.date_last_purchased,
                item.location_id.to_string(),
                item.id.to_string(),
            ],
        )?;
        Ok(changed > 0)
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_item_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_items(&self, filter: &ItemFilter) -> RepoResult<Vec<Item>> {
        let (where_sql, bind_values) = filter.where_clause();
        let sql = format!(
            "{ITEM_SELECT_SQL}{where_sql}
             ORDER BY COALESCE(name, '') COLLATE NOCASE ASC, id ASC;"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }
        Ok(items)
    }

    fn count_items(&self, filter: &ItemFilter) -> RepoResult<u64> {
        let (where_sql, bind_values) = filter.where_clause();
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM items{where_sql};"),
            params_from_iter(bind_values),
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }

    fn delete_item(&self, id: ItemId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM items WHERE id = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }

    fn reassign_location(&self, from: LocationId, to: LocationId) -> RepoResult<Vec<ItemId>> {
        let moved = self
            .list_items(&ItemFilter::at_location(from))?
            .into_iter()
            .map(|item| item.id)
            .collect::<Vec<_>>();
        if moved.is_empty() {
            return Ok(moved);
        }

        self.conn.execute(
            "UPDATE items SET location_id = ?1 WHERE location_id = ?2;",
            params![to.to_string(), from.to_string()],
        )?;
        Ok(moved)
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let id_text: String = row.get("id")?;
    let location_text: String = row.get("location_id")?;
    let mut item = Item::with_id(
        parse_uuid(&id_text, "items.id")?,
        parse_uuid(&location_text, "items.location_id")?,
    );
    item.name = row.get("name")?;
    item.set_quantity(row.get("quantity")?);
    item.is_available = parse_bool(row.get("is_available")?, "items.is_available")?;
    item.on_list = parse_bool(row.get("on_list")?, "items.on_list")?;
    item.date_last_purchased = row.get("date_last_purchased")?;
    Ok(item)
}
