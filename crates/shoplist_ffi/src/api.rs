//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Own the open shopping list and its draft sessions for the UI thread.
//! - Buffer view signals until the UI drains them.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call runs on the thread that opened the list; state is kept in a
//!   thread-local slot.
//! - Identifiers cross the boundary as UUID strings.

use log::{info, warn};
use shoplist_core::seed::{export_dir, import_dir};
use shoplist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner,
    init_logging_from_config, ping as ping_inner, Color, CoreConfig, Draft, DraftSessions,
    ItemDraft, ItemView, LocationSection, LocationView, ResumeOutcome, ShoppingList,
    SignalFilter, ViewSignal,
};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use uuid::Uuid;

struct App {
    list: ShoppingList,
    sessions: DraftSessions,
    signals: Rc<RefCell<Vec<ViewSignal>>>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Id of the affected entity or session, when there is one.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            id: None,
            message: message.into(),
        }
    }

    fn success_with_id(message: impl Into<String>, id: Uuid) -> Self {
        Self {
            ok: true,
            id: Some(id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Item row as rendered by list screens.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemEntry {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub is_available: bool,
    pub on_list: bool,
    /// Unix epoch milliseconds; `None` when never purchased.
    pub date_last_purchased_ms: Option<i64>,
    pub location_id: String,
    pub location_name: String,
    pub visitation_order: i32,
    pub color: ColorValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationEntry {
    pub id: String,
    pub name: String,
    pub visitation_order: i32,
    pub item_count: u32,
    pub is_unknown_location: bool,
    pub color: ColorValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionEntry {
    pub location: LocationEntry,
    pub items: Vec<ItemEntry>,
}

/// RGBA channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorValue {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub opacity: f64,
}

/// Editable item fields sent back from the item editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraftInput {
    pub name: String,
    pub quantity: i64,
    pub is_available: bool,
    pub on_list: bool,
    pub location_id: String,
}

/// Editable location fields sent back from the location editor.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationDraftInput {
    pub name: String,
    pub visitation_order: i32,
    pub color: ColorValue,
}

/// A view signal flattened for polling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalEntry {
    /// `items_refreshed|locations_refreshed|item|location`.
    pub kind: String,
    pub id: Option<String>,
}

/// Opens the shopping list database and makes it current for this thread.
///
/// `db_path = None` resolves the path from `SHOPLIST_DB_PATH` (or the
/// temp-dir default). File logging starts when `SHOPLIST_LOG_DIR` is set.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Replaces a previously opened list after saving it.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn open_list(db_path: Option<String>) -> ActionResponse {
    let config = CoreConfig::from_env();
    if let Err(err) = init_logging_from_config(&config) {
        warn!("event=ffi_open module=ffi status=error reason=logging_init");
        return ActionResponse::failure(format!("open_list failed: {err}"));
    }
    let path = db_path
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .unwrap_or(config.db_path);

    let mut list = match ShoppingList::open(&path) {
        Ok(list) => list,
        Err(err) => return ActionResponse::failure(format!("open_list failed: {err}")),
    };
    let signals = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&signals);
    list.subscribe(SignalFilter::All, move |signal| {
        sink.borrow_mut().push(*signal);
    });

    let previous = APP.with(|slot| {
        slot.replace(Some(App {
            list,
            sessions: DraftSessions::new(),
            signals,
        }))
    });
    if let Some(mut previous) = previous {
        previous.list.save();
    }
    info!("event=ffi_open module=ffi status=ok");
    ActionResponse::success("List opened.")
}

/// Saves and closes the current list. Closing twice is not an error.
#[flutter_rust_bridge::frb(sync)]
pub fn close_list() -> ActionResponse {
    let closed = APP.with(|slot| slot.borrow_mut().take());
    match closed {
        Some(mut app) => match app.list.try_save() {
            Ok(()) => ActionResponse::success("List closed."),
            Err(err) => ActionResponse::failure(format!("close_list failed: {err}")),
        },
        None => ActionResponse::success("No list open."),
    }
}

/// Screen-appear hook; returns the Unknown Location id.
#[flutter_rust_bridge::frb(sync)]
pub fn on_appear() -> ActionResponse {
    respond("on_appear", |app| {
        let unknown = app.list.on_appear().map_err(|err| err.to_string())?;
        Ok(ActionResponse::success_with_id("Ready.", unknown.id))
    })
}

/// Screen-disappear hook; surfaces save failures instead of swallowing them.
#[flutter_rust_bridge::frb(sync)]
pub fn on_disappear() -> ActionResponse {
    respond("on_disappear", |app| {
        app.list.try_save().map_err(|err| err.to_string())?;
        Ok(ActionResponse::success("Saved."))
    })
}

/// Items sorted by name; `on_list = None` returns every item.
#[flutter_rust_bridge::frb(sync)]
pub fn list_items(on_list: Option<bool>) -> Vec<ItemEntry> {
    read_or_empty(|app| {
        let views = match on_list {
            Some(true) => app.list.items_on_list(),
            Some(false) => app.list.items_off_list(),
            None => app.list.item_views(),
        };
        views.iter().map(to_item_entry).collect()
    })
}

/// Locations in visitation order, Unknown Location last.
#[flutter_rust_bridge::frb(sync)]
pub fn list_locations() -> Vec<LocationEntry> {
    read_or_empty(|app| app.list.location_views().iter().map(to_location_entry).collect())
}

/// Items grouped by location for the shopping screen.
#[flutter_rust_bridge::frb(sync)]
pub fn list_sections(on_list: bool) -> Vec<SectionEntry> {
    read_or_empty(|app| {
        app.list
            .list_sections(on_list)
            .iter()
            .map(to_section_entry)
            .collect()
    })
}

/// Items at one location, sorted by name.
#[flutter_rust_bridge::frb(sync)]
pub fn list_location_items(location_id: String) -> Vec<ItemEntry> {
    read_or_empty(|app| match parse_id(&location_id, "location_id") {
        Ok(id) => app.list.members(id).iter().map(to_item_entry).collect(),
        Err(_) => Vec::new(),
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn toggle_on_list(item_id: String) -> ActionResponse {
    respond("toggle_on_list", |app| {
        let id = parse_id(&item_id, "item_id")?;
        match app.list.toggle_on_list(id).map_err(|err| err.to_string())? {
            Some(item) => Ok(ActionResponse::success_with_id(
                if item.on_list { "On list." } else { "Purchased." },
                item.id,
            )),
            None => Err(format!("item not found: {id}")),
        }
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn move_all_off_list() -> ActionResponse {
    respond("move_all_off_list", |app| {
        let moved = app.list.move_all_off_list().map_err(|err| err.to_string())?;
        app.list.save();
        Ok(ActionResponse::success(format!("Moved {moved} item(s) off the list.")))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn mark_all_available() -> ActionResponse {
    respond("mark_all_available", |app| {
        let marked = app.list.mark_all_available().map_err(|err| err.to_string())?;
        app.list.save();
        Ok(ActionResponse::success(format!("Marked {marked} item(s) available.")))
    })
}

/// Starts an item editing session.
///
/// `item_id = Some` edits an existing item; otherwise a new-item draft is
/// opened with `name_hint` at `location_id` (or the Unknown Location).
/// Returns the session id.
#[flutter_rust_bridge::frb(sync)]
pub fn begin_item_draft(
    item_id: Option<String>,
    name_hint: Option<String>,
    location_id: Option<String>,
) -> ActionResponse {
    respond("begin_item_draft", |app| {
        let draft = match item_id {
            Some(raw) => {
                let id = parse_id(&raw, "item_id")?;
                app.list
                    .checkout_item_draft(id)
                    .map_err(|err| err.to_string())?
                    .ok_or_else(|| format!("item not found: {id}"))?
            }
            None => {
                let location = location_id
                    .as_deref()
                    .map(|raw| parse_id(raw, "location_id"))
                    .transpose()?;
                app.list
                    .new_item_draft(name_hint.as_deref(), location)
                    .map_err(|err| err.to_string())?
            }
        };
        let session_id = app.sessions.begin(Draft::Item(draft));
        Ok(ActionResponse::success_with_id("Draft opened.", session_id))
    })
}

/// Starts a location editing session; `location_id = None` drafts a new one.
#[flutter_rust_bridge::frb(sync)]
pub fn begin_location_draft(location_id: Option<String>) -> ActionResponse {
    respond("begin_location_draft", |app| {
        let draft = match location_id {
            Some(raw) => {
                let id = parse_id(&raw, "location_id")?;
                app.list
                    .checkout_location_draft(id)
                    .map_err(|err| err.to_string())?
                    .ok_or_else(|| format!("location not found: {id}"))?
            }
            None => app.list.new_location_draft(),
        };
        let session_id = app.sessions.begin(Draft::Location(draft));
        Ok(ActionResponse::success_with_id("Draft opened.", session_id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn update_item_draft(session_id: String, input: ItemDraftInput) -> ActionResponse {
    respond("update_item_draft", |app| {
        let id = parse_id(&session_id, "session_id")?;
        let location_id = parse_id(&input.location_id, "location_id")?;
        let draft: &mut ItemDraft = app
            .sessions
            .item_draft_mut(id)
            .map_err(|err| err.to_string())?;
        draft.name = input.name;
        draft.quantity = input.quantity;
        draft.is_available = input.is_available;
        draft.on_list = input.on_list;
        draft.location_id = location_id;
        Ok(ActionResponse::success_with_id("Draft updated.", id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn update_location_draft(session_id: String, input: LocationDraftInput) -> ActionResponse {
    respond("update_location_draft", |app| {
        let id = parse_id(&session_id, "session_id")?;
        let draft = app
            .sessions
            .location_draft_mut(id)
            .map_err(|err| err.to_string())?;
        draft.name = input.name;
        draft.visitation_order = input.visitation_order;
        draft.color = Color::new(
            input.color.red,
            input.color.green,
            input.color.blue,
            input.color.opacity,
        );
        Ok(ActionResponse::success_with_id("Draft updated.", id))
    })
}

/// Re-checks a session when its editor reappears.
///
/// `ok = false` with message `abandoned` means the edited entity was
/// deleted meanwhile and the editor should close.
#[flutter_rust_bridge::frb(sync)]
pub fn resume_draft(session_id: String) -> ActionResponse {
    respond("resume_draft", |app| {
        let id = parse_id(&session_id, "session_id")?;
        match app
            .sessions
            .resume(id, &app.list)
            .map_err(|err| err.to_string())?
        {
            ResumeOutcome::Active => Ok(ActionResponse::success_with_id("active", id)),
            ResumeOutcome::Abandoned => Ok(ActionResponse {
                ok: false,
                id: Some(id.to_string()),
                message: "abandoned".to_string(),
            }),
        }
    })
}

/// Commits a session's draft; blank names are refused before touching the store.
///
/// Returns the id of the created or updated entity.
#[flutter_rust_bridge::frb(sync)]
pub fn commit_draft(session_id: String) -> ActionResponse {
    respond("commit_draft", |app| {
        let id = parse_id(&session_id, "session_id")?;
        let can_be_saved = app
            .sessions
            .draft(id)
            .map(Draft::can_be_saved)
            .ok_or_else(|| format!("draft session not open: {id}"))?;
        if !can_be_saved {
            return Err("name cannot be blank".to_string());
        }
        let entity_id = app
            .sessions
            .commit(id, &mut app.list)
            .map_err(|err| err.to_string())?;
        app.sessions.dispose(id);
        Ok(ActionResponse::success_with_id("Saved.", entity_id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn cancel_draft(session_id: String) -> ActionResponse {
    respond("cancel_draft", |app| {
        let id = parse_id(&session_id, "session_id")?;
        app.sessions.cancel(id).map_err(|err| err.to_string())?;
        app.sessions.dispose(id);
        Ok(ActionResponse::success("Draft discarded."))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_item(item_id: String) -> ActionResponse {
    respond("delete_item", |app| {
        let id = parse_id(&item_id, "item_id")?;
        let deleted = app.list.delete_item(id).map_err(|err| err.to_string())?;
        app.list.save();
        Ok(deleted_response(deleted, id))
    })
}

/// Deletes a location, moving its items to the Unknown Location.
///
/// Deleting the Unknown Location reports `ok = true` with nothing deleted.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_location(location_id: String) -> ActionResponse {
    respond("delete_location", |app| {
        let id = parse_id(&location_id, "location_id")?;
        let deleted = app.list.delete_location(id).map_err(|err| err.to_string())?;
        app.list.save();
        Ok(deleted_response(deleted, id))
    })
}

/// Imports `locations.json` and `items.json` from `dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn import_seed(dir: String) -> ActionResponse {
    respond("import_seed", |app| {
        let summary = import_dir(&mut app.list, dir.trim()).map_err(|err| err.to_string())?;
        Ok(ActionResponse::success(format!(
            "Imported {} location(s) and {} item(s); {} without a matching location.",
            summary.locations_created, summary.items_created, summary.items_unmatched
        )))
    })
}

/// Writes `locations.json` and `items.json` into `dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn export_seed(dir: String) -> ActionResponse {
    respond("export_seed", |app| {
        export_dir(&app.list, dir.trim()).map_err(|err| err.to_string())?;
        Ok(ActionResponse::success("Exported."))
    })
}

/// Returns and clears the view signals published since the last drain.
#[flutter_rust_bridge::frb(sync)]
pub fn drain_signals() -> Vec<SignalEntry> {
    read_or_empty(|app| {
        app.signals
            .borrow_mut()
            .drain(..)
            .map(to_signal_entry)
            .collect()
    })
}

fn respond(
    operation: &str,
    f: impl FnOnce(&mut App) -> Result<ActionResponse, String>,
) -> ActionResponse {
    APP.with(|slot| {
        let mut slot = slot.borrow_mut();
        let Some(app) = slot.as_mut() else {
            return ActionResponse::failure(format!("{operation} failed: no list is open"));
        };
        match f(app) {
            Ok(response) => response,
            Err(err) => {
                warn!("event=ffi_call module=ffi status=error operation={operation}");
                ActionResponse::failure(format!("{operation} failed: {err}"))
            }
        }
    })
}

fn read_or_empty<T>(f: impl FnOnce(&App) -> Vec<T>) -> Vec<T> {
    APP.with(|slot| slot.borrow().as_ref().map(f).unwrap_or_default())
}

fn parse_id(raw: &str, field: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("{field} is not a valid id: `{raw}`"))
}

fn deleted_response(deleted: bool, id: Uuid) -> ActionResponse {
    if deleted {
        ActionResponse::success_with_id("Deleted.", id)
    } else {
        ActionResponse::success_with_id("Nothing deleted.", id)
    }
}

fn to_color_value(color: Color) -> ColorValue {
    ColorValue {
        red: color.red,
        green: color.green,
        blue: color.blue,
        opacity: color.opacity,
    }
}

fn to_item_entry(view: &ItemView) -> ItemEntry {
    ItemEntry {
        id: view.id.to_string(),
        name: view.name.clone(),
        quantity: view.quantity,
        is_available: view.is_available,
        on_list: view.on_list,
        date_last_purchased_ms: view.date_last_purchased,
        location_id: view.location_id.to_string(),
        location_name: view.location_name.clone(),
        visitation_order: view.visitation_order,
        color: to_color_value(view.color),
    }
}

fn to_location_entry(view: &LocationView) -> LocationEntry {
    LocationEntry {
        id: view.id.to_string(),
        name: view.name.clone(),
        visitation_order: view.visitation_order,
        item_count: u32::try_from(view.item_count).unwrap_or(u32::MAX),
        is_unknown_location: view.is_unknown_location,
        color: to_color_value(view.color),
    }
}

fn to_section_entry(section: &LocationSection) -> SectionEntry {
    SectionEntry {
        location: to_location_entry(&section.location),
        items: section.items.iter().map(to_item_entry).collect(),
    }
}

fn to_signal_entry(signal: ViewSignal) -> SignalEntry {
    let (kind, id) = match signal {
        ViewSignal::ItemsRefreshed => ("items_refreshed", None),
        ViewSignal::LocationsRefreshed => ("locations_refreshed", None),
        ViewSignal::Item(id) => ("item", Some(id.to_string())),
        ViewSignal::Location(id) => ("location", Some(id.to_string())),
    };
    SignalEntry {
        kind: kind.to_string(),
        id,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        begin_item_draft, begin_location_draft, close_list, commit_draft, core_version,
        delete_location, drain_signals, export_seed, import_seed, init_logging, list_items,
        list_locations, list_sections, on_appear, open_list, ping, resume_draft,
        toggle_on_list, update_item_draft, update_location_draft, ColorValue, ItemDraftInput,
        LocationDraftInput,
    };

    fn open_temp() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.db");
        let response = open_list(Some(path.to_str().unwrap().to_string()));
        assert!(response.ok, "{}", response.message);
        dir
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn calls_without_open_list_fail_softly() {
        close_list();
        assert!(!on_appear().ok);
        assert!(list_items(None).is_empty());
        assert!(drain_signals().is_empty());
    }

    #[test]
    fn item_draft_flow_creates_and_signals() {
        let _dir = open_temp();
        let unknown_id = on_appear().id.unwrap();
        drain_signals();

        let session = begin_item_draft(None, Some("Milk".to_string()), None);
        assert!(session.ok, "{}", session.message);
        let session_id = session.id.unwrap();

        let updated = update_item_draft(
            session_id.clone(),
            ItemDraftInput {
                name: "Milk".to_string(),
                quantity: 2,
                is_available: true,
                on_list: true,
                location_id: unknown_id.clone(),
            },
        );
        assert!(updated.ok, "{}", updated.message);

        let committed = commit_draft(session_id.clone());
        assert!(committed.ok, "{}", committed.message);
        let item_id = committed.id.unwrap();

        let items = list_items(Some(true));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, item_id);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].location_id, unknown_id);

        let signals = drain_signals();
        assert!(signals.iter().any(|signal| signal.kind == "items_refreshed"));
        assert!(drain_signals().is_empty());

        assert!(!commit_draft(session_id).ok);
        close_list();
    }

    #[test]
    fn blank_draft_name_is_refused() {
        let _dir = open_temp();
        let session_id = begin_location_draft(None).id.unwrap();
        update_location_draft(
            session_id.clone(),
            LocationDraftInput {
                name: "   ".to_string(),
                visitation_order: 10,
                color: ColorValue {
                    red: 0.1,
                    green: 0.2,
                    blue: 0.3,
                    opacity: 1.0,
                },
            },
        );
        let response = commit_draft(session_id);
        assert!(!response.ok);
        assert!(response.message.contains("blank"));
        assert!(list_locations().is_empty());
        close_list();
    }

    #[test]
    fn deleted_location_abandons_its_draft() {
        let _dir = open_temp();
        on_appear();
        let location_session = begin_location_draft(None).id.unwrap();
        let location_id = commit_draft(location_session).id.unwrap();

        let editing = begin_location_draft(Some(location_id.clone())).id.unwrap();
        assert!(resume_draft(editing.clone()).ok);
        assert!(delete_location(location_id).ok);

        let resumed = resume_draft(editing);
        assert!(!resumed.ok);
        assert_eq!(resumed.message, "abandoned");
        close_list();
    }

    #[test]
    fn toggle_and_sections_follow_list_state() {
        let _dir = open_temp();
        on_appear();
        let session_id = begin_item_draft(None, Some("Bread".to_string()), None)
            .id
            .unwrap();
        let item_id = commit_draft(session_id).id.unwrap();

        assert_eq!(list_sections(true).len(), 1);
        let toggled = toggle_on_list(item_id);
        assert!(toggled.ok, "{}", toggled.message);
        assert!(list_sections(true).is_empty());
        assert!(list_items(Some(false))[0].date_last_purchased_ms.is_some());
        close_list();
    }

    #[test]
    fn export_then_import_through_ffi() {
        let export_dir = tempfile::tempdir().unwrap();
        {
            let _dir = open_temp();
            on_appear();
            let session_id = begin_item_draft(None, Some("Eggs".to_string()), None)
                .id
                .unwrap();
            commit_draft(session_id);
            let exported = export_seed(export_dir.path().to_str().unwrap().to_string());
            assert!(exported.ok, "{}", exported.message);
            close_list();
        }

        let _dir = open_temp();
        let imported = import_seed(export_dir.path().to_str().unwrap().to_string());
        assert!(imported.ok, "{}", imported.message);
        assert_eq!(list_items(None)[0].name, "Eggs");
        close_list();
    }
}
