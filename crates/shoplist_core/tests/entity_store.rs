use shoplist_core::{
    EntityKind, ChangeKind, EntityStore, Item, ItemFilter, Location, LocationFilter,
    UNKNOWN_LOCATION_NAME, UNKNOWN_LOCATION_ORDER,
};
use uuid::Uuid;

fn store() -> EntityStore {
    EntityStore::open_in_memory().unwrap()
}

fn sentinel_rows(store: &EntityStore) -> i64 {
    store
        .connection()
        .query_row(
            "SELECT COUNT(*) FROM locations WHERE visitation_order = ?1;",
            [UNKNOWN_LOCATION_ORDER],
            |row| row.get(0),
        )
        .unwrap()
}

#[test]
fn unknown_location_resolution_is_stable() {
    let mut store = store();
    let first = store.unknown_location().unwrap();
    let second = store.unknown_location().unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.visitation_order, UNKNOWN_LOCATION_ORDER);
    assert_eq!(first.name.as_deref(), Some(UNKNOWN_LOCATION_NAME));
    assert_eq!(sentinel_rows(&store), 1);
}

#[test]
fn unknown_location_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.db");

    let first_id = {
        let mut store = EntityStore::open(&path).unwrap();
        let id = store.unknown_location().unwrap().id;
        store.try_save().unwrap();
        id
    };

    let mut reopened = EntityStore::open(&path).unwrap();
    assert_eq!(reopened.unknown_location().unwrap().id, first_id);
    assert_eq!(sentinel_rows(&reopened), 1);
    assert!(!reopened.has_changes());
}

#[test]
fn user_locations_never_acquire_sentinel_order() {
    let mut store = store();
    let unknown = store.unknown_location().unwrap();

    let impostor = store
        .insert_location(&Location::new("Impostor", UNKNOWN_LOCATION_ORDER))
        .unwrap();
    assert_ne!(impostor.visitation_order, UNKNOWN_LOCATION_ORDER);

    let mut renumbered = store.create_location().unwrap();
    renumbered.visitation_order = UNKNOWN_LOCATION_ORDER;
    store.update_location(&renumbered).unwrap();

    let mut moved_unknown = unknown.clone();
    moved_unknown.visitation_order = 5;
    store.update_location(&moved_unknown).unwrap();

    assert_eq!(sentinel_rows(&store), 1);
    assert_eq!(
        store.find_location(unknown.id).unwrap().unwrap().visitation_order,
        UNKNOWN_LOCATION_ORDER
    );
}

#[test]
fn deleting_unknown_location_is_a_no_op() {
    let mut store = store();
    let unknown = store.unknown_location().unwrap();
    store.create_location().unwrap();
    let before = store.count_locations(&LocationFilter::default()).unwrap();
    store.take_events();

    assert!(!store.delete_location(unknown.id).unwrap());

    assert_eq!(store.count_locations(&LocationFilter::default()).unwrap(), before);
    assert!(store.take_events().is_empty());
    assert_eq!(store.unknown_location().unwrap().id, unknown.id);
}

#[test]
fn deleting_location_reassigns_its_items() {
    let mut store = store();
    let unknown = store.unknown_location().unwrap();
    let deli = store.insert_location(&Location::new("Deli", 3)).unwrap();
    let bystander = store.insert_location(&Location::new("Bakery", 4)).unwrap();

    let mut moved = Vec::new();
    for _ in 0..3 {
        moved.push(store.insert_item(&Item::new(deli.id)).unwrap().id);
    }
    let untouched = store.insert_item(&Item::new(bystander.id)).unwrap();
    store.take_events();

    assert!(store.delete_location(deli.id).unwrap());

    for id in &moved {
        assert_eq!(store.find_item(*id).unwrap().unwrap().location_id, unknown.id);
    }
    assert_eq!(
        store.find_item(untouched.id).unwrap().unwrap().location_id,
        bystander.id
    );
    assert!(store
        .all_locations(&LocationFilter::default())
        .unwrap()
        .iter()
        .all(|location| location.id != deli.id));

    let events = store.take_events();
    assert_eq!(events.len(), 4);
    assert!(events[..3]
        .iter()
        .all(|event| event.entity == EntityKind::Item && event.kind == ChangeKind::Updated));
    assert_eq!(events[3].entity, EntityKind::Location);
    assert_eq!(events[3].kind, ChangeKind::Deleted);
}

#[test]
fn dangling_location_reference_falls_back_to_unknown() {
    let mut store = store();
    let item = store.insert_item(&Item::new(Uuid::new_v4())).unwrap();
    let unknown = store.unknown_location().unwrap();
    assert_eq!(item.location_id, unknown.id);

    let mut edited = item.clone();
    edited.location_id = Uuid::new_v4();
    store.update_item(&edited).unwrap();
    assert_eq!(store.find_item(item.id).unwrap().unwrap().location_id, unknown.id);
}

#[test]
fn save_clears_pending_changes_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.db");

    let item_id = {
        let mut store = EntityStore::open(&path).unwrap();
        assert!(!store.has_changes());
        let item = store.create_item().unwrap();
        assert!(store.has_changes());
        store.save();
        assert!(!store.has_changes());
        item.id
    };

    let reopened = EntityStore::open(&path).unwrap();
    assert!(reopened.find_item(item_id).unwrap().is_some());
}

#[test]
fn unsaved_changes_are_visible_but_not_durable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.db");

    let item_id = {
        let mut store = EntityStore::open(&path).unwrap();
        let item = store.create_item().unwrap();
        assert!(store.find_item(item.id).unwrap().is_some());
        item.id
    };

    let reopened = EntityStore::open(&path).unwrap();
    assert!(reopened.find_item(item_id).unwrap().is_none());
}

#[test]
fn missing_ids_are_quiet_no_ops() {
    let mut store = store();
    let ghost = Uuid::new_v4();

    assert!(store.find_item(ghost).unwrap().is_none());
    assert!(store.find_location(ghost).unwrap().is_none());
    assert!(!store.delete_item(ghost).unwrap());
    assert!(!store.delete_location(ghost).unwrap());
    assert!(!store.update_item(&Item::with_id(ghost, ghost)).unwrap());
    assert!(store.take_events().is_empty());
}

#[test]
fn filters_and_counts_agree() {
    let mut store = store();
    let dairy = store.insert_location(&Location::new("Dairy", 2)).unwrap();

    let mut milk = Item::new(dairy.id);
    milk.name = Some("milk".to_string());
    store.insert_item(&milk).unwrap();

    let mut eggs = Item::new(dairy.id);
    eggs.name = Some("Eggs".to_string());
    eggs.on_list = false;
    store.insert_item(&eggs).unwrap();

    let stray = store.create_item().unwrap();

    let all = store.all_items(&ItemFilter::default()).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id, stray.id, "blank names sort first");
    assert_eq!(all[1].name.as_deref(), Some("Eggs"));
    assert_eq!(all[2].name.as_deref(), Some("milk"));

    assert_eq!(store.count_items(&ItemFilter::on_list(true)).unwrap(), 2);
    assert_eq!(store.count_items(&ItemFilter::at_location(dairy.id)).unwrap(), 2);

    let user_only = LocationFilter {
        exclude_unknown: true,
    };
    assert_eq!(store.count_locations(&user_only).unwrap(), 1);
    assert_eq!(store.count_locations(&LocationFilter::default()).unwrap(), 2);
    let ordered = store.all_locations(&LocationFilter::default()).unwrap();
    assert_eq!(ordered.last().unwrap().visitation_order, UNKNOWN_LOCATION_ORDER);
}
