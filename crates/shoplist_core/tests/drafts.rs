use shoplist_core::{
    Color, Draft, DraftSessions, ItemFilter, Location, ResumeOutcome, SessionError,
    SessionState, ShoppingList, UNKNOWN_LOCATION_ORDER,
};

fn list() -> ShoppingList {
    let mut list = ShoppingList::open_in_memory().unwrap();
    list.on_appear().unwrap();
    list
}

#[test]
fn unchanged_item_draft_commit_is_idempotent() {
    let mut list = list();
    let item = list.create_item().unwrap();
    list.toggle_on_list(item.id).unwrap();
    let before = list.find_item(item.id).unwrap().unwrap();
    list.save();

    let draft = list.checkout_item_draft(item.id).unwrap().unwrap();
    let committed = list.commit_item_draft(&draft).unwrap();

    assert_eq!(committed, item.id);
    assert_eq!(list.find_item(item.id).unwrap().unwrap(), before);
    assert!(list.store().pending_events().is_empty());
}

#[test]
fn new_item_draft_creates_exactly_one_item() {
    let mut list = list();
    let dairy = list.insert_location(&Location::new("Dairy", 3)).unwrap();
    let count_before = list.count_items(&ItemFilter::default()).unwrap();

    let draft = list.new_item_draft(Some("Milk"), Some(dairy.id)).unwrap();
    assert!(draft.is_new());
    let id = list.commit_item_draft(&draft).unwrap();

    assert_eq!(list.count_items(&ItemFilter::default()).unwrap(), count_before + 1);
    let milk = list.find_item(id).unwrap().unwrap();
    assert_eq!(milk.name.as_deref(), Some("Milk"));
    assert_eq!(milk.location_id, dairy.id);
    assert_eq!(milk.quantity(), 1);
    assert!(milk.on_list);
    assert!(milk.is_available);
    assert!(milk.is_never_purchased());
    assert!(!list.store().has_changes(), "commit saves");
}

#[test]
fn new_item_draft_without_location_uses_unknown() {
    let mut list = list();
    let unknown = list.unknown_location().unwrap();
    let draft = list.new_item_draft(None, None).unwrap();
    assert_eq!(draft.location_id, unknown.id);
    assert_eq!(draft.name, "New Item");
}

#[test]
fn edited_item_draft_writes_back_and_stamps_purchase() {
    let mut list = list();
    let item = list.create_item().unwrap();

    let mut draft = list.checkout_item_draft(item.id).unwrap().unwrap();
    draft.name = "Coffee".to_string();
    draft.quantity = 0;
    draft.on_list = false;
    list.commit_item_draft(&draft).unwrap();

    let coffee = list.find_item(item.id).unwrap().unwrap();
    assert_eq!(coffee.name.as_deref(), Some("Coffee"));
    assert_eq!(coffee.quantity(), 1);
    assert!(coffee.date_last_purchased.is_some());
}

#[test]
fn location_draft_clamps_order_and_keeps_unknown_sentinel() {
    let mut list = list();

    let mut draft = list.new_location_draft();
    draft.name = "Frozen".to_string();
    draft.visitation_order = 500;
    draft.color = Color::new(0.0, 0.0, 1.0, 1.0);
    let id = list.commit_location_draft(&draft).unwrap();
    let frozen = list.find_location(id).unwrap().unwrap();
    assert_eq!(frozen.visitation_order, 100);
    assert_eq!(frozen.color(), Color::new(0.0, 0.0, 1.0, 1.0));

    let unknown = list.unknown_location().unwrap();
    let mut draft = list.checkout_location_draft(unknown.id).unwrap().unwrap();
    assert!(draft.is_unknown_location());
    draft.name = "Misc".to_string();
    draft.visitation_order = 1;
    list.commit_location_draft(&draft).unwrap();
    let unknown = list.find_location(unknown.id).unwrap().unwrap();
    assert_eq!(unknown.visitation_order, UNKNOWN_LOCATION_ORDER);
    assert_eq!(unknown.name.as_deref(), Some("Misc"));
}

#[test]
fn deleting_through_drafts() {
    let mut list = list();
    let item = list.create_item().unwrap();
    let item_draft = list.checkout_item_draft(item.id).unwrap().unwrap();
    assert!(list.delete_associated_item(&item_draft).unwrap());
    assert!(!list.item_draft_still_exists(&item_draft).unwrap());

    let unknown = list.unknown_location().unwrap();
    let unknown_draft = list.checkout_location_draft(unknown.id).unwrap().unwrap();
    assert!(!list.delete_associated_location(&unknown_draft).unwrap());
    assert!(list.location_draft_still_exists(&unknown_draft).unwrap());

    let fresh = list.new_location_draft();
    assert!(!list.delete_associated_location(&fresh).unwrap());
    assert!(list.location_draft_still_exists(&fresh).unwrap());
}

#[test]
fn session_lifecycle_commits_once() {
    let mut list = list();
    let mut sessions = DraftSessions::new();
    let draft = list.new_item_draft(Some("Tea"), None).unwrap();
    let id = sessions.begin(Draft::Item(draft));
    assert_eq!(sessions.state(id), Some(SessionState::New));

    sessions.item_draft_mut(id).unwrap().quantity = 4;
    assert_eq!(sessions.state(id), Some(SessionState::Editing));
    assert!(matches!(
        sessions.location_draft_mut(id),
        Err(SessionError::KindMismatch(_))
    ));

    let item_id = sessions.commit(id, &mut list).unwrap();
    assert_eq!(sessions.state(id), Some(SessionState::Committed));
    assert_eq!(list.find_item(item_id).unwrap().unwrap().quantity(), 4);
    assert!(sessions.is_empty());

    assert!(matches!(
        sessions.commit(id, &mut list),
        Err(SessionError::SessionClosed { .. })
    ));
    assert!(sessions.dispose(id));
    assert_eq!(sessions.state(id), None);
}

#[test]
fn resuming_after_entity_deleted_abandons_session() {
    let mut list = list();
    let item = list.create_item().unwrap();
    let mut sessions = DraftSessions::new();
    let draft = list.checkout_item_draft(item.id).unwrap().unwrap();
    let id = sessions.begin(Draft::Item(draft));

    assert_eq!(sessions.resume(id, &list).unwrap(), ResumeOutcome::Active);
    list.delete_item(item.id).unwrap();

    assert_eq!(sessions.resume(id, &list).unwrap(), ResumeOutcome::Abandoned);
    assert_eq!(
        sessions.state(id),
        Some(SessionState::UnderlyingEntityDeleted)
    );
    assert!(sessions.draft(id).is_none());
    assert_eq!(list.count_items(&ItemFilter::default()).unwrap(), 0);
}

#[test]
fn committing_vanished_location_does_not_recreate_it() {
    let mut list = list();
    let aisle = list.insert_location(&Location::new("Aisle 9", 9)).unwrap();
    let mut sessions = DraftSessions::new();
    let draft = list.checkout_location_draft(aisle.id).unwrap().unwrap();
    let id = sessions.begin(Draft::Location(draft));
    let locations_before = list.location_views().len();

    list.delete_location(aisle.id).unwrap();
    assert!(matches!(
        sessions.commit(id, &mut list),
        Err(SessionError::EntityVanished(_))
    ));
    assert_eq!(list.location_views().len(), locations_before - 1);
}

#[test]
fn cancelled_session_leaves_store_untouched() {
    let mut list = list();
    let mut sessions = DraftSessions::new();
    let id = sessions.begin(Draft::Location(list.new_location_draft()));
    sessions.location_draft_mut(id).unwrap().name = "Pharmacy".to_string();

    sessions.cancel(id).unwrap();
    assert_eq!(sessions.state(id), Some(SessionState::Cancelled));
    assert_eq!(list.location_views().len(), 1);
}

#[test]
fn failed_item_draft_commit_leaves_nothing_behind() {
    let mut list = list();
    let draft = list.new_item_draft(Some("Milk"), None).unwrap();
    list.save();
    list.store()
        .connection()
        .execute_batch(
            "CREATE TRIGGER block_item_update BEFORE UPDATE ON items
             BEGIN SELECT RAISE(ABORT, 'blocked'); END;",
        )
        .unwrap();

    assert!(list.commit_item_draft(&draft).is_err());
    list.save();

    assert_eq!(list.count_items(&ItemFilter::default()).unwrap(), 0);
    assert!(list.live().items().is_empty());
    assert!(!list.store().has_changes());
}
