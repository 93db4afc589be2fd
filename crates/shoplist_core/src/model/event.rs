//! Change events emitted by the entity store.

use uuid::Uuid;

/// What happened to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// Which entity table an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Item,
    Location,
}

/// One entry of the store's change feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub entity: EntityKind,
    pub id: Uuid,
}

impl ChangeEvent {
    pub fn item(kind: ChangeKind, id: Uuid) -> Self {
        Self {
            kind,
            entity: EntityKind::Item,
            id,
        }
    }

    pub fn location(kind: ChangeKind, id: Uuid) -> Self {
        Self {
            kind,
            entity: EntityKind::Location,
            id,
        }
    }
}

/// Returns whether any event in `events` touches `entity`.
pub fn touches(events: &[ChangeEvent], entity: EntityKind) -> bool {
    events.iter().any(|event| event.entity == entity)
}
