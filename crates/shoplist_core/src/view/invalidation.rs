//! Cross-entity invalidation from store change events.

use crate::live::{LiveCollections, Refresh};
use crate::model::event::{ChangeEvent, ChangeKind, EntityKind};
use crate::model::item::ItemId;
use crate::model::location::{Color, Location, LocationId};
use crate::view::signals::ViewSignal;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
struct LocationDisplay {
    name: String,
    visitation_order: i32,
    color: Color,
}

impl LocationDisplay {
    fn of(location: &Location) -> Self {
        Self {
            name: location.display_name().to_string(),
            visitation_order: location.visitation_order,
            color: location.color(),
        }
    }
}

/// Tracks item→location membership and location display fields between
/// refreshes so cross-entity changes can be detected.
#[derive(Debug, Default)]
pub struct RelationalViews {
    memberships: HashMap<ItemId, LocationId>,
    displays: HashMap<LocationId, LocationDisplay>,
}

impl RelationalViews {
    /// Indexes the current state of `live`.
    pub fn new(live: &LiveCollections) -> Self {
        let mut views = Self::default();
        views.reindex(live);
        views
    }

    /// Computes the signals implied by `events`, given that `live` has
    /// already been refreshed for them.
    ///
    /// Collection signals come first, then entity signals in event order.
    /// Each signal appears at most once.
    pub fn invalidate(
        &mut self,
        events: &[ChangeEvent],
        refresh: Refresh,
        live: &LiveCollections,
    ) -> Vec<ViewSignal> {
        let mut signals = SignalList::default();
        if refresh.items {
            signals.push(ViewSignal::ItemsRefreshed);
        }
        if refresh.locations {
            signals.push(ViewSignal::LocationsRefreshed);
        }

        for event in events {
            match event.entity {
                EntityKind::Item => self.item_signals(event, live, &mut signals),
                EntityKind::Location => self.location_signals(event, live, &mut signals),
            }
        }

        self.reindex(live);
        signals.into_vec()
    }

    fn item_signals(&self, event: &ChangeEvent, live: &LiveCollections, out: &mut SignalList) {
        out.push(ViewSignal::Item(event.id));

        let before = self.memberships.get(&event.id).copied();
        let after = live.item(event.id).map(|item| item.location_id);
        if before != after {
            if let Some(old) = before {
                out.push(ViewSignal::Location(old));
            }
            if let Some(new) = after {
                out.push(ViewSignal::Location(new));
            }
        }
    }

    fn location_signals(&self, event: &ChangeEvent, live: &LiveCollections, out: &mut SignalList) {
        out.push(ViewSignal::Location(event.id));
        if event.kind != ChangeKind::Updated {
            return;
        }

        let before = self.displays.get(&event.id);
        let after = live.location(event.id).map(LocationDisplay::of);
        if before == after.as_ref() {
            return;
        }
        for item in live.items_at(event.id) {
            out.push(ViewSignal::Item(item.id));
        }
    }

    fn reindex(&mut self, live: &LiveCollections) {
        self.memberships = live
            .items()
            .iter()
            .map(|item| (item.id, item.location_id))
            .collect();
        self.displays = live
            .locations()
            .iter()
            .map(|location| (location.id, LocationDisplay::of(location)))
            .collect();
    }
}

#[derive(Default)]
struct SignalList {
    ordered: Vec<ViewSignal>,
    seen: HashSet<ViewSignal>,
}

impl SignalList {
    fn push(&mut self, signal: ViewSignal) {
        if self.seen.insert(signal) {
            self.ordered.push(signal);
        }
    }

    fn into_vec(self) -> Vec<ViewSignal> {
        self.ordered
    }
}
