//! View signals and their publish/subscribe hub.

use crate::model::item::ItemId;
use crate::model::location::LocationId;
use log::debug;
use std::collections::BTreeMap;

/// Identifier returned by `SignalHub::subscribe`.
pub type SubscriptionId = u64;

/// A view-level change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewSignal {
    /// The live item collection was replaced.
    ItemsRefreshed,
    /// The live location collection was replaced.
    LocationsRefreshed,
    /// Anything displayed for this item may have changed.
    Item(ItemId),
    /// Anything displayed for this location (including its members) may have changed.
    Location(LocationId),
}

/// Selects which signals a subscriber receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalFilter {
    All,
    /// Only `ItemsRefreshed` and `LocationsRefreshed`.
    Collections,
    Item(ItemId),
    Location(LocationId),
}

impl SignalFilter {
    pub fn matches(&self, signal: &ViewSignal) -> bool {
        match (self, signal) {
            (Self::All, _) => true,
            (Self::Collections, ViewSignal::ItemsRefreshed | ViewSignal::LocationsRefreshed) => {
                true
            }
            (Self::Item(wanted), ViewSignal::Item(id)) => wanted == id,
            (Self::Location(wanted), ViewSignal::Location(id)) => wanted == id,
            _ => false,
        }
    }
}

struct Subscriber {
    filter: SignalFilter,
    listener: Box<dyn FnMut(&ViewSignal)>,
}

/// Explicit publish/subscribe channel for view signals.
///
/// Listeners run synchronously, in subscription order, on the publishing
/// thread.
#[derive(Default)]
pub struct SignalHub {
    next_id: SubscriptionId,
    subscribers: BTreeMap<SubscriptionId, Subscriber>,
}

impl SignalHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for signals matching `filter`.
    pub fn subscribe(
        &mut self,
        filter: SignalFilter,
        listener: impl FnMut(&ViewSignal) + 'static,
    ) -> SubscriptionId {
        self.next_id += 1;
        let id = self.next_id;
        self.subscribers.insert(
            id,
            Subscriber {
                filter,
                listener: Box::new(listener),
            },
        );
        id
    }

    /// Removes a subscription. Returns `false` for unknown ids.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Delivers each signal, in order, to every matching subscriber.
    pub fn publish(&mut self, signals: &[ViewSignal]) {
        if signals.is_empty() {
            return;
        }
        let mut deliveries = 0usize;
        for signal in signals {
            for subscriber in self.subscribers.values_mut() {
                if subscriber.filter.matches(signal) {
                    (subscriber.listener)(signal);
                    deliveries += 1;
                }
            }
        }
        debug!(
            "event=signals_publish module=view status=ok signals={} deliveries={}",
            signals.len(),
            deliveries
        );
    }
}
