//! Observer-list signal with subscribe-order delivery

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Handle identifying one subscription on one signal
///
/// Returned by [`Signal::connect`] and consumed by
/// [`Signal::disconnect`]. Ids are allocated sequentially per signal,
/// so they double as a record of subscription order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub:{}", self.0)
    }
}

struct Slot<T> {
    id: SubscriptionId,
    callback: Rc<dyn Fn(&T)>,
}

struct Registry<T> {
    next_id: u64,
    slots: Vec<Slot<T>>,
}

impl<T> Registry<T> {
    fn new() -> Self {
        Self {
            next_id: 0,
            slots: Vec::new(),
        }
    }
}

/// A typed broadcast stream with an explicit observer list
///
/// Cloning a `Signal` produces another handle to the same observer
/// list, which is how an emulator hands out its streams while
/// retaining the right to emit on them.
///
/// Delivery contract:
/// - Subscribers run in subscription order.
/// - Emission is synchronous: all subscribers have run before `emit`
///   returns.
/// - Emission is re-entrancy safe: a subscriber may connect,
///   disconnect, or emit again; it observes the list as it was when
///   the current emission started.
pub struct Signal<T> {
    inner: Rc<RefCell<Registry<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Signal<T> {
    /// Creates a signal with no subscribers
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry::new())),
        }
    }

    /// Subscribes a callback, returning its subscription handle
    pub fn connect(&self, callback: impl Fn(&T) + 'static) -> SubscriptionId {
        let mut registry = self.inner.borrow_mut();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.slots.push(Slot {
            id,
            callback: Rc::new(callback),
        });
        id
    }

    /// Removes a subscription
    ///
    /// Returns `true` if the subscription was present.
    pub fn disconnect(&self, id: SubscriptionId) -> bool {
        let mut registry = self.inner.borrow_mut();
        let before = registry.slots.len();
        registry.slots.retain(|slot| slot.id != id);
        registry.slots.len() != before
    }

    /// Removes every subscription
    pub fn disconnect_all(&self) {
        self.inner.borrow_mut().slots.clear();
    }

    /// Delivers a payload to every subscriber, in subscription order
    pub fn emit(&self, payload: &T) {
        // Snapshot the callbacks so subscribers can mutate the list
        // without holding the borrow across their own execution.
        let snapshot: Vec<Rc<dyn Fn(&T)>> = self
            .inner
            .borrow()
            .slots
            .iter()
            .map(|slot| Rc::clone(&slot.callback))
            .collect();

        for callback in snapshot {
            callback(payload);
        }
    }

    /// Returns the number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().slots.len()
    }
}
