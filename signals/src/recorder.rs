//! Test helper that records every emission of a signal

use crate::signal::{Signal, SubscriptionId};
use std::cell::RefCell;
use std::rc::Rc;

/// Collects emitted payloads for later inspection
///
/// Attach a recorder to any signal under test, trigger the behavior,
/// then assert on the collected events. Events are stored in delivery
/// order.
pub struct Recorder<T: Clone> {
    events: Rc<RefCell<Vec<T>>>,
}

impl<T: Clone + 'static> Recorder<T> {
    /// Creates an empty recorder
    pub fn new() -> Self {
        Self {
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Subscribes this recorder to a signal
    pub fn attach(&self, signal: &Signal<T>) -> SubscriptionId {
        let sink = Rc::clone(&self.events);
        signal.connect(move |payload| sink.borrow_mut().push(payload.clone()))
    }

    /// Returns a copy of every recorded event, oldest first
    pub fn events(&self) -> Vec<T> {
        self.events.borrow().clone()
    }

    /// Returns the number of recorded events
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Returns whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Discards all recorded events
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl<T: Clone + 'static> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}
