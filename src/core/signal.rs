//! Per-event subscriber lists.
//!
//! Every entity that announces something owns one [`Signal`] per kind of
//! event. Subscribers [`connect`](Signal::connect) a slot and get back a
//! [`Connection`], which stays valid until it is explicitly disconnected;
//! dropping a `Connection` does *not* disconnect it.
//!
//! Delivery is synchronous and FIFO in connection order. Emission works on a
//! snapshot of the subscriber list, but every slot is checked again right
//! before it is called: a slot disconnected by an earlier slot of the same
//! emission is not called. This makes it safe for a slot to disconnect
//! itself or others, or to drop the object owning it, while it runs.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

/// A subscriber to a [`Signal`].
pub type Slot<T> = Rc<dyn Fn(&T)>;

struct Slots<T> {
    next: Cell<u64>,
    slots: RefCell<IndexMap<u64, Slot<T>>>,
}

/// Type-erased access to a signal's subscriber list, held by connections.
trait SlotTable {
    fn remove(&self, id: u64) -> bool;
    fn contains(&self, id: u64) -> bool;
}

impl<T> SlotTable for Slots<T> {
    fn remove(&self, id: u64) -> bool {
        // shift_remove keeps delivery order intact for everyone else
        self.slots.borrow_mut().shift_remove(&id).is_some()
    }

    fn contains(&self, id: u64) -> bool {
        self.slots.borrow().contains_key(&id)
    }
}

/// A list of subscribers to one kind of event.
pub struct Signal<T: 'static> {
    inner: Rc<Slots<T>>,
}

impl<T: 'static> Signal<T> {
    /// Creates a new Signal with no subscribers.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Slots {
                next: Cell::new(0),
                slots: RefCell::new(IndexMap::new()),
            }),
        }
    }

    /// Subscribes `slot` to the signal.
    ///
    /// The slot is called for every emission until the returned
    /// [`Connection`] is disconnected.
    pub fn connect<F>(&self, slot: F) -> Connection
    where
        F: Fn(&T) + 'static,
    {
        let id = self.inner.next.get();
        self.inner.next.set(id + 1);

        self.inner.slots.borrow_mut().insert(id, Rc::new(slot));

        let slots: Weak<Slots<T>> = Rc::downgrade(&self.inner);
        let table: Weak<dyn SlotTable> = slots;

        Connection { id, table }
    }

    /// Delivers `event` to every connected slot, in connection order.
    pub fn emit(&self, event: &T) {
        let snapshot: Vec<(u64, Slot<T>)> = self
            .inner
            .slots
            .borrow()
            .iter()
            .map(|(id, slot)| (*id, Rc::clone(slot)))
            .collect();

        for (id, slot) in snapshot {
            let live = self.inner.contains(id);
            if live {
                slot(event);
            }
        }
    }

    /// The number of connected slots.
    pub fn len(&self) -> usize {
        self.inner.slots.borrow().len()
    }

    /// Returns true if nothing is connected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("slots", &self.len())
            .finish()
    }
}

/// A handle to one subscription to a [`Signal`].
///
/// Outliving the signal is fine: disconnecting from a dropped
/// signal does nothing.
#[derive(Debug)]
pub struct Connection {
    id: u64,
    table: Weak<dyn SlotTable>,
}

impl Connection {
    /// Removes the subscription.
    ///
    /// Returns whether the slot was still connected.
    pub fn disconnect(&self) -> bool {
        match self.table.upgrade() {
            Some(table) => table.remove(self.id),
            None => false,
        }
    }

    /// Returns whether the slot is still connected.
    pub fn is_connected(&self) -> bool {
        self.table
            .upgrade()
            .is_some_and(|table| table.contains(self.id))
    }
}
