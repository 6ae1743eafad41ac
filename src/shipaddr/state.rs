//! # Shared UI State
//!
//! Checkout state that many renderers read and any of them may write:
//!
//! - [`ActiveShippingAddress`]: the one address chosen for fulfillment.
//! - [`FormPopupState`]: whether the edit popup is open, and for which address.
//!
//! Both are built on [`Observable<T>`], a single-threaded reactive cell. Writers call
//! `set`; every subscriber is called with the new value, synchronously and in
//! subscription order. Subscriptions end when their [`Subscription`] guard is dropped.
//!
//! ## Reentrancy
//!
//! Subscribers receive a snapshot of the value and run with no borrow held, so a
//! callback may read or write the same cell. A nested `set` notifies everyone again
//! before the outer notification loop continues.

use crate::model::{Address, AddressKey};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct ObservableInner<T> {
    value: RefCell<T>,
    version: Cell<u64>,
    next_id: Cell<u64>,
    subscribers: RefCell<Vec<(u64, Callback<T>)>>,
}

/// A reactive value with push notifications.
pub struct Observable<T> {
    inner: Rc<ObservableInner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.inner.value.borrow())
            .field("version", &self.inner.version.get())
            .finish()
    }
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(ObservableInner {
                value: RefCell::new(value),
                version: Cell::new(0),
                next_id: Cell::new(0),
                subscribers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Read the value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Incremented on every write.
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
        self.bump_and_notify();
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.inner.value.borrow_mut());
        self.bump_and_notify();
    }

    /// Register `callback`; it runs on every subsequent write.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .subscribers
            .borrow_mut()
            .push((id, Rc::new(callback)));

        let weak: Weak<ObservableInner<T>> = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    fn bump_and_notify(&self) {
        self.inner.version.set(self.inner.version.get() + 1);
        let callbacks: Vec<Callback<T>> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        if callbacks.is_empty() {
            return;
        }
        let snapshot = self.get();
        for callback in callbacks {
            callback(&snapshot);
        }
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Write only when the value differs. Returns whether a write happened.
    pub fn set_if_changed(&self, value: T) -> bool {
        if *self.inner.value.borrow() == value {
            return false;
        }
        self.set(value);
        true
    }
}

impl<T: Clone + Default + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Guard for a subscription. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Keep the subscription alive for as long as the source lives.
    pub fn detach(mut self) {
        self.cancel.take();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// The checkout's single chosen shipping address.
#[derive(Clone, Debug, Default)]
pub struct ActiveShippingAddress {
    cell: Observable<Option<Address>>,
}

impl ActiveShippingAddress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, address: Address) {
        self.cell.set(Some(address));
    }

    pub fn clear(&self) {
        self.cell.set(None);
    }

    pub fn current(&self) -> Option<Address> {
        self.cell.get()
    }

    pub fn key(&self) -> Option<AddressKey> {
        self.cell.with(|current| current.as_ref().map(|a| a.key.clone()))
    }

    pub fn subscribe(&self, callback: impl Fn(Option<&Address>) + 'static) -> Subscription {
        self.cell.subscribe(move |current| callback(current.as_ref()))
    }

    pub fn version(&self) -> u64 {
        self.cell.version()
    }

    /// Number of live subscriptions.
    pub fn watcher_count(&self) -> usize {
        self.cell.subscriber_count()
    }
}

/// Visibility of the shared edit popup plus the address it was opened for.
#[derive(Clone, Debug, Default)]
pub struct FormPopupState {
    visible: Observable<bool>,
    editing: Observable<Option<Address>>,
}

impl FormPopupState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an edit session for `address`. Replaces any session in progress.
    pub fn open_for(&self, address: Address) {
        self.editing.set(Some(address));
        self.visible.set(true);
    }

    /// Hide the popup. The last edited address stays recorded.
    pub fn close(&self) {
        self.visible.set(false);
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn editing(&self) -> Option<Address> {
        self.editing.get()
    }

    pub fn subscribe_visibility(&self, callback: impl Fn(bool) + 'static) -> Subscription {
        self.visible.subscribe(move |visible| callback(*visible))
    }
}
