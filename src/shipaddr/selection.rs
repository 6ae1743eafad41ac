//! Derived "is this the active shipping address" flag for one rendered address.
//!
//! The flag is recomputed on every publish to [`ActiveShippingAddress`]; there is no
//! manual invalidation. Since the active address holds exactly one key, at most one
//! `SelectionState` among those watching it can be true.

use crate::model::{Address, AddressKey};
use crate::state::{ActiveShippingAddress, Observable, Subscription};

/// True iff `active` is present and carries `key`.
pub fn is_selected_for(key: &AddressKey, active: Option<&Address>) -> bool {
    active.is_some_and(|address| address.key == *key)
}

pub struct SelectionState {
    key: AddressKey,
    selected: Observable<bool>,
    _link: Subscription,
}

impl SelectionState {
    pub fn new(key: AddressKey, active: &ActiveShippingAddress) -> Self {
        let initial = is_selected_for(&key, active.current().as_ref());
        let selected = Observable::new(initial);

        let link = {
            let selected = selected.clone();
            let key = key.clone();
            active.subscribe(move |current| {
                selected.set_if_changed(is_selected_for(&key, current));
            })
        };

        Self {
            key,
            selected,
            _link: link,
        }
    }

    pub fn key(&self) -> &AddressKey {
        &self.key
    }

    pub fn is_selected(&self) -> bool {
        self.selected.get()
    }

    /// Called only when the flag flips.
    pub fn subscribe(&self, callback: impl Fn(bool) + 'static) -> Subscription {
        self.selected.subscribe(move |selected| callback(*selected))
    }
}
