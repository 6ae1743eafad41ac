//! Checkout-session cache of the shopper's chosen shipping address key.
//!
//! The cache outlives a page reload; the reactive state does not. After a reload,
//! [`crate::context::CheckoutContext::restore_selection`] reads the key back.

use crate::error::{AddressError, Result};
use crate::model::AddressKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

const CHECKOUT_DATA_FILENAME: &str = "checkout-data.json";

pub trait SessionCache {
    fn set_selected_shipping_address(&self, key: &AddressKey) -> Result<()>;

    fn selected_shipping_address(&self) -> Result<Option<AddressKey>>;
}

/// What the cache records for a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedAddress {
    pub key: AddressKey,
    pub selected_at: DateTime<Utc>,
}

impl SelectedAddress {
    pub fn now(key: AddressKey) -> Self {
        Self {
            key,
            selected_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionCache {
    selected: RefCell<Option<SelectedAddress>>,
    simulate_write_error: bool,
}

impl MemorySessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache whose writes always fail.
    pub fn failing() -> Self {
        Self {
            simulate_write_error: true,
            ..Default::default()
        }
    }

    pub fn selected(&self) -> Option<SelectedAddress> {
        self.selected.borrow().clone()
    }
}

impl SessionCache for MemorySessionCache {
    fn set_selected_shipping_address(&self, key: &AddressKey) -> Result<()> {
        if self.simulate_write_error {
            return Err(AddressError::Io(std::io::Error::other(
                "Simulated session write error",
            )));
        }
        *self.selected.borrow_mut() = Some(SelectedAddress::now(key.clone()));
        Ok(())
    }

    fn selected_shipping_address(&self) -> Result<Option<AddressKey>> {
        Ok(self.selected.borrow().as_ref().map(|s| s.key.clone()))
    }
}

/// Session cache persisted to `<root>/checkout-data.json`.
pub struct FileSessionCache {
    root: PathBuf,
}

impl FileSessionCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self) -> PathBuf {
        self.root.join(CHECKOUT_DATA_FILENAME)
    }

    /// The full record, including when it was written.
    pub fn load(&self) -> Result<Option<SelectedAddress>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let selected: SelectedAddress = serde_json::from_str(&content)?;
        Ok(Some(selected))
    }
}

impl SessionCache for FileSessionCache {
    fn set_selected_shipping_address(&self, key: &AddressKey) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        let content = serde_json::to_string_pretty(&SelectedAddress::now(key.clone()))?;
        fs::write(self.path(), content)?;
        Ok(())
    }

    fn selected_shipping_address(&self) -> Result<Option<AddressKey>> {
        Ok(self.load()?.map(|s| s.key))
    }
}
