//! # Persistence Gateway
//!
//! The [`AddressGateway`] trait is the only way the core talks to the backend that
//! stores customer addresses. How requests travel (HTTP, IPC, a file) is the
//! implementation's business.
//!
//! ## Two Failure Channels
//!
//! - `Err(_)`: the request never completed (transport failure).
//! - `Ok(GatewayResponse { success: false, .. })`: the backend answered and refused.
//!
//! Commands log both and never retry.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryGateway`]: records calls, can simulate either failure channel.
//! - [`fs::FileGateway`]: JSON address book on disk, used by the CLI.
//!
//! The trait is `?Send`: the core is single-threaded and its futures run on the host's
//! event loop.

use crate::error::Result;
use crate::form::{street_index, FormEntry};
use crate::model::{Address, AddressId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod fs;
pub mod memory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GatewayResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

#[async_trait(?Send)]
pub trait AddressGateway {
    /// Persist edited form data for a stored address.
    async fn update_address(&self, id: &AddressId, fields: &[FormEntry])
        -> Result<GatewayResponse>;

    /// Remove a stored address.
    async fn delete_address(&self, id: &AddressId) -> Result<GatewayResponse>;
}

/// Apply submitted form entries to a stored address.
///
/// Scalar fields are matched by name; `street[N]` entries replace the street lines,
/// dropping blank ones. Unknown names (including the id field) are ignored.
pub fn apply_form_entries(address: &mut Address, entries: &[FormEntry]) {
    let mut street: Vec<(usize, &str)> = Vec::new();
    for entry in entries {
        if let Some(index) = street_index(&entry.name) {
            street.push((index, entry.value.as_str()));
        } else {
            address.set_field(&entry.name, entry.value.clone());
        }
    }

    if !street.is_empty() {
        street.sort_by_key(|(i, _)| *i);
        address.street = street
            .into_iter()
            .map(|(_, line)| line.trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
    }
}
