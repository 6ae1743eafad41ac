//! # Commands
//!
//! One module per mutation: [`select`], [`edit`], [`update`], [`delete`]. Each exposes a
//! `run` function over a [`CheckoutContext`](crate::context::CheckoutContext).
//!
//! Commands never return errors. Whatever happens (a transport failure, a backend
//! rejection, a guard that stops the operation) comes back as an [`Outcome`] plus
//! leveled [`CmdMessage`]s, and failures are logged where they happen.

use crate::form::BindReport;
use crate::model::{Address, AddressId, AddressKey};

pub mod delete;
pub mod edit;
pub mod select;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Why a gateway call did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The request never completed.
    Transport(String),
    /// The backend answered `success: false`.
    Rejected(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Selected(AddressKey),
    Editing(BindReport),
    Updated(AddressId),
    Deleted(AddressId),
    /// Update of an address that has no persistence id.
    Skipped,
    /// Delete stopped by the last-address guard.
    Refused,
    /// The shopper declined the delete confirmation.
    Cancelled,
    Failed(Failure),
}

#[derive(Debug, Clone)]
pub struct CmdResult {
    pub outcome: Outcome,
    pub affected_addresses: Vec<Address>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            affected_addresses: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected_addresses(mut self, addresses: Vec<Address>) -> Self {
        self.affected_addresses = addresses;
        self
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }
}

/// Short human label for messages: the name if there is one, else the key.
pub(crate) fn describe(address: &Address) -> String {
    let name = address.full_name();
    if name.is_empty() {
        address.key.to_string()
    } else {
        name
    }
}
