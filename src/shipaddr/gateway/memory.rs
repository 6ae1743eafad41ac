use super::{apply_form_entries, AddressGateway, GatewayResponse};
use crate::error::{AddressError, Result};
use crate::form::FormEntry;
use crate::model::{Address, AddressId};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};

/// Which failure the next calls should produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailureMode {
    #[default]
    None,
    /// Answer with `success: false`.
    Reject,
    /// Fail before any answer.
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Update {
        id: AddressId,
        fields: Vec<FormEntry>,
    },
    Delete {
        id: AddressId,
    },
}

/// In-memory gateway for tests and headless hosts.
///
/// Uses `RefCell` since the core is single-threaded. Every call is recorded, including
/// the ones that fail.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    addresses: RefCell<Vec<Address>>,
    calls: RefCell<Vec<GatewayCall>>,
    failure: Cell<FailureMode>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_addresses(addresses: Vec<Address>) -> Self {
        Self {
            addresses: RefCell::new(addresses),
            ..Default::default()
        }
    }

    pub fn set_failure_mode(&self, mode: FailureMode) {
        self.failure.set(mode);
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.addresses.borrow().clone()
    }

    fn check_failure(&self) -> Result<Option<GatewayResponse>> {
        match self.failure.get() {
            FailureMode::None => Ok(None),
            FailureMode::Reject => Ok(Some(GatewayResponse::rejected("Simulated rejection"))),
            FailureMode::Transport => Err(AddressError::Transport(
                "Simulated transport error".to_string(),
            )),
        }
    }
}

#[async_trait(?Send)]
impl AddressGateway for InMemoryGateway {
    async fn update_address(
        &self,
        id: &AddressId,
        fields: &[FormEntry],
    ) -> Result<GatewayResponse> {
        self.calls.borrow_mut().push(GatewayCall::Update {
            id: id.clone(),
            fields: fields.to_vec(),
        });
        if let Some(response) = self.check_failure()? {
            return Ok(response);
        }

        let mut addresses = self.addresses.borrow_mut();
        match addresses
            .iter_mut()
            .find(|a| a.customer_address_id.as_ref() == Some(id))
        {
            Some(address) => {
                apply_form_entries(address, fields);
                Ok(GatewayResponse::ok())
            }
            None => Ok(GatewayResponse::rejected(format!(
                "Address not found: {}",
                id
            ))),
        }
    }

    async fn delete_address(&self, id: &AddressId) -> Result<GatewayResponse> {
        self.calls
            .borrow_mut()
            .push(GatewayCall::Delete { id: id.clone() });
        if let Some(response) = self.check_failure()? {
            return Ok(response);
        }

        let mut addresses = self.addresses.borrow_mut();
        let before = addresses.len();
        addresses.retain(|a| a.customer_address_id.as_ref() != Some(id));
        if addresses.len() == before {
            return Ok(GatewayResponse::rejected(format!(
                "Address not found: {}",
                id
            )));
        }
        Ok(GatewayResponse::ok())
    }
}
