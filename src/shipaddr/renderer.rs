//! # Address Renderer
//!
//! One [`AddressRenderer`] per displayed address. It owns that address's derived
//! selection flag and controller, and turns the address into an [`AddressCard`]: the
//! display-ready view a template (or the CLI) prints.
//!
//! Dropping a renderer drops its [`SelectionState`] and with it the subscription to the
//! active shipping address.

use crate::attributes::resolve_label;
use crate::commands::CmdResult;
use crate::context::CheckoutContext;
use crate::controller::AddressMutationController;
use crate::gateway::AddressGateway;
use crate::model::{Address, AddressId, CustomAttribute};
use crate::selection::SelectionState;
use crate::state::Subscription;
use serde::Serialize;
use std::rc::Rc;

/// Display view of one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressCard {
    pub key: String,
    pub selected: bool,
    pub name: String,
    pub company: String,
    pub street: Vec<String>,
    pub city: String,
    pub region: String,
    pub postcode: String,
    pub country: String,
    pub telephone: String,
    /// `(attribute code, label)` pairs, ordered by code.
    pub attributes: Vec<(String, String)>,
    /// Only stored addresses can be edited or deleted.
    pub editable: bool,
}

pub struct AddressRenderer<G: AddressGateway> {
    controller: AddressMutationController<G>,
    selection: SelectionState,
}

impl<G: AddressGateway> AddressRenderer<G> {
    pub fn new(ctx: Rc<CheckoutContext<G>>, address: Address) -> Self {
        let selection = SelectionState::new(address.key.clone(), &ctx.active);
        Self {
            controller: AddressMutationController::new(ctx, address),
            selection,
        }
    }

    pub fn address(&self) -> &Address {
        self.controller.address()
    }

    pub fn is_selected(&self) -> bool {
        self.selection.is_selected()
    }

    pub fn subscribe_selection(&self, callback: impl Fn(bool) + 'static) -> Subscription {
        self.selection.subscribe(callback)
    }

    pub fn country_name(&self) -> String {
        self.controller
            .context()
            .countries
            .country_name(&self.address().country_id)
    }

    pub fn custom_attribute_label(&self, attribute: &CustomAttribute) -> String {
        resolve_label(attribute, &self.controller.context().options)
    }

    pub fn custom_attribute_labels(&self) -> Vec<(String, String)> {
        self.address()
            .custom_attributes
            .iter()
            .map(|(code, attribute)| (code.clone(), self.custom_attribute_label(attribute)))
            .collect()
    }

    pub fn card(&self) -> AddressCard {
        let address = self.address();
        AddressCard {
            key: address.key.to_string(),
            selected: self.is_selected(),
            name: address.full_name(),
            company: address.company.clone(),
            street: address.street.clone(),
            city: address.city.clone(),
            region: address.region.clone(),
            postcode: address.postcode.clone(),
            country: self.country_name(),
            telephone: address.telephone.clone(),
            attributes: self.custom_attribute_labels(),
            editable: address.is_persisted(),
        }
    }

    pub fn select(&self) -> CmdResult {
        self.controller.select()
    }

    pub fn edit(&self) -> CmdResult {
        self.controller.edit()
    }

    pub async fn update(&self) -> CmdResult {
        self.controller.update().await
    }

    pub async fn delete(&self, id: &AddressId) -> CmdResult {
        self.controller.delete(id).await
    }

    pub async fn submit_form(&self) -> CmdResult {
        self.controller.submit_form().await
    }
}
