//! # Mutation Controller
//!
//! [`AddressMutationController`] is a thin facade over the command layer for one
//! rendered address. It dispatches to `commands/*.rs` and adds nothing else:
//!
//! - no business logic (that lives in the commands)
//! - no presentation (callers turn [`CmdResult`]s into output)
//!
//! Operations are not reentrant per kind and concurrent calls are not deduplicated: two
//! overlapping `update` futures issue two gateway calls.

use crate::commands::{self, CmdResult, Outcome};
use crate::context::CheckoutContext;
use crate::gateway::AddressGateway;
use crate::model::{Address, AddressId};
use std::rc::Rc;

pub struct AddressMutationController<G: AddressGateway> {
    ctx: Rc<CheckoutContext<G>>,
    address: Address,
}

impl<G: AddressGateway> AddressMutationController<G> {
    pub fn new(ctx: Rc<CheckoutContext<G>>, address: Address) -> Self {
        Self { ctx, address }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn context(&self) -> &Rc<CheckoutContext<G>> {
        &self.ctx
    }

    pub fn select(&self) -> CmdResult {
        commands::select::run(&self.ctx, &self.address)
    }

    pub fn edit(&self) -> CmdResult {
        commands::edit::run(&self.ctx, &self.address)
    }

    /// Submit the shared form for this controller's address.
    pub async fn update(&self) -> CmdResult {
        commands::update::run(&self.ctx, &self.address).await
    }

    pub async fn delete(&self, id: &AddressId) -> CmdResult {
        commands::delete::run(&self.ctx, id).await
    }

    /// Submit the shared form for whichever address the edit popup was last opened for.
    ///
    /// This is what the form's single update control triggers, so it may update an
    /// address other than this controller's.
    pub async fn submit_form(&self) -> CmdResult {
        match self.ctx.popup.editing() {
            Some(editing) => commands::update::run(&self.ctx, &editing).await,
            None => CmdResult::new(Outcome::Skipped),
        }
    }
}
