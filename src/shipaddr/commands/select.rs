use crate::commands::{describe, CmdMessage, CmdResult, Outcome};
use crate::context::CheckoutContext;
use crate::gateway::AddressGateway;
use crate::model::Address;
use tracing::{error, info};

/// Make `address` the checkout's shipping address and remember its key for the session.
///
/// A failed cache write does not undo the selection; it is logged and reported as a
/// warning.
pub fn run<G: AddressGateway>(ctx: &CheckoutContext<G>, address: &Address) -> CmdResult {
    ctx.active.publish(address.clone());
    info!(key = %address.key, "selected shipping address");

    let mut result = CmdResult::new(Outcome::Selected(address.key.clone()))
        .with_affected_addresses(vec![address.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Shipping address selected: {}",
        describe(address)
    )));

    if let Err(e) = ctx.session.set_selected_shipping_address(&address.key) {
        error!(key = %address.key, error = %e, "failed to cache selected shipping address");
        result.add_message(CmdMessage::warning(format!(
            "Selection was not saved for this session: {}",
            e
        )));
    }

    result
}
