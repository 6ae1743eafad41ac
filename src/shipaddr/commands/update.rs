use crate::commands::{describe, CmdMessage, CmdResult, Failure, Outcome};
use crate::context::CheckoutContext;
use crate::form::FormEntry;
use crate::gateway::AddressGateway;
use crate::model::Address;
use tracing::{error, info};

/// Submit the shared form's current values for `address`.
///
/// Addresses without a persistence id are skipped silently. On success the host page is
/// told to reload and then to close the modal. Failures are logged and leave every
/// piece of UI state as it was.
pub async fn run<G: AddressGateway>(ctx: &CheckoutContext<G>, address: &Address) -> CmdResult {
    let Some(id) = address.customer_address_id.clone() else {
        return CmdResult::new(Outcome::Skipped);
    };

    let mut fields = ctx.form.borrow().serialize();
    fields.push(FormEntry::new(ctx.config.address_id_field.as_str(), id.as_str()));

    match ctx.gateway.update_address(&id, &fields).await {
        Ok(response) if response.success => {
            info!(id = %id, "address updated");
            ctx.page.reload();
            ctx.page.close_modal();
            ctx.popup.close();
            CmdResult::new(Outcome::Updated(id))
                .with_affected_addresses(vec![address.clone()])
                .with_message(CmdMessage::success(format!(
                    "Address updated: {}",
                    describe(address)
                )))
        }
        Ok(response) => {
            error!(
                id = %id,
                message = response.message.as_deref().unwrap_or(""),
                "address update rejected"
            );
            CmdResult::new(Outcome::Failed(Failure::Rejected(response.message.clone())))
                .with_message(CmdMessage::error(format!(
                    "Address update rejected: {}",
                    response.message.as_deref().unwrap_or("no reason given")
                )))
        }
        Err(e) => {
            error!(id = %id, error = %e, "address update failed");
            CmdResult::new(Outcome::Failed(Failure::Transport(e.to_string())))
                .with_message(CmdMessage::error(format!("Address update failed: {}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::harness;
    use crate::gateway::memory::{FailureMode, GatewayCall};
    use crate::host::PageSignal;
    use futures::executor::block_on;

    fn stored() -> Address {
        let mut address = Address::customer("42");
        address.city = "Rome".into();
        address.street = vec!["Via Roma 1".into()];
        address
    }

    fn editing(h: &crate::context::test_support::Harness, address: &Address) {
        crate::commands::edit::run(&h.ctx, address);
    }

    #[test]
    fn without_persistence_id_is_skipped() {
        let h = harness(vec![stored()]);
        let result = block_on(run(&h.ctx, &Address::unsaved()));

        assert_eq!(result.outcome, Outcome::Skipped);
        assert!(result.messages.is_empty());
        assert_eq!(h.gateway().call_count(), 0);
        assert!(h.page.signals().is_empty());
    }

    #[test]
    fn sends_form_values_plus_address_id() {
        let h = harness(vec![stored()]);
        editing(&h, &stored());
        h.ctx.form.borrow_mut().set_value("city", "Milan");

        block_on(run(&h.ctx, &stored()));

        match &h.gateway().calls()[0] {
            GatewayCall::Update { id, fields } => {
                assert_eq!(id.as_str(), "42");
                assert!(fields.contains(&FormEntry::new("city", "Milan")));
                assert_eq!(fields.last(), Some(&FormEntry::new("address_id", "42")));
            }
            other => panic!("Expected update call, got {:?}", other),
        }
        assert_eq!(h.gateway().addresses()[0].city, "Milan");
    }

    #[test]
    fn success_reloads_then_closes_once() {
        let h = harness(vec![stored()]);
        editing(&h, &stored());

        let result = block_on(run(&h.ctx, &stored()));

        assert!(matches!(result.outcome, Outcome::Updated(_)));
        assert_eq!(h.page.count(PageSignal::Reload), 1);
        assert_eq!(h.page.count(PageSignal::CloseModal), 1);
        assert_eq!(
            &h.page.signals()[1..],
            &[PageSignal::Reload, PageSignal::CloseModal]
        );
        assert!(!h.ctx.popup.is_visible());
    }

    #[test]
    fn rejection_emits_no_signals() {
        let h = harness(vec![stored()]);
        editing(&h, &stored());
        h.gateway().set_failure_mode(FailureMode::Reject);

        let result = block_on(run(&h.ctx, &stored()));

        assert!(matches!(
            result.outcome,
            Outcome::Failed(Failure::Rejected(_))
        ));
        assert_eq!(h.page.count(PageSignal::Reload), 0);
        assert_eq!(h.page.count(PageSignal::CloseModal), 0);
        assert!(h.ctx.popup.is_visible());
    }

    #[test]
    fn transport_error_emits_no_signals() {
        let h = harness(vec![stored()]);
        h.gateway().set_failure_mode(FailureMode::Transport);

        let result = block_on(run(&h.ctx, &stored()));

        assert!(matches!(
            result.outcome,
            Outcome::Failed(Failure::Transport(_))
        ));
        assert!(h.page.signals().is_empty());
        assert_eq!(h.gateway().call_count(), 1);
    }
}
