use crate::commands::{CmdMessage, CmdResult, Failure, Outcome};
use crate::context::CheckoutContext;
use crate::gateway::AddressGateway;
use crate::model::AddressId;
use tracing::{error, info, warn};

/// Delete the stored address `id` after the shopper confirms.
///
/// The only listed address can never be deleted: the shopper is alerted and the
/// gateway is not called. A failed call leaves the list untouched. Deleting the
/// selected address clears the selection.
pub async fn run<G: AddressGateway>(ctx: &CheckoutContext<G>, id: &AddressId) -> CmdResult {
    if ctx.list.len() <= 1 {
        warn!(id = %id, "refusing to delete the last address");
        ctx.prompter.alert(&ctx.config.last_address_message).await;
        return CmdResult::new(Outcome::Refused)
            .with_message(CmdMessage::warning(ctx.config.last_address_message.clone()));
    }

    if !ctx.prompter.confirm(&ctx.config.delete_confirm_message).await {
        return CmdResult::new(Outcome::Cancelled)
            .with_message(CmdMessage::info("Delete cancelled"));
    }

    match ctx.gateway.delete_address(id).await {
        Ok(response) if response.success => {
            let removed = ctx.list.find_by_id(id);
            let count = ctx.list.remove_by_id(id);
            info!(id = %id, removed = count, "address deleted");

            if let Some(address) = &removed {
                if ctx.active.key().as_ref() == Some(&address.key) {
                    info!(key = %address.key, "cleared selection of deleted address");
                    ctx.active.clear();
                }
            }
            CmdResult::new(Outcome::Deleted(id.clone()))
                .with_affected_addresses(removed.into_iter().collect())
                .with_message(CmdMessage::success(format!("Address deleted: {}", id)))
        }
        Ok(response) => {
            error!(
                id = %id,
                message = response.message.as_deref().unwrap_or(""),
                "address delete rejected"
            );
            CmdResult::new(Outcome::Failed(Failure::Rejected(response.message.clone())))
                .with_message(CmdMessage::error(format!(
                    "Address delete rejected: {}",
                    response.message.as_deref().unwrap_or("no reason given")
                )))
        }
        Err(e) => {
            error!(id = %id, error = %e, "address delete failed");
            CmdResult::new(Outcome::Failed(Failure::Transport(e.to_string())))
                .with_message(CmdMessage::error(format!("Address delete failed: {}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::{harness, harness_with};
    use crate::gateway::memory::FailureMode;
    use crate::model::Address;
    use crate::session::MemorySessionCache;
    use futures::executor::block_on;

    fn three() -> Vec<Address> {
        vec![
            Address::customer("1"),
            Address::customer("2"),
            Address::customer("3"),
        ]
    }

    fn listed_ids(h: &crate::context::test_support::Harness) -> Vec<String> {
        h.ctx
            .list
            .items()
            .into_iter()
            .filter_map(|a| a.customer_address_id.map(|id| id.to_string()))
            .collect()
    }

    #[test]
    fn last_address_alerts_and_skips_gateway() {
        let h = harness(vec![Address::customer("1")]);

        let result = block_on(run(&h.ctx, &AddressId::new("1")));

        assert_eq!(result.outcome, Outcome::Refused);
        assert_eq!(h.prompter.alerts(), vec!["You cannot delete the last address."]);
        assert!(h.prompter.confirms().is_empty());
        assert_eq!(h.gateway().call_count(), 0);
        assert_eq!(h.ctx.list.len(), 1);
    }

    #[test]
    fn empty_list_is_guarded_too() {
        let h = harness(vec![]);
        let result = block_on(run(&h.ctx, &AddressId::new("1")));
        assert_eq!(result.outcome, Outcome::Refused);
        assert_eq!(h.gateway().call_count(), 0);
    }

    #[test]
    fn declined_confirmation_does_nothing() {
        let h = harness_with(three(), MemorySessionCache::new(), false);

        let result = block_on(run(&h.ctx, &AddressId::new("2")));

        assert_eq!(result.outcome, Outcome::Cancelled);
        assert_eq!(
            h.prompter.confirms(),
            vec!["Are you sure you want to delete this address?"]
        );
        assert_eq!(h.gateway().call_count(), 0);
        assert_eq!(h.ctx.list.len(), 3);
    }

    #[test]
    fn success_removes_exactly_the_matching_item() {
        let h = harness(three());

        let result = block_on(run(&h.ctx, &AddressId::new("2")));

        assert_eq!(result.outcome, Outcome::Deleted(AddressId::new("2")));
        assert_eq!(listed_ids(&h), vec!["1", "3"]);
        assert_eq!(result.affected_addresses, vec![Address::customer("2")]);
    }

    #[test]
    fn deleting_selected_address_clears_selection() {
        let h = harness(three());
        h.ctx.active.publish(Address::customer("2"));

        block_on(run(&h.ctx, &AddressId::new("2")));

        assert!(h.ctx.active.current().is_none());
    }

    #[test]
    fn deleting_other_address_keeps_selection() {
        let h = harness(three());
        h.ctx.active.publish(Address::customer("1"));

        block_on(run(&h.ctx, &AddressId::new("2")));

        assert_eq!(h.ctx.active.current(), Some(Address::customer("1")));
    }

    #[test]
    fn rejection_keeps_item() {
        let h = harness(three());
        h.gateway().set_failure_mode(FailureMode::Reject);

        let result = block_on(run(&h.ctx, &AddressId::new("2")));

        assert!(result.is_failure());
        assert_eq!(listed_ids(&h), vec!["1", "2", "3"]);
    }

    #[test]
    fn transport_error_keeps_item() {
        let h = harness(three());
        h.gateway().set_failure_mode(FailureMode::Transport);

        let result = block_on(run(&h.ctx, &AddressId::new("3")));

        assert!(matches!(
            result.outcome,
            Outcome::Failed(Failure::Transport(_))
        ));
        assert_eq!(h.ctx.list.len(), 3);
    }
}
