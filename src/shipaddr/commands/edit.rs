use crate::commands::{describe, CmdMessage, CmdResult, Outcome};
use crate::context::CheckoutContext;
use crate::gateway::AddressGateway;
use crate::model::Address;
use tracing::debug;

/// Start an edit session: show the popup, then load `address` into the shared form.
pub fn run<G: AddressGateway>(ctx: &CheckoutContext<G>, address: &Address) -> CmdResult {
    ctx.popup.open_for(address.clone());
    ctx.page.open_edit_surface();

    let report = ctx.binder().populate(&mut ctx.form.borrow_mut(), address);
    debug!(
        key = %address.key,
        fields = report.fields_populated,
        created = report.street_lines_created,
        "bound address to edit form"
    );

    CmdResult::new(Outcome::Editing(report))
        .with_affected_addresses(vec![address.clone()])
        .with_message(CmdMessage::info(format!(
            "Editing address: {}",
            describe(address)
        )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::harness;
    use crate::host::PageSignal;

    fn two_line_address() -> Address {
        let mut address = Address::customer("5");
        address.city = "Paris".into();
        address.street = vec!["10 Rue".into(), "Apt 3".into()];
        address
    }

    #[test]
    fn opens_popup_and_surface() {
        let h = harness(vec![two_line_address()]);
        run(&h.ctx, &two_line_address());

        assert!(h.ctx.popup.is_visible());
        assert_eq!(h.ctx.popup.editing(), Some(two_line_address()));
        assert_eq!(h.page.signals(), vec![PageSignal::OpenEditSurface]);
    }

    #[test]
    fn populates_shared_form() {
        let h = harness(vec![two_line_address()]);
        let result = run(&h.ctx, &two_line_address());

        let form = h.ctx.form.borrow();
        assert_eq!(form.value("city"), Some("Paris"));
        assert_eq!(form.street_lines(), vec!["10 Rue", "Apt 3"]);
        assert!(!form.footer_visible());
        assert!(form.update_control().is_some());
        match result.outcome {
            Outcome::Editing(report) => assert_eq!(report.street_lines_created, 1),
            other => panic!("Expected Editing, got {:?}", other),
        }
    }

    #[test]
    fn last_edit_wins() {
        let h = harness(vec![]);
        let mut other = Address::customer("6");
        other.city = "Lyon".into();

        run(&h.ctx, &two_line_address());
        run(&h.ctx, &other);

        assert_eq!(h.ctx.popup.editing().map(|a| a.city), Some("Lyon".into()));
        assert_eq!(h.ctx.form.borrow().value("city"), Some("Lyon"));
        assert_eq!(h.gateway().call_count(), 0);
    }
}
