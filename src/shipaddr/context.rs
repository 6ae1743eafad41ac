//! # Checkout Context
//!
//! Everything a rendered address shares with its siblings, bundled and injected:
//! reactive state (active address, popup, list), the single edit form, reference data,
//! messages, and the host collaborators.
//!
//! Renderers hold an `Rc<CheckoutContext<G>>`. The context is generic over the gateway
//! so tests and hosts can inspect the concrete backend after a run; the page, prompter
//! and session cache are trait objects.

use crate::attributes::OptionTable;
use crate::config::CheckoutConfig;
use crate::country::CountryDirectory;
use crate::error::Result;
use crate::form::{AddressForm, AddressFormBinder, SharedForm};
use crate::gateway::AddressGateway;
use crate::host::{HostPage, Prompter};
use crate::list::AddressList;
use crate::model::{Address, AddressKey};
use crate::session::SessionCache;
use crate::state::{ActiveShippingAddress, FormPopupState};
use std::rc::Rc;
use tracing::{debug, info};

pub struct CheckoutContext<G: AddressGateway> {
    pub active: ActiveShippingAddress,
    pub popup: FormPopupState,
    pub form: SharedForm,
    pub list: AddressList,
    pub options: Rc<OptionTable>,
    pub countries: Rc<CountryDirectory>,
    pub config: CheckoutConfig,
    pub gateway: G,
    pub session: Rc<dyn SessionCache>,
    pub page: Rc<dyn HostPage>,
    pub prompter: Rc<dyn Prompter>,
}

impl<G: AddressGateway> CheckoutContext<G> {
    /// A context with an empty list, empty reference data, default config and the
    /// stock shipping form.
    pub fn new(
        gateway: G,
        session: Rc<dyn SessionCache>,
        page: Rc<dyn HostPage>,
        prompter: Rc<dyn Prompter>,
    ) -> Self {
        Self {
            active: ActiveShippingAddress::new(),
            popup: FormPopupState::new(),
            form: AddressForm::shipping().into_shared(),
            list: AddressList::default(),
            options: Rc::new(OptionTable::new()),
            countries: Rc::new(CountryDirectory::new()),
            config: CheckoutConfig::default(),
            gateway,
            session,
            page,
            prompter,
        }
    }

    pub fn with_addresses(self, addresses: Vec<Address>) -> Self {
        self.list.replace_all(addresses);
        self
    }

    pub fn with_options(mut self, options: OptionTable) -> Self {
        self.options = Rc::new(options);
        self
    }

    pub fn with_countries(mut self, countries: CountryDirectory) -> Self {
        self.countries = Rc::new(countries);
        self
    }

    pub fn with_config(mut self, config: CheckoutConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_form(mut self, form: AddressForm) -> Self {
        self.form = form.into_shared();
        self
    }

    pub fn into_shared(self) -> Rc<Self> {
        Rc::new(self)
    }

    pub fn binder(&self) -> AddressFormBinder {
        AddressFormBinder::new(&self.config)
    }

    /// Re-publish the address whose key the session cache remembers.
    ///
    /// Returns the restored key, or `None` when nothing was cached or the cached key no
    /// longer matches any listed address.
    pub fn restore_selection(&self) -> Result<Option<AddressKey>> {
        let Some(key) = self.session.selected_shipping_address()? else {
            return Ok(None);
        };
        match self.list.find(&key) {
            Some(address) => {
                info!(key = %key, "restored shipping address selection");
                self.active.publish(address);
                Ok(Some(key))
            }
            None => {
                debug!(key = %key, "cached selection no longer listed");
                Ok(None)
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::harness;
    use super::*;

    #[test]
    fn restore_selection_publishes_cached_key() {
        let h = harness(vec![Address::customer("1"), Address::customer("2")]);
        let key = AddressKey::new("customer-address2");
        h.session.set_selected_shipping_address(&key).unwrap();

        assert_eq!(h.ctx.restore_selection().unwrap(), Some(key.clone()));
        assert_eq!(h.ctx.active.key(), Some(key));
    }

    #[test]
    fn restore_selection_ignores_unlisted_key() {
        let h = harness(vec![Address::customer("1")]);
        h.session
            .set_selected_shipping_address(&AddressKey::new("customer-address9"))
            .unwrap();

        assert_eq!(h.ctx.restore_selection().unwrap(), None);
        assert!(h.ctx.active.current().is_none());
    }

    #[test]
    fn restore_selection_without_cache_is_noop() {
        let h = harness(vec![Address::customer("1")]);
        assert_eq!(h.ctx.restore_selection().unwrap(), None);
        assert_eq!(h.ctx.active.version(), 0);
    }
}
