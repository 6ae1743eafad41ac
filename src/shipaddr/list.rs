use crate::model::{Address, AddressId, AddressKey};
use crate::state::{Observable, Subscription};

/// Ordered collection behind the rendered address list.
///
/// The rendered list is a projection of this collection: removing an item here is how
/// an address disappears from the page.
#[derive(Clone, Debug, Default)]
pub struct AddressList {
    items: Observable<Vec<Address>>,
}

impl AddressList {
    pub fn new(addresses: Vec<Address>) -> Self {
        Self {
            items: Observable::new(addresses),
        }
    }

    pub fn len(&self) -> usize {
        self.items.with(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn items(&self) -> Vec<Address> {
        self.items.get()
    }

    pub fn get(&self, index: usize) -> Option<Address> {
        self.items.with(|items| items.get(index).cloned())
    }

    pub fn find(&self, key: &AddressKey) -> Option<Address> {
        self.items
            .with(|items| items.iter().find(|a| &a.key == key).cloned())
    }

    pub fn find_by_id(&self, id: &AddressId) -> Option<Address> {
        self.items.with(|items| {
            items
                .iter()
                .find(|a| a.customer_address_id.as_ref() == Some(id))
                .cloned()
        })
    }

    /// Remove every item stored under `id`. Returns how many were removed.
    pub fn remove_by_id(&self, id: &AddressId) -> usize {
        let matches = self.items.with(|items| {
            items
                .iter()
                .filter(|a| a.customer_address_id.as_ref() == Some(id))
                .count()
        });
        if matches > 0 {
            self.items
                .update(|items| items.retain(|a| a.customer_address_id.as_ref() != Some(id)));
        }
        matches
    }

    pub fn push(&self, address: Address) {
        self.items.update(|items| items.push(address));
    }

    pub fn replace_all(&self, addresses: Vec<Address>) {
        self.items.set(addresses);
    }

    pub fn subscribe(&self, callback: impl Fn(&[Address]) + 'static) -> Subscription {
        self.items.subscribe(move |items| callback(items))
    }
}
