use super::{apply_form_entries, AddressGateway, GatewayResponse};
use crate::error::{AddressError, Result};
use crate::form::FormEntry;
use crate::model::{Address, AddressId, AddressKey};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

const ADDRESS_BOOK_FILENAME: &str = "addresses.json";

/// Address book kept as a JSON array in `<root>/addresses.json`.
///
/// Order in the file is display order. Every operation reloads the file, so several
/// processes working on the same directory see each other's writes.
pub struct FileGateway {
    root: PathBuf,
}

impl FileGateway {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn list(&self) -> Result<Vec<Address>> {
        let path = self.root.join(ADDRESS_BOOK_FILENAME);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path).map_err(AddressError::Io)?;
        let book: Vec<Address> =
            serde_json::from_str(&content).map_err(AddressError::Serialization)?;
        Ok(book)
    }

    /// Store a new address. A missing persistence id is generated and the key is
    /// derived from it.
    pub fn insert(&self, mut address: Address) -> Result<Address> {
        let mut book = self.list()?;

        let id = match address.customer_address_id.take() {
            Some(id) => id,
            None => AddressId::new(Uuid::new_v4().simple().to_string()),
        };
        if book
            .iter()
            .any(|a| a.customer_address_id.as_ref() == Some(&id))
        {
            return Err(AddressError::Store(format!(
                "Address id already exists: {}",
                id
            )));
        }
        address.key = AddressKey::for_customer_address(&id);
        address.customer_address_id = Some(id);

        book.push(address.clone());
        self.save(&book)?;
        debug!(key = %address.key, "inserted address");
        Ok(address)
    }

    pub fn get(&self, id: &AddressId) -> Result<Address> {
        self.list()?
            .into_iter()
            .find(|a| a.customer_address_id.as_ref() == Some(id))
            .ok_or_else(|| AddressError::AddressNotFound(id.clone()))
    }

    fn save(&self, book: &[Address]) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(AddressError::Io)?;
        }
        let content = serde_json::to_string_pretty(book).map_err(AddressError::Serialization)?;
        fs::write(self.root.join(ADDRESS_BOOK_FILENAME), content).map_err(AddressError::Io)?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl AddressGateway for FileGateway {
    async fn update_address(
        &self,
        id: &AddressId,
        fields: &[FormEntry],
    ) -> Result<GatewayResponse> {
        let mut book = self.list()?;
        let Some(address) = book
            .iter_mut()
            .find(|a| a.customer_address_id.as_ref() == Some(id))
        else {
            return Ok(GatewayResponse::rejected(format!(
                "Address not found: {}",
                id
            )));
        };
        apply_form_entries(address, fields);
        self.save(&book)?;
        Ok(GatewayResponse::ok())
    }

    async fn delete_address(&self, id: &AddressId) -> Result<GatewayResponse> {
        let mut book = self.list()?;
        let before = book.len();
        book.retain(|a| a.customer_address_id.as_ref() != Some(id));
        if book.len() == before {
            return Ok(GatewayResponse::rejected(format!(
                "Address not found: {}",
                id
            )));
        }
        self.save(&book)?;
        Ok(GatewayResponse::ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use tempfile::TempDir;

    fn gateway() -> (TempDir, FileGateway) {
        let dir = TempDir::new().unwrap();
        let gateway = FileGateway::new(dir.path().join("data"));
        (dir, gateway)
    }

    #[test]
    fn empty_book_when_file_missing() {
        let (_dir, gateway) = gateway();
        assert!(gateway.list().unwrap().is_empty());
    }

    #[test]
    fn insert_generates_id_and_key() {
        let (_dir, gateway) = gateway();
        let mut address = Address::unsaved();
        address.city = "Oslo".into();

        let stored = gateway.insert(address).unwrap();
        let id = stored.customer_address_id.clone().unwrap();
        assert_eq!(stored.key, AddressKey::for_customer_address(&id));
        assert_eq!(gateway.list().unwrap(), vec![stored]);
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let (_dir, gateway) = gateway();
        gateway.insert(Address::customer("1")).unwrap();
        assert!(gateway.insert(Address::customer("1")).is_err());
    }

    #[test]
    fn update_persists_form_entries() {
        let (_dir, gateway) = gateway();
        gateway.insert(Address::customer("1")).unwrap();
        let id = AddressId::new("1");

        let entries = vec![
            FormEntry::new("city", "Bergen"),
            FormEntry::new("street[0]", "Bryggen 1"),
        ];
        let response = block_on(gateway.update_address(&id, &entries)).unwrap();
        assert!(response.success);

        let stored = gateway.get(&id).unwrap();
        assert_eq!(stored.city, "Bergen");
        assert_eq!(stored.street, vec!["Bryggen 1"]);
    }

    #[test]
    fn delete_unknown_is_rejected_and_known_removed() {
        let (_dir, gateway) = gateway();
        gateway.insert(Address::customer("1")).unwrap();

        let missing = block_on(gateway.delete_address(&AddressId::new("2"))).unwrap();
        assert!(!missing.success);

        let removed = block_on(gateway.delete_address(&AddressId::new("1"))).unwrap();
        assert!(removed.success);
        assert!(gateway.list().unwrap().is_empty());
    }

    #[test]
    fn get_missing_is_not_found() {
        let (_dir, gateway) = gateway();
        let result = gateway.get(&AddressId::new("x"));
        assert!(matches!(result, Err(AddressError::AddressNotFound(_))));
    }
}
