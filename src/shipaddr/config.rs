use crate::error::{AddressError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Checkout copy and field names, stored in `<data dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Asked before deleting an address
    #[serde(default = "default_delete_confirm_message")]
    pub delete_confirm_message: String,

    /// Shown when the shopper tries to delete their only address
    #[serde(default = "default_last_address_message")]
    pub last_address_message: String,

    /// Label of the control that submits an edit session
    #[serde(default = "default_update_button_label")]
    pub update_button_label: String,

    /// Name under which the persistence id is appended to submitted form data
    #[serde(default = "default_address_id_field")]
    pub address_id_field: String,
}

fn default_delete_confirm_message() -> String {
    "Are you sure you want to delete this address?".to_string()
}

fn default_last_address_message() -> String {
    "You cannot delete the last address.".to_string()
}

fn default_update_button_label() -> String {
    "Update Address".to_string()
}

fn default_address_id_field() -> String {
    "address_id".to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            delete_confirm_message: default_delete_confirm_message(),
            last_address_message: default_last_address_message(),
            update_button_label: default_update_button_label(),
            address_id_field: default_address_id_field(),
        }
    }
}

/// Keys accepted by [`CheckoutConfig::get`] and [`CheckoutConfig::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "delete-confirm-message",
    "last-address-message",
    "update-button-label",
    "address-id-field",
];

impl CheckoutConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: CheckoutConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "delete-confirm-message" => &self.delete_confirm_message,
            "last-address-message" => &self.last_address_message,
            "update-button-label" => &self.update_button_label,
            "address-id-field" => &self.address_id_field,
            _ => return None,
        };
        Some(value.as_str())
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let slot = match key {
            "delete-confirm-message" => &mut self.delete_confirm_message,
            "last-address-message" => &mut self.last_address_message,
            "update-button-label" => &mut self.update_button_label,
            "address-id-field" => &mut self.address_id_field,
            other => {
                return Err(AddressError::Store(format!(
                    "Unknown config key: {}",
                    other
                )))
            }
        };
        *slot = value.into();
        Ok(())
    }
}
