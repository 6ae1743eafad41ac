//! # Domain Model
//!
//! [`Address`] is the record a renderer displays and the form edits. Two identifiers
//! matter and they are not the same thing:
//!
//! - **Key** ([`AddressKey`]): the identity used for selection. Every address has one,
//!   including addresses that only exist in the browser session. Stored customer
//!   addresses use `customer-address{id}`; a not-yet-saved address uses
//!   `new-customer-address`.
//! - **Persistence id** ([`AddressId`]): only present once the address is stored by the
//!   backend. Update and delete are keyed by it.
//!
//! Custom attributes are schema-less extras. Their values arrive in a few shapes (see
//! [`AttributeValue`]); turning them into display text is the job of
//! [`crate::attributes::resolve_label`].

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

pub const NEW_ADDRESS_KEY: &str = "new-customer-address";
const CUSTOMER_ADDRESS_KEY_PREFIX: &str = "customer-address";

/// Identity key used to decide which address is selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressKey(String);

impl AddressKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn for_customer_address(id: &AddressId) -> Self {
        Self(format!("{}{}", CUSTOMER_ADDRESS_KEY_PREFIX, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AddressKey {
    fn default() -> Self {
        Self(NEW_ADDRESS_KEY.to_string())
    }
}

impl fmt::Display for AddressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AddressKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AddressKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Backend identifier of a stored address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressId(String);

impl AddressId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AddressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AddressId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AddressId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Raw value of a custom attribute.
///
/// Untagged so the JSON shapes the backend emits (`"x"`, `5`, `[12, 13]`,
/// `{"file": "..", "size": 1024}`) deserialize directly. Numbers and booleans are kept
/// in their JSON text form; `null` reads as an empty scalar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Scalar(#[serde(deserialize_with = "scalar_from_json")] String),
    List(#[serde(deserialize_with = "list_from_json")] Vec<String>),
    /// Free-form object. Keys are kept sorted, so joined output is ordered by key.
    Object(#[serde(deserialize_with = "object_from_json")] BTreeMap<String, String>),
}

/// Text of a JSON scalar. Arrays and objects are not scalars.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Scalar text, or the compact JSON of a nested value.
fn element_text(value: &Value) -> String {
    scalar_text(value).unwrap_or_else(|| value.to_string())
}

fn scalar_from_json<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    scalar_text(&value).ok_or_else(|| D::Error::custom("expected a scalar attribute value"))
}

fn list_from_json<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.iter().map(element_text).collect()),
        _ => Err(D::Error::custom("expected a list attribute value")),
    }
}

fn object_from_json<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map
            .iter()
            .map(|(key, value)| (key.clone(), element_text(value)))
            .collect()),
        _ => Err(D::Error::custom("expected an object attribute value")),
    }
}

impl AttributeValue {
    /// Raw text used when no better label exists.
    pub fn raw_text(&self) -> String {
        match self {
            AttributeValue::Scalar(s) => s.clone(),
            AttributeValue::List(items) => items.join(","),
            AttributeValue::Object(map) => map.values().cloned().collect::<Vec<_>>().join(","),
        }
    }
}

impl Default for AttributeValue {
    fn default() -> Self {
        AttributeValue::Scalar(String::new())
    }
}

/// Structured custom attribute as delivered with an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    pub attribute_code: String,
    #[serde(default)]
    pub value: AttributeValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomAttribute {
    Plain(#[serde(deserialize_with = "scalar_from_json")] String),
    Described(AttributeDescriptor),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub key: AddressKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_address_id: Option<AddressId>,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub street: Vec<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub region_id: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub country_id: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub custom_attributes: BTreeMap<String, CustomAttribute>,
}

/// Names of the scalar fields a form can bind by name.
pub const SCALAR_FIELDS: &[&str] = &[
    "firstname",
    "lastname",
    "company",
    "city",
    "region",
    "region_id",
    "postcode",
    "country_id",
    "telephone",
];

impl Address {
    /// A stored customer address: key derived from the persistence id.
    pub fn customer(id: impl Into<AddressId>) -> Self {
        let id = id.into();
        Self {
            key: AddressKey::for_customer_address(&id),
            customer_address_id: Some(id),
            ..Default::default()
        }
    }

    /// An address that only exists in the checkout session.
    pub fn unsaved() -> Self {
        Self::default()
    }

    pub fn is_persisted(&self) -> bool {
        self.customer_address_id.is_some()
    }

    pub fn full_name(&self) -> String {
        match (self.firstname.is_empty(), self.lastname.is_empty()) {
            (false, false) => format!("{} {}", self.firstname, self.lastname),
            (false, true) => self.firstname.clone(),
            (true, false) => self.lastname.clone(),
            (true, true) => String::new(),
        }
    }

    /// Value of a scalar field by its form name.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "firstname" => &self.firstname,
            "lastname" => &self.lastname,
            "company" => &self.company,
            "city" => &self.city,
            "region" => &self.region,
            "region_id" => &self.region_id,
            "postcode" => &self.postcode,
            "country_id" => &self.country_id,
            "telephone" => &self.telephone,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Set a scalar field by its form name. Returns false for unknown names.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        let slot = match name {
            "firstname" => &mut self.firstname,
            "lastname" => &mut self.lastname,
            "company" => &mut self.company,
            "city" => &mut self.city,
            "region" => &mut self.region,
            "region_id" => &mut self.region_id,
            "postcode" => &mut self.postcode,
            "country_id" => &mut self.country_id,
            "telephone" => &mut self.telephone,
            _ => return false,
        };
        *slot = value.into();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_address_key_derives_from_id() {
        let address = Address::customer("17");
        assert_eq!(address.key.as_str(), "customer-address17");
        assert_eq!(address.customer_address_id, Some(AddressId::new("17")));
        assert!(address.is_persisted());
    }

    #[test]
    fn unsaved_address_has_new_key_and_no_id() {
        let address = Address::unsaved();
        assert_eq!(address.key.as_str(), NEW_ADDRESS_KEY);
        assert!(!address.is_persisted());
    }

    #[test]
    fn field_lookup_covers_scalar_fields() {
        let mut address = Address::customer("1");
        for name in SCALAR_FIELDS {
            assert!(address.set_field(name, format!("v-{}", name)));
        }
        assert_eq!(address.field("city"), Some("v-city"));
        assert_eq!(address.field("country_id"), Some("v-country_id"));
        assert_eq!(address.field("street"), None);
        assert!(!address.set_field("street", "x"));
    }

    #[test]
    fn custom_attribute_shapes_deserialize() {
        let json = r#"{
            "key": "customer-address3",
            "customer_address_id": "3",
            "custom_attributes": {
                "nickname": "Home",
                "colors": {"attribute_code": "colors", "value": ["red", "blue"]},
                "proof": {"attribute_code": "proof", "value": {"file": "proof.pdf"}},
                "gate": {"attribute_code": "gate", "value": "4", "label": "Gate 4"}
            }
        }"#;
        let address: Address = serde_json::from_str(json).unwrap();
        assert_eq!(
            address.custom_attributes["nickname"],
            CustomAttribute::Plain("Home".into())
        );
        match &address.custom_attributes["colors"] {
            CustomAttribute::Described(d) => {
                assert_eq!(d.value, AttributeValue::List(vec!["red".into(), "blue".into()]))
            }
            other => panic!("Expected described attribute, got {:?}", other),
        }
        match &address.custom_attributes["proof"] {
            CustomAttribute::Described(d) => {
                assert!(matches!(d.value, AttributeValue::Object(_)))
            }
            other => panic!("Expected described attribute, got {:?}", other),
        }
        match &address.custom_attributes["gate"] {
            CustomAttribute::Described(d) => assert_eq!(d.label.as_deref(), Some("Gate 4")),
            other => panic!("Expected described attribute, got {:?}", other),
        }
    }

    fn single_attribute(json_value: &str) -> CustomAttribute {
        let json = format!(
            r#"{{"key": "customer-address1", "custom_attributes": {{"a": {}}}}}"#,
            json_value
        );
        let address: Address = serde_json::from_str(&json).unwrap();
        address.custom_attributes["a"].clone()
    }

    fn value_of(attribute: CustomAttribute) -> AttributeValue {
        match attribute {
            CustomAttribute::Described(d) => d.value,
            other => panic!("Expected described attribute, got {:?}", other),
        }
    }

    #[test]
    fn numeric_scalar_value_reads_as_text() {
        let attribute = single_attribute(r#"{"attribute_code": "floor", "value": 5}"#);
        assert_eq!(value_of(attribute), AttributeValue::Scalar("5".into()));
    }

    #[test]
    fn numeric_list_value_reads_as_text() {
        let attribute = single_attribute(r#"{"attribute_code": "tags", "value": [12, 13]}"#);
        assert_eq!(
            value_of(attribute),
            AttributeValue::List(vec!["12".into(), "13".into()])
        );
    }

    #[test]
    fn file_object_with_numeric_members_reads() {
        let attribute = single_attribute(
            r#"{"attribute_code": "proof", "value": {"file": "a.pdf", "size": 1024}}"#,
        );
        let mut expected = BTreeMap::new();
        expected.insert("file".to_string(), "a.pdf".to_string());
        expected.insert("size".to_string(), "1024".to_string());
        assert_eq!(value_of(attribute), AttributeValue::Object(expected));
    }

    #[test]
    fn bool_and_null_values_read() {
        let gift = single_attribute(r#"{"attribute_code": "gift", "value": true}"#);
        assert_eq!(value_of(gift), AttributeValue::Scalar("true".into()));
        let empty = single_attribute(r#"{"attribute_code": "gift", "value": null}"#);
        assert_eq!(value_of(empty), AttributeValue::Scalar(String::new()));
    }

    #[test]
    fn bare_number_attribute_is_plain() {
        assert_eq!(single_attribute("42"), CustomAttribute::Plain("42".into()));
    }

    #[test]
    fn full_name_joins_present_parts() {
        let mut address = Address::unsaved();
        assert_eq!(address.full_name(), "");
        address.firstname = "Ada".into();
        assert_eq!(address.full_name(), "Ada");
        address.lastname = "Lovelace".into();
        assert_eq!(address.full_name(), "Ada Lovelace");
    }
}
