//! Option tables for custom attributes.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const OPTIONS_FILENAME: &str = "custom-attributes.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeOption {
    pub value: String,
    pub label: String,
}

impl AttributeOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Attribute code → defined options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionTable {
    options: HashMap<String, Vec<AttributeOption>>,
}

impl OptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, code: impl Into<String>, options: Vec<AttributeOption>) -> Self {
        self.options.insert(code.into(), options);
        self
    }

    /// Whether the table defines options for this attribute code at all.
    pub fn has_code(&self, code: &str) -> bool {
        self.options.contains_key(code)
    }

    /// Label of the first option whose value equals `value`.
    pub fn option_label(&self, code: &str, value: &str) -> Option<&str> {
        self.options
            .get(code)?
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label.as_str())
    }

    /// Load `custom-attributes.json` from `dir`, or an empty table if absent.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(OPTIONS_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
