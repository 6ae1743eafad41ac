//! Country code → display name, backed by the page's `directory-data` reference table.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const DIRECTORY_FILENAME: &str = "directory-data.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryEntry {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryDirectory {
    countries: HashMap<String, CountryEntry>,
}

impl CountryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_country(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.countries
            .insert(code.into(), CountryEntry { name: name.into() });
        self
    }

    /// Display name for `code`, or an empty string when the table has no entry.
    pub fn country_name(&self, code: &str) -> String {
        self.countries
            .get(code)
            .map(|entry| entry.name.clone())
            .unwrap_or_default()
    }

    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(DIRECTORY_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn known_code_resolves_to_name() {
        let directory = CountryDirectory::new().with_country("GB", "United Kingdom");
        assert_eq!(directory.country_name("GB"), "United Kingdom");
    }

    #[test]
    fn unknown_code_is_empty() {
        let directory = CountryDirectory::new().with_country("GB", "United Kingdom");
        assert_eq!(directory.country_name("FR"), "");
        assert_eq!(directory.country_name(""), "");
    }

    #[test]
    fn load_reads_directory_data() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(DIRECTORY_FILENAME),
            r#"{"US": {"name": "United States"}}"#,
        )
        .unwrap();
        let directory = CountryDirectory::load(dir.path()).unwrap();
        assert_eq!(directory.country_name("US"), "United States");
    }
}
