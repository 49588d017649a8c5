//! Domain entities: manifest data structures

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// One line item of a hierarchy manifest.
///
/// Entries with a `cost` become leaves, entries without one become containers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<i64>,
    /// Name of the containing entry, None for roots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl ManifestEntry {
    pub fn leaf(name: impl Into<String>, cost: i64, parent: Option<&str>) -> Self {
        Self {
            name: name.into(),
            cost: Some(cost),
            parent: parent.map(str::to_string),
        }
    }

    pub fn container(name: impl Into<String>, parent: Option<&str>) -> Self {
        Self {
            name: name.into(),
            cost: None,
            parent: parent.map(str::to_string),
        }
    }

    pub fn is_container(&self) -> bool {
        self.cost.is_none()
    }
}

/// Flat description of one or more hierarchies.
///
/// ```toml
/// [[entry]]
/// name = "shipment"
///
/// [[entry]]
/// name = "Item 1"
/// cost = 10
/// parent = "shipment"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "entry")]
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }

    /// Parse manifest TOML content.
    pub fn parse(content: &str) -> Result<Self, DomainError> {
        toml::from_str(content).map_err(|e| DomainError::InvalidManifest {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_manifest_toml_when_parse_then_reads_entries_in_order() {
        let content = r#"
[[entry]]
name = "box"

[[entry]]
name = "Item 1"
cost = 10
parent = "box"
"#;
        let manifest = Manifest::parse(content).unwrap();

        assert_eq!(
            manifest.entries,
            vec![
                ManifestEntry::container("box", None),
                ManifestEntry::leaf("Item 1", 10, Some("box")),
            ]
        );
        assert!(manifest.entries[0].is_container());
    }

    #[test]
    fn given_invalid_toml_when_parse_then_invalid_manifest() {
        let result = Manifest::parse("[[entry]]\ncost = 3\n");
        assert!(matches!(result, Err(DomainError::InvalidManifest { .. })));
    }

    #[test]
    fn given_empty_content_when_parse_then_no_entries() {
        assert!(Manifest::parse("").unwrap().entries.is_empty());
    }
}
