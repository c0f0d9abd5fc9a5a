//! Data models for the term catalog

use serde::{Deserialize, Serialize};

/// A canonical dictionary entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    /// Stable unique identifier (e.g. "wrath-of-god")
    pub id: String,
    /// Display text, stored as `term` in the catalog file
    #[serde(rename = "term")]
    pub name: String,
    #[serde(default)]
    pub short_definition: String,
    #[serde(default)]
    pub full_definition: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub non_example: String,
    /// Free-text labels, resolved lazily through the reference index
    #[serde(default)]
    pub see_also: Vec<String>,
    #[serde(default)]
    pub contrasts_with: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Term {
    /// Create a bare term with empty definitions
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            short_definition: String::new(),
            full_definition: String::new(),
            example: String::new(),
            non_example: String::new(),
            see_also: Vec::new(),
            contrasts_with: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Uppercased first character of the display name, used for A-Z navigation
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().and_then(|c| c.to_uppercase().next())
    }
}

/// On-disk shape of the bundled catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermsData {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub schema_version: String,
    #[serde(default)]
    pub sections_complete: Vec<String>,
    pub terms: Vec<Term>,
}

/// User input for creating or editing a custom term
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTermInput {
    #[serde(rename = "term")]
    pub name: String,
    pub short_definition: String,
    #[serde(default)]
    pub full_definition: String,
}

/// Partial update for a custom term; `None` leaves the field unchanged
#[derive(Debug, Clone, Default)]
pub struct CustomTermPatch {
    pub name: Option<String>,
    pub short_definition: Option<String>,
    pub full_definition: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_deserializes_catalog_shape() {
        let json = r#"{
            "id": "grace",
            "term": "Grace",
            "shortDefinition": "Unmerited favour.",
            "fullDefinition": "See *faith-alone.",
            "seeAlso": ["salvation"],
            "contrastsWith": ["works"],
            "tags": ["soteriology"]
        }"#;

        let term: Term = serde_json::from_str(json).unwrap();
        assert_eq!(term.name, "Grace");
        assert_eq!(term.see_also, vec!["salvation"]);
        assert!(term.example.is_empty());

        let back = serde_json::to_value(&term).unwrap();
        assert_eq!(back["term"], "Grace");
        assert_eq!(back["shortDefinition"], "Unmerited favour.");
    }

    #[test]
    fn test_initial() {
        assert_eq!(Term::new("a", "ark").initial(), Some('A'));
        assert_eq!(Term::new("b", "").initial(), None);
    }
}
