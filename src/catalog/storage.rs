//! Catalog loading and custom term storage
//!
//! Directory structure:
//! ```text
//! {data-dir}/
//! ├── terms.json           # Bundled catalog (or any path from config)
//! └── custom_terms.json    # User-created terms
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::models::{CustomTermInput, CustomTermPatch, Term, TermsData};
use crate::references::id_slug;

/// Id prefix reserved for user-created terms
pub const CUSTOM_PREFIX: &str = "custom-";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate term id: {0}")]
    DuplicateId(String),

    #[error("Term {0} has no name")]
    MissingName(String),

    #[error("Term not found: {0}")]
    NotFound(String),

    #[error("Term and short definition are required")]
    MissingField,

    #[error("Not a custom term id: {0}")]
    NotCustom(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Reject catalogs with duplicate ids or unnamed terms
pub fn validate_terms(terms: &[Term]) -> Result<()> {
    let mut seen = HashSet::with_capacity(terms.len());
    for term in terms {
        if term.name.trim().is_empty() {
            return Err(CatalogError::MissingName(term.id.clone()));
        }
        if !seen.insert(term.id.as_str()) {
            return Err(CatalogError::DuplicateId(term.id.clone()));
        }
    }
    Ok(())
}

/// Parse catalog JSON in the `{source, schemaVersion, terms}` shape
pub fn parse_catalog(content: &str) -> Result<TermsData> {
    let data: TermsData = serde_json::from_str(content)?;
    validate_terms(&data.terms)?;
    Ok(data)
}

/// Load and validate the catalog file at `path`
pub fn load_catalog(path: &Path) -> Result<Vec<Term>> {
    let content = fs::read_to_string(path)?;
    let data = parse_catalog(&content)?;
    log::info!(
        "Loaded {} terms from {:?} (schema {})",
        data.terms.len(),
        path,
        data.schema_version
    );
    Ok(data.terms)
}

pub fn is_custom_id(id: &str) -> bool {
    id.starts_with(CUSTOM_PREFIX)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCustomTerm {
    id: String,
    #[serde(rename = "term")]
    name: String,
    short_definition: String,
    #[serde(default)]
    full_definition: String,
    created_at: DateTime<Utc>,
}

impl StoredCustomTerm {
    fn to_term(&self) -> Term {
        let mut term = Term::new(self.id.clone(), self.name.trim());
        term.short_definition = self.short_definition.trim().to_string();
        term.full_definition = if self.full_definition.trim().is_empty() {
            term.short_definition.clone()
        } else {
            self.full_definition.trim().to_string()
        };
        term
    }
}

/// Storage for user-created terms, kept in one JSON array
pub struct CustomTermStorage {
    path: PathBuf,
}

impl CustomTermStorage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            path: data_dir.join("custom_terms.json"),
        }
    }

    fn read_all(&self) -> Result<Vec<StoredCustomTerm>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, terms: &[StoredCustomTerm]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(terms)?)?;
        Ok(())
    }

    /// All custom terms, sorted by name
    pub fn list(&self) -> Result<Vec<Term>> {
        let mut terms: Vec<Term> = self.read_all()?.iter().map(StoredCustomTerm::to_term).collect();
        terms.sort_by_cached_key(|t| t.name.to_lowercase());
        Ok(terms)
    }

    pub fn get(&self, id: &str) -> Result<Term> {
        self.read_all()?
            .iter()
            .find(|t| t.id == id)
            .map(StoredCustomTerm::to_term)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Next free id for `name`: `custom-{slug}`, then `-1`, `-2`, ...
    fn generate_id(name: &str, existing: &[StoredCustomTerm]) -> String {
        let slug = id_slug(name);
        let base = format!("{}{}", CUSTOM_PREFIX, if slug.is_empty() { "term" } else { &slug });

        let taken: HashSet<&str> = existing.iter().map(|t| t.id.as_str()).collect();
        if !taken.contains(base.as_str()) {
            return base;
        }

        let mut n = 1;
        loop {
            let candidate = format!("{}-{}", base, n);
            if !taken.contains(candidate.as_str()) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Add a custom term; name and short definition are required
    pub fn add(&self, input: CustomTermInput) -> Result<Term> {
        let name = input.name.trim();
        let short = input.short_definition.trim();
        if name.is_empty() || short.is_empty() {
            return Err(CatalogError::MissingField);
        }
        let full = match input.full_definition.trim() {
            "" => short,
            full => full,
        };

        let mut all = self.read_all()?;
        let stored = StoredCustomTerm {
            id: Self::generate_id(name, &all),
            name: name.to_string(),
            short_definition: short.to_string(),
            full_definition: full.to_string(),
            created_at: Utc::now(),
        };
        all.push(stored.clone());
        self.write_all(&all)?;

        log::info!("Added custom term {}", stored.id);
        Ok(stored.to_term())
    }

    /// Apply a partial update to a custom term
    pub fn update(&self, id: &str, patch: CustomTermPatch) -> Result<Term> {
        if !is_custom_id(id) {
            return Err(CatalogError::NotCustom(id.to_string()));
        }

        let mut all = self.read_all()?;
        let stored = all
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        let name = patch.name.as_deref().unwrap_or(&stored.name).trim().to_string();
        let short = patch
            .short_definition
            .as_deref()
            .unwrap_or(&stored.short_definition)
            .trim()
            .to_string();
        let full = patch
            .full_definition
            .as_deref()
            .unwrap_or(&stored.full_definition)
            .trim()
            .to_string();

        if name.is_empty() || short.is_empty() {
            return Err(CatalogError::MissingField);
        }

        stored.full_definition = if full.is_empty() { short.clone() } else { full };
        stored.name = name;
        stored.short_definition = short;
        let term = stored.to_term();

        self.write_all(&all)?;
        Ok(term)
    }

    /// Delete a custom term; returns false if nothing was removed
    pub fn delete(&self, id: &str) -> Result<bool> {
        if !is_custom_id(id) {
            return Ok(false);
        }

        let mut all = self.read_all()?;
        let before = all.len();
        all.retain(|t| t.id != id);
        if all.len() == before {
            return Ok(false);
        }

        self.write_all(&all)?;
        log::info!("Deleted custom term {}", id);
        Ok(true)
    }
}
