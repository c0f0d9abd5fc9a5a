use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use theologia_lib::catalog::{
    load_catalog, validate_terms, CatalogHandle, CatalogSnapshot, CustomTermStorage, Term,
};
use theologia_lib::config::AppConfig;
use theologia_lib::study::StudyStorage;

/// Shared application state for CLI commands
pub struct App {
    pub config: AppConfig,
    pub catalog: CatalogHandle,
    pub custom_terms: CustomTermStorage,
    pub study: StudyStorage,
    catalog_path: PathBuf,
}

impl App {
    /// Initialize from the data directory (platform default unless overridden)
    pub fn new(data_dir: Option<PathBuf>, catalog_override: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => AppConfig::default_data_dir().context("Failed to get data directory")?,
        };

        let config = AppConfig::load(&data_dir).context("Failed to load config")?;
        let catalog_path = catalog_override.unwrap_or_else(|| config.catalog_path(&data_dir));

        let app = Self {
            config,
            catalog: CatalogHandle::default(),
            custom_terms: CustomTermStorage::new(data_dir.clone()),
            study: StudyStorage::new(data_dir),
            catalog_path,
        };
        app.reload_catalog()?;
        Ok(app)
    }

    /// Rebuild the snapshot from the catalog file plus custom terms
    pub fn reload_catalog(&self) -> Result<Arc<CatalogSnapshot>> {
        let catalog = load_catalog(&self.catalog_path)
            .with_context(|| format!("Failed to load catalog from {:?}", self.catalog_path))?;
        let custom = self.custom_terms.list().context("Failed to read custom terms")?;

        let combined: Vec<Term> = catalog.iter().chain(&custom).cloned().collect();
        validate_terms(&combined).context("Custom terms clash with the catalog")?;

        // Custom terms are browsable but never become link targets
        Ok(self.catalog.replace_with_custom(catalog, custom))
    }

    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.catalog.current()
    }

    /// Find a term by id, falling back to reference resolution
    pub fn find_term(&self, reference: &str) -> Result<Term> {
        let snapshot = self.snapshot();
        if let Some(term) = snapshot.get(reference) {
            return Ok(term.clone());
        }
        match snapshot.resolve_term(reference) {
            Some(term) => Ok(term.clone()),
            None => bail!("No term matching '{}'", reference),
        }
    }
}
