//! In-memory module catalog, filled from the built-in seed and JSON files.
//!
//! - K_i: Records keep the order they were added in
//! - B_i: Configured paths exist and hold valid catalog JSON (might fail)
//! - I^R: Which files to load is configured by the user

use super::{CatalogFile, ModuleCatalog, ModuleQuestion, seed_catalog};
use crate::models::{
    AssessmentCriterion, Config, ConfigError, ExamgenError, GenerationContext, LearningOutcome, Result,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Catalog holding every record in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    learning_outcomes: Vec<LearningOutcome>,
    assessment_criteria: Vec<AssessmentCriterion>,
    questions: Vec<ModuleQuestion>,
}

impl InMemoryCatalog {
    /// Catalog holding only the built-in demo module.
    pub fn seeded() -> Self {
        let mut catalog = Self::default();
        catalog.extend(seed_catalog());
        catalog
    }

    /// Build the catalog described by the configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut catalog = if config.catalog.include_seed {
            Self::seeded()
        } else {
            Self::default()
        };

        for path in config.catalog_paths() {
            catalog.load_path(&path)?;
        }

        info!(
            modules = catalog.module_ids().len(),
            questions = catalog.questions.len(),
            "Catalog ready"
        );
        Ok(catalog)
    }

    /// Append all records of a catalog file.
    pub fn extend(&mut self, file: CatalogFile) {
        self.learning_outcomes.extend(file.learning_outcomes);
        self.assessment_criteria.extend(file.assessment_criteria);
        self.questions.extend(file.questions);
    }

    /// Load a catalog file, or every `*.json` file of a directory in name
    /// order.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ConfigError::CatalogPathMissing(path.to_owned()).into());
        }

        let files = if path.is_dir() {
            json_files_in(path)?
        } else {
            vec![path.to_owned()]
        };

        for file in files {
            self.extend(read_catalog_file(&file)?);
        }
        Ok(())
    }
}

/// Sorted `*.json` files directly inside `dir`.
fn json_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join("*.json");
    let pattern = pattern.to_string_lossy();

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)
        .map_err(|e| ExamgenError::InvalidInput(format!("Bad catalog pattern {}: {}", pattern, e)))?
    {
        let file = entry.map_err(|e| {
            let context = format!("listing catalog directory {}", dir.display());
            ExamgenError::io(context, std::io::Error::from(e))
        })?;
        files.push(file);
    }
    files.sort();

    debug!(dir = %dir.display(), files = files.len(), "Found catalog files");
    Ok(files)
}

/// Parse one catalog file.
pub fn read_catalog_file(path: &Path) -> Result<CatalogFile> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ExamgenError::io(format!("reading catalog file {}", path.display()), e)
    })?;
    let file: CatalogFile = serde_json::from_str(&content)
        .map_err(|e| ExamgenError::parse(path.display().to_string(), e))?;

    debug!(
        path = %path.display(),
        learning_outcomes = file.learning_outcomes.len(),
        assessment_criteria = file.assessment_criteria.len(),
        questions = file.questions.len(),
        "Loaded catalog file"
    );
    Ok(file)
}

impl ModuleCatalog for InMemoryCatalog {
    fn resolve(&self, module_id: &str) -> Option<GenerationContext> {
        let learning_outcomes: Vec<LearningOutcome> = self
            .learning_outcomes
            .iter()
            .filter(|lo| lo.module_id == module_id)
            .cloned()
            .collect();
        if learning_outcomes.is_empty() {
            return None;
        }

        let lo_ids: HashSet<&str> = learning_outcomes.iter().map(|lo| lo.id.as_str()).collect();
        let assessment_criteria: Vec<AssessmentCriterion> = self
            .assessment_criteria
            .iter()
            .filter(|ce| lo_ids.contains(ce.learning_outcome_id.as_str()))
            .cloned()
            .collect();

        let ce_ids: HashSet<&str> = assessment_criteria.iter().map(|ce| ce.id.as_str()).collect();
        let available_questions = self
            .questions
            .iter()
            .filter(|stored| stored.module_id == module_id)
            .map(|stored| &stored.question)
            .filter(|q| q.ce_ids.iter().any(|ce_id| ce_ids.contains(ce_id.as_str())))
            .cloned()
            .collect();

        Some(GenerationContext {
            learning_outcomes,
            assessment_criteria,
            available_questions,
        })
    }

    fn module_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.learning_outcomes
            .iter()
            .filter(|lo| seen.insert(lo.module_id.as_str()))
            .map(|lo| lo.module_id.clone())
            .collect()
    }
}
