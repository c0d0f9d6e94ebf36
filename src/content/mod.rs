use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

use crate::models::{Category, CategoryId, Subtopic, SubtopicId};
use crate::utils::AppError;

/// Catalog bundled with the application, adapted from the clinical content tree.
const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Read-only source of the category → subtopic → slides tree.
///
/// The playback core only ever consumes ordered slide sequences from here;
/// everything behind this trait is replaceable (bundled data, a file on disk,
/// a remote service).
pub trait ContentProvider {
    fn categories(&self) -> &[Category];

    fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories().iter().find(|c| &c.id == id)
    }

    /// Look up a subtopic within a category, searching direct subtopics first
    /// and then one level of nested children.
    fn subtopic(&self, category_id: &CategoryId, subtopic_id: &SubtopicId) -> Option<&Subtopic> {
        let category = self.category(category_id)?;
        if let Some(direct) = category.subtopics.iter().find(|s| &s.id == subtopic_id) {
            return Some(direct);
        }
        category
            .subtopics
            .iter()
            .flat_map(|s| s.children.iter())
            .find(|child| &child.id == subtopic_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

impl Catalog {
    /// Parse a catalog from a JSON document and sanity-check slide ids.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.warn_on_duplicate_slide_ids();
        debug!("Catalog loaded with {} categories", catalog.categories.len());
        Ok(catalog)
    }

    /// The catalog compiled into the binary.
    pub fn bundled() -> Result<Self, AppError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Slide ids must be unique within one sequence. Violations are logged,
    /// not fatal: the carousel keys activation off indices, not ids.
    fn warn_on_duplicate_slide_ids(&self) {
        for category in &self.categories {
            for subtopic in category
                .subtopics
                .iter()
                .flat_map(|s| std::iter::once(s).chain(s.children.iter()))
            {
                let mut seen = HashSet::new();
                for slide in &subtopic.slides {
                    if !seen.insert(slide.id().as_str()) {
                        warn!(
                            "Duplicate slide id '{}' in subtopic '{}'",
                            slide.id(),
                            subtopic.id
                        );
                    }
                }
            }
        }
    }
}

impl ContentProvider for Catalog {
    fn categories(&self) -> &[Category] {
        &self.categories
    }
}
