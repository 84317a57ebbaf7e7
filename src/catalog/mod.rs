pub mod defaults;
pub mod schema;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::{CatalogError, EngineError};
use crate::questions::{QuestionSet, INTERESTS};

pub use schema::{Attribute, Category, CategoryParseError, Exclusion, PriorityTier, Scheme};

#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    schemes: Vec<Scheme>,
}

/// Immutable scheme list. Declaration order is the ranking tie-break order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemeCatalog {
    schemes: Vec<Scheme>,
}

impl SchemeCatalog {
    pub fn new(schemes: Vec<Scheme>) -> Result<Self, CatalogError> {
        for (idx, scheme) in schemes.iter().enumerate() {
            if schemes[..idx].iter().any(|s| s.id == scheme.id) {
                return Err(CatalogError::DuplicateScheme(scheme.id.clone()));
            }
        }
        let catalog = Self { schemes };
        catalog.flag_unruled();
        Ok(catalog)
    }

    pub fn with_defaults() -> Self {
        let catalog = Self {
            schemes: defaults::default_schemes(),
        };
        catalog.flag_unruled();
        catalog
    }

    fn flag_unruled(&self) {
        let unruled: Vec<&str> = self.unruled().iter().map(|s| s.id.as_str()).collect();
        if !unruled.is_empty() {
            info!(
                count = unruled.len(),
                schemes = %unruled.join(", "),
                "schemes without eligibility rules are treated as open to all"
            );
        }
    }

    pub fn from_toml_str(data: &str, origin: &str) -> Result<Self, CatalogError> {
        let parsed: CatalogFile = toml::from_str(data).map_err(|source| CatalogError::Parse {
            path: origin.to_string(),
            source,
        })?;
        Self::new(parsed.schemes)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, CatalogError> {
        let data = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&data, &path.display().to_string())
    }

    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&Scheme> {
        self.schemes.iter().find(|s| s.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&Scheme, EngineError> {
        self.by_id(id)
            .ok_or_else(|| EngineError::UnknownScheme(id.to_string()))
    }

    pub fn search(&self, category: Option<Category>, text: Option<&str>) -> Vec<&Scheme> {
        self.schemes
            .iter()
            .filter(|s| category.map(|c| s.category == c).unwrap_or(true))
            .filter(|s| text.map(|t| s.matches_text(t)).unwrap_or(true))
            .collect()
    }

    /// Schemes for which [`Scheme::is_unruled`] holds, in catalog order.
    pub fn unruled(&self) -> Vec<&Scheme> {
        self.schemes.iter().filter(|s| s.is_unruled()).collect()
    }

    pub fn fingerprint(&self) -> String {
        let canonical = serde_json::to_string(&self.schemes).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Checks every rule and interest tag against the questionnaire domains.
    pub fn validate(&self, questions: &QuestionSet) -> Result<(), CatalogError> {
        for scheme in &self.schemes {
            let rules = scheme
                .exclusions
                .iter()
                .map(|e| (e.attribute.question_id(), &e.excluded))
                .chain(
                    scheme
                        .priority_tiers
                        .iter()
                        .map(|t| (t.attribute.question_id(), &t.values)),
                )
                .chain(std::iter::once((INTERESTS, &scheme.interest_tags)));
            for (question_id, values) in rules {
                let question =
                    questions
                        .by_id(question_id)
                        .ok_or_else(|| CatalogError::UnknownRuleTarget {
                            scheme_id: scheme.id.clone(),
                            question_id: question_id.to_string(),
                        })?;
                if let Some(value) = values.iter().find(|v| !question.accepts(v)) {
                    return Err(CatalogError::UnknownRuleValue {
                        scheme_id: scheme.id.clone(),
                        question_id: question_id.to_string(),
                        value: value.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for SchemeCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}
