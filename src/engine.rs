use tracing::{debug, info};

use crate::catalog::{Scheme, SchemeCatalog};
use crate::eligibility::evaluator::evaluate_scheme;
use crate::eligibility::ranking::rank_matches;
use crate::eligibility::scoring::{score_scheme, ScoringWeights};
use crate::eligibility::{RecommendationReport, SchemeMatch};
use crate::error::{CatalogError, EngineError};
use crate::questions::{AnswerStore, QuestionSet};

/// Immutable bundle of questionnaire, catalog and scoring policy.
///
/// Holds no per-farmer state, so one instance can be shared behind an `Arc`
/// by any number of wizards or requests.
#[derive(Debug, Clone)]
pub struct Engine {
    questions: QuestionSet,
    catalog: SchemeCatalog,
    weights: ScoringWeights,
}

impl Engine {
    pub fn new(
        questions: QuestionSet,
        catalog: SchemeCatalog,
        weights: ScoringWeights,
    ) -> Result<Self, CatalogError> {
        catalog.validate(&questions)?;
        Ok(Self {
            questions,
            catalog,
            weights,
        })
    }

    pub fn with_defaults() -> Self {
        Self {
            questions: QuestionSet::with_defaults(),
            catalog: SchemeCatalog::with_defaults(),
            weights: ScoringWeights::default(),
        }
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn catalog(&self) -> &SchemeCatalog {
        &self.catalog
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn match_scheme(&self, answers: &AnswerStore, scheme: &Scheme) -> SchemeMatch {
        let verdict = evaluate_scheme(answers, scheme);
        let score = score_scheme(answers, scheme, &self.weights);
        debug!(
            scheme = %scheme.id,
            eligible = verdict.eligible,
            score = score.total,
            "evaluated scheme"
        );
        SchemeMatch::new(scheme, verdict, score)
    }

    /// Evaluates and scores every scheme, then ranks the full list.
    pub fn recommend(&self, answers: &AnswerStore) -> RecommendationReport {
        let matches: Vec<SchemeMatch> = self
            .catalog
            .schemes()
            .iter()
            .map(|scheme| self.match_scheme(answers, scheme))
            .collect();
        let eligible_count = matches.iter().filter(|m| m.eligible).count();
        info!(
            evaluated = matches.len(),
            eligible = eligible_count,
            "scheme recommendations computed"
        );
        RecommendationReport {
            catalog_fingerprint: self.catalog.fingerprint(),
            evaluated: matches.len(),
            eligible_count,
            matches: rank_matches(matches),
        }
    }

    pub fn check(&self, scheme_id: &str, answers: &AnswerStore) -> Result<SchemeMatch, EngineError> {
        let scheme = self.catalog.require(scheme_id)?;
        Ok(self.match_scheme(answers, scheme))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
