pub mod evaluator;
pub mod ranking;
pub mod scoring;

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Scheme};

/// Pass/fail outcome of the hard exclusions of one scheme.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Verdict {
    pub eligible: bool,
    pub reasons: Vec<String>,
    /// Names of the exclusions that fired, in declaration order.
    pub violated: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    Category,
    InterestOverlap,
    SmallHolding,
    PriorityTier,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreComponent {
    pub kind: ScoreKind,
    pub points: f64,
    pub note: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchScore {
    pub total: f64,
    pub components: Vec<ScoreComponent>,
}

impl MatchScore {
    pub fn points_for(&self, kind: ScoreKind) -> f64 {
        self.components
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.points)
            .sum()
    }
}

/// Verdict and score of one scheme, merged for presentation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchemeMatch {
    pub scheme_id: String,
    pub scheme_name: String,
    pub name_local: String,
    pub category: Category,
    pub apply_link: String,
    pub eligible: bool,
    /// Eligible only because the catalog models no rule for this scheme.
    pub unruled: bool,
    pub reasons: Vec<String>,
    pub match_score: f64,
    pub score: MatchScore,
}

impl SchemeMatch {
    pub fn new(scheme: &Scheme, verdict: Verdict, score: MatchScore) -> Self {
        Self {
            scheme_id: scheme.id.clone(),
            scheme_name: scheme.name.clone(),
            name_local: scheme.name_local.clone(),
            category: scheme.category,
            apply_link: scheme.apply_link.clone(),
            eligible: verdict.eligible,
            unruled: scheme.is_unruled(),
            reasons: verdict.reasons,
            match_score: score.total,
            score,
        }
    }
}

/// Ranked evaluation of the whole catalog for one set of answers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationReport {
    pub catalog_fingerprint: String,
    pub evaluated: usize,
    pub eligible_count: usize,
    pub matches: Vec<SchemeMatch>,
}

impl RecommendationReport {
    pub fn eligible(&self) -> impl Iterator<Item = &SchemeMatch> {
        self.matches.iter().filter(|m| m.eligible)
    }

    pub fn find(&self, scheme_id: &str) -> Option<&SchemeMatch> {
        self.matches.iter().find(|m| m.scheme_id == scheme_id)
    }

    /// Keeps the first `n` ranked matches; counts still describe the full run.
    pub fn truncated(mut self, n: usize) -> Self {
        self.matches.truncate(n);
        self
    }
}
