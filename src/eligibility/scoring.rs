use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Attribute, Category, Scheme};
use crate::eligibility::{MatchScore, ScoreComponent, ScoreKind};
use crate::questions::{AnswerStore, INTERESTS, LAND_SIZE, SMALL_HOLDINGS};

/// Scoring policy. Every weight is clamped at zero when applied, so no
/// contribution can lower a score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringWeights {
    #[serde(default = "default_category_bonus")]
    pub category_bonus: f64,
    /// Per-category replacement for `category_bonus`.
    #[serde(default = "default_category_overrides")]
    pub category_overrides: BTreeMap<Category, f64>,
    #[serde(default = "default_interest_match")]
    pub interest_match: f64,
    #[serde(default = "default_small_holding")]
    pub small_holding: f64,
    #[serde(default = "default_priority_tier")]
    pub priority_tier: f64,
}

impl ScoringWeights {
    pub fn category_weight(&self, category: Category) -> f64 {
        self.category_overrides
            .get(&category)
            .copied()
            .unwrap_or(self.category_bonus)
            .max(0.0)
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            category_bonus: default_category_bonus(),
            category_overrides: default_category_overrides(),
            interest_match: default_interest_match(),
            small_holding: default_small_holding(),
            priority_tier: default_priority_tier(),
        }
    }
}

fn default_category_bonus() -> f64 {
    15.0
}

fn default_category_overrides() -> BTreeMap<Category, f64> {
    BTreeMap::from([(Category::Pension, 25.0)])
}

fn default_interest_match() -> f64 {
    10.0
}

fn default_small_holding() -> f64 {
    8.0
}

fn default_priority_tier() -> f64 {
    12.0
}

pub fn score_scheme(answers: &AnswerStore, scheme: &Scheme, weights: &ScoringWeights) -> MatchScore {
    let mut components = Vec::new();
    let interests = answers.multi(INTERESTS);

    let primary = scheme.category.primary_interest();
    if interests.map(|set| set.contains(primary)).unwrap_or(false) {
        components.push(ScoreComponent {
            kind: ScoreKind::Category,
            points: weights.category_weight(scheme.category),
            note: format!("looking for {} support", primary),
        });
    }

    let overlap: Vec<&str> = scheme
        .interest_tags
        .iter()
        .filter(|tag| interests.map(|set| set.contains(*tag)).unwrap_or(false))
        .map(String::as_str)
        .collect();
    if !overlap.is_empty() {
        components.push(ScoreComponent {
            kind: ScoreKind::InterestOverlap,
            points: weights.interest_match.max(0.0) * overlap.len() as f64,
            note: format!("matches interests: {}", overlap.join(", ")),
        });
    }

    if let Some(size) = answers.single(LAND_SIZE) {
        if SMALL_HOLDINGS.contains(&size) {
            components.push(ScoreComponent {
                kind: ScoreKind::SmallHolding,
                points: weights.small_holding.max(0.0),
                note: format!("{size} landholding priority"),
            });
        }
    }

    // Land-size tiers stay reason notes; the small-holding bonus already scores land.
    if let Some(tier) = scheme
        .priority_tiers
        .iter()
        .filter(|tier| tier.attribute == Attribute::Category)
        .find(|tier| tier.applies_to(answers))
    {
        components.push(ScoreComponent {
            kind: ScoreKind::PriorityTier,
            points: weights.priority_tier.max(0.0),
            note: tier.note.clone(),
        });
    }

    let total = components.iter().map(|c| c.points).sum();
    MatchScore { total, components }
}
