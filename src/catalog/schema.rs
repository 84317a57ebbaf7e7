use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::questions::{AnswerStore, AGE, CATEGORY, FARMER_TYPE, INTERESTS, LAND_SIZE};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Insurance,
    Subsidy,
    Credit,
    Irrigation,
    Pension,
    Organic,
    Horticulture,
    Dairy,
    Climate,
    Market,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Insurance,
        Category::Subsidy,
        Category::Credit,
        Category::Irrigation,
        Category::Pension,
        Category::Organic,
        Category::Horticulture,
        Category::Dairy,
        Category::Climate,
        Category::Market,
    ];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Insurance => "insurance",
            Self::Subsidy => "subsidy",
            Self::Credit => "credit",
            Self::Irrigation => "irrigation",
            Self::Pension => "pension",
            Self::Organic => "organic",
            Self::Horticulture => "horticulture",
            Self::Dairy => "dairy",
            Self::Climate => "climate",
            Self::Market => "market",
        }
    }

    /// Interest value that marks a farmer as looking for this kind of scheme.
    pub fn primary_interest(&self) -> &'static str {
        self.as_slug()
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Insurance => "Insurance",
            Self::Subsidy => "Subsidy",
            Self::Credit => "Credit",
            Self::Irrigation => "Irrigation",
            Self::Pension => "Pension",
            Self::Organic => "Organic",
            Self::Horticulture => "Horticulture",
            Self::Dairy => "Dairy",
            Self::Climate => "Climate",
            Self::Market => "Market",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown scheme category: {0}")]
pub struct CategoryParseError(pub String);

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_slug() == normalized)
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// Farmer attribute a rule can inspect. Each maps onto one question.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    LandSize,
    FarmerType,
    Age,
    Category,
    Interests,
}

impl Attribute {
    pub fn question_id(&self) -> &'static str {
        match self {
            Self::LandSize => LAND_SIZE,
            Self::FarmerType => FARMER_TYPE,
            Self::Age => AGE,
            Self::Category => CATEGORY,
            Self::Interests => INTERESTS,
        }
    }

    /// True when any of the farmer's answers for this attribute is in `values`.
    pub fn matches_any(&self, answers: &AnswerStore, values: &[String]) -> bool {
        answers
            .get(self.question_id())
            .map(|answer| values.iter().any(|v| answer.contains(v)))
            .unwrap_or(false)
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::LandSize => "land size",
            Self::FarmerType => "farmer type",
            Self::Age => "age",
            Self::Category => "category",
            Self::Interests => "interests",
        };
        write!(f, "{display}")
    }
}

/// Hard exclusion: a farmer whose answer falls in `excluded` is ineligible.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exclusion {
    pub name: String,
    pub attribute: Attribute,
    pub excluded: Vec<String>,
    pub reason: String,
}

impl Exclusion {
    pub fn new(name: &str, attribute: Attribute, excluded: &[&str], reason: &str) -> Self {
        Self {
            name: name.to_string(),
            attribute,
            excluded: excluded.iter().map(|v| v.to_string()).collect(),
            reason: reason.to_string(),
        }
    }

    pub fn applies_to(&self, answers: &AnswerStore) -> bool {
        self.attribute.matches_any(answers, &self.excluded)
    }
}

/// Higher benefit tier granted to farmers whose answer is in `values`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriorityTier {
    pub attribute: Attribute,
    pub values: Vec<String>,
    pub note: String,
}

impl PriorityTier {
    pub fn new(attribute: Attribute, values: &[&str], note: &str) -> Self {
        Self {
            attribute,
            values: values.iter().map(|v| v.to_string()).collect(),
            note: note.to_string(),
        }
    }

    pub fn applies_to(&self, answers: &AnswerStore) -> bool {
        self.attribute.matches_any(answers, &self.values)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scheme {
    pub id: String,
    pub name: String,
    pub name_local: String,
    pub category: Category,
    pub ministry: String,
    pub description: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub eligibility: Vec<String>,
    #[serde(default)]
    pub documents_required: Vec<String>,
    pub apply_link: String,
    #[serde(default)]
    pub helpline: Option<String>,
    #[serde(default)]
    pub interest_tags: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<Exclusion>,
    #[serde(default)]
    pub priority_tiers: Vec<PriorityTier>,
}

impl Scheme {
    /// No exclusion or tier is modelled, so the scheme evaluates as open to
    /// everyone. That is a gap in the catalog data, not a verified fact.
    pub fn is_unruled(&self) -> bool {
        self.exclusions.is_empty() && self.priority_tiers.is_empty()
    }

    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.name_local.contains(needle.as_str())
            || self.id.contains(needle.as_str())
    }
}
