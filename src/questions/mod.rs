pub mod answers;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, EngineError};

pub use answers::{Answer, AnswerSheet, AnswerStore, SheetParseError, SheetValue};

pub const LAND_SIZE: &str = "land_size";
pub const FARMER_TYPE: &str = "farmer_type";
pub const AGE: &str = "age";
pub const CATEGORY: &str = "category";
pub const INTERESTS: &str = "interests";

/// Land-size brackets that earn the small-holding priority.
pub const SMALL_HOLDINGS: [&str; 2] = ["marginal", "small"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerOption {
    pub value: String,
    pub label: String,
}

impl AnswerOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnswerShape {
    /// One value out of a fixed domain; the value doubles as its label.
    Enumerated { domain: Vec<String> },
    SingleChoice { options: Vec<AnswerOption> },
    MultiChoice { options: Vec<AnswerOption> },
}

impl AnswerShape {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Enumerated { .. } => "enumerated",
            Self::SingleChoice { .. } => "single_choice",
            Self::MultiChoice { .. } => "multi_choice",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub shape: AnswerShape,
}

impl Question {
    pub fn is_multi(&self) -> bool {
        matches!(self.shape, AnswerShape::MultiChoice { .. })
    }

    pub fn values(&self) -> Vec<&str> {
        match &self.shape {
            AnswerShape::Enumerated { domain } => domain.iter().map(String::as_str).collect(),
            AnswerShape::SingleChoice { options } | AnswerShape::MultiChoice { options } => {
                options.iter().map(|o| o.value.as_str()).collect()
            }
        }
    }

    pub fn accepts(&self, value: &str) -> bool {
        self.values().contains(&value)
    }

    pub fn label_for<'a>(&'a self, value: &'a str) -> Option<&'a str> {
        match &self.shape {
            AnswerShape::Enumerated { domain } => domain
                .iter()
                .find(|v| v.as_str() == value)
                .map(String::as_str),
            AnswerShape::SingleChoice { options } | AnswerShape::MultiChoice { options } => options
                .iter()
                .find(|o| o.value == value)
                .map(|o| o.label.as_str()),
        }
    }

    /// Display pairs in declaration order, used by prompts and tables.
    pub fn choices(&self) -> Vec<(&str, &str)> {
        match &self.shape {
            AnswerShape::Enumerated { domain } => {
                domain.iter().map(|v| (v.as_str(), v.as_str())).collect()
            }
            AnswerShape::SingleChoice { options } | AnswerShape::MultiChoice { options } => options
                .iter()
                .map(|o| (o.value.as_str(), o.label.as_str()))
                .collect(),
        }
    }
}

/// Ordered questionnaire. Declaration order is traversal order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        for (idx, question) in questions.iter().enumerate() {
            if questions[..idx].iter().any(|q| q.id == question.id) {
                return Err(CatalogError::DuplicateQuestion(question.id.clone()));
            }
        }
        Ok(Self { questions })
    }

    pub fn with_defaults() -> Self {
        let questions = vec![
            Question {
                id: LAND_SIZE.to_string(),
                prompt: "How much land do you cultivate?".to_string(),
                shape: AnswerShape::SingleChoice {
                    options: vec![
                        AnswerOption::new("marginal", "Marginal (below 1 hectare)"),
                        AnswerOption::new("small", "Small (1-2 hectares)"),
                        AnswerOption::new("medium", "Medium (2-10 hectares)"),
                        AnswerOption::new("large", "Large (above 10 hectares)"),
                    ],
                },
            },
            Question {
                id: FARMER_TYPE.to_string(),
                prompt: "How do you hold your land?".to_string(),
                shape: AnswerShape::SingleChoice {
                    options: vec![
                        AnswerOption::new("owner", "Owner cultivator"),
                        AnswerOption::new("tenant", "Tenant farmer"),
                        AnswerOption::new("sharecropper", "Sharecropper"),
                    ],
                },
            },
            Question {
                id: AGE.to_string(),
                prompt: "What is your age group?".to_string(),
                shape: AnswerShape::Enumerated {
                    domain: ["18-30", "30-45", "45-60", "60+"]
                        .iter()
                        .map(|v| v.to_string())
                        .collect(),
                },
            },
            Question {
                id: CATEGORY.to_string(),
                prompt: "Which category do you belong to?".to_string(),
                shape: AnswerShape::SingleChoice {
                    options: vec![
                        AnswerOption::new("general", "General"),
                        AnswerOption::new("obc", "Other Backward Class"),
                        AnswerOption::new("sc", "Scheduled Caste"),
                        AnswerOption::new("st", "Scheduled Tribe"),
                        AnswerOption::new("women", "Woman farmer"),
                    ],
                },
            },
            Question {
                id: INTERESTS.to_string(),
                prompt: "What kind of support are you looking for?".to_string(),
                shape: AnswerShape::MultiChoice {
                    options: vec![
                        AnswerOption::new("insurance", "Crop insurance"),
                        AnswerOption::new("subsidy", "Input subsidy"),
                        AnswerOption::new("credit", "Loans and credit"),
                        AnswerOption::new("irrigation", "Irrigation"),
                        AnswerOption::new("pension", "Pension"),
                        AnswerOption::new("organic", "Organic farming"),
                        AnswerOption::new("horticulture", "Horticulture"),
                        AnswerOption::new("dairy", "Dairy and livestock"),
                        AnswerOption::new("climate", "Climate resilience"),
                        AnswerOption::new("market", "Market access"),
                    ],
                },
            },
        ];
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn by_id(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&Question, EngineError> {
        self.by_id(id)
            .ok_or_else(|| EngineError::UnknownQuestion(id.to_string()))
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }
}

impl Default for QuestionSet {
    fn default() -> Self {
        Self::with_defaults()
    }
}
