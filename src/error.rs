use thiserror::Error;

/// Failures raised by the wizard and the recommendation engine.
///
/// `Validation` is the only user-facing variant; the rest point at a caller
/// or catalog bug and should be logged rather than retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("{message}")]
    Validation {
        question_id: String,
        message: String,
    },
    #[error("unknown question id: {0}")]
    UnknownQuestion(String),
    #[error("unknown scheme id: {0}")]
    UnknownScheme(String),
    #[error("question {question_id} does not accept value {value:?}")]
    InvalidOption { question_id: String, value: String },
    #[error("question {question_id} is {actual}, cannot be answered as {attempted}")]
    ShapeMismatch {
        question_id: String,
        actual: &'static str,
        attempted: &'static str,
    },
}

impl EngineError {
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate scheme id: {0}")]
    DuplicateScheme(String),
    #[error("duplicate question id: {0}")]
    DuplicateQuestion(String),
    #[error("scheme {scheme_id} has a rule on unknown question {question_id}")]
    UnknownRuleTarget {
        scheme_id: String,
        question_id: String,
    },
    #[error("scheme {scheme_id} names value {value:?} outside the domain of {question_id}")]
    UnknownRuleValue {
        scheme_id: String,
        question_id: String,
        value: String,
    },
    #[error("failed reading catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed parsing catalog {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
