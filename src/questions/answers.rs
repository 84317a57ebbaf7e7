use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multi(BTreeSet<String>),
}

impl Answer {
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::Single(v) => v == value,
            Self::Multi(set) => set.contains(value),
        }
    }

    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Single(v) => vec![v.as_str()],
            Self::Multi(set) => set.iter().map(String::as_str).collect(),
        }
    }
}

/// Farmer answers keyed by question id.
///
/// An entry exists only while it holds at least one value: toggling the last
/// multi-select value off removes the entry. Mutation is reserved to the
/// wizard so every stored value has already been checked against its question.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerStore {
    entries: BTreeMap<String, Answer>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.entries.get(question_id)
    }

    pub fn single(&self, question_id: &str) -> Option<&str> {
        match self.entries.get(question_id)? {
            Answer::Single(v) => Some(v.as_str()),
            Answer::Multi(_) => None,
        }
    }

    pub fn multi(&self, question_id: &str) -> Option<&BTreeSet<String>> {
        match self.entries.get(question_id)? {
            Answer::Multi(set) => Some(set),
            Answer::Single(_) => None,
        }
    }

    pub fn contains(&self, question_id: &str, value: &str) -> bool {
        self.entries
            .get(question_id)
            .map(|answer| answer.contains(value))
            .unwrap_or(false)
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.entries.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn set_single(&mut self, question_id: &str, value: &str) {
        self.entries
            .insert(question_id.to_string(), Answer::Single(value.to_string()));
    }

    /// Returns whether `value` is selected after the toggle.
    pub(crate) fn toggle(&mut self, question_id: &str, value: &str) -> bool {
        let mut set = match self.entries.remove(question_id) {
            Some(Answer::Multi(set)) => set,
            _ => BTreeSet::new(),
        };
        let selected = if set.remove(value) {
            false
        } else {
            set.insert(value.to_string());
            true
        };
        if !set.is_empty() {
            self.entries
                .insert(question_id.to_string(), Answer::Multi(set));
        }
        selected
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SheetValue {
    One(String),
    Many(Vec<String>),
}

impl SheetValue {
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::One(v) => vec![v.as_str()],
            Self::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// Complete answers supplied up front (CLI flags, answer files, HTTP bodies)
/// and replayed through a wizard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AnswerSheet(pub BTreeMap<String, SheetValue>);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected question=value, got {0:?}")]
pub struct SheetParseError(pub String);

impl AnswerSheet {
    /// Parses `question=value` pairs. Repeated keys and comma-separated values
    /// accumulate, so `interests=pension,credit` equals two separate pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, SheetParseError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for pair in pairs {
            let Some((key, raw)) = pair.split_once('=') else {
                return Err(SheetParseError(pair.to_string()));
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(SheetParseError(pair.to_string()));
            }
            let values = grouped.entry(key.to_string()).or_default();
            values.extend(
                raw.split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string),
            );
        }
        let sheet = grouped
            .into_iter()
            .map(|(key, mut values)| {
                let value = if values.len() == 1 {
                    SheetValue::One(values.remove(0))
                } else {
                    SheetValue::Many(values)
                };
                (key, value)
            })
            .collect();
        Ok(Self(sheet))
    }

    pub fn get(&self, question_id: &str) -> Option<&SheetValue> {
        self.0.get(question_id)
    }

    pub fn question_ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes_and_drops_empty_entry() {
        let mut store = AnswerStore::new();
        assert!(store.toggle("interests", "pension"));
        assert!(store.toggle("interests", "credit"));
        assert_eq!(store.multi("interests").map(|s| s.len()), Some(2));

        assert!(!store.toggle("interests", "pension"));
        assert!(!store.toggle("interests", "credit"));
        assert!(!store.is_answered("interests"));
    }

    #[test]
    fn single_answer_overwrites_previous_value() {
        let mut store = AnswerStore::new();
        store.set_single("land_size", "small");
        store.set_single("land_size", "large");
        assert_eq!(store.single("land_size"), Some("large"));
        assert!(!store.contains("land_size", "small"));
    }

    #[test]
    fn pairs_accumulate_repeated_and_comma_separated_values() {
        let sheet = AnswerSheet::from_pairs([
            "land_size=small",
            "interests=pension,credit",
            "interests=dairy",
        ])
        .expect("pairs parse");
        assert_eq!(
            sheet.get("land_size"),
            Some(&SheetValue::One("small".to_string()))
        );
        assert_eq!(
            sheet.get("interests").map(|v| v.values()),
            Some(vec!["pension", "credit", "dairy"])
        );
    }

    #[test]
    fn pair_without_separator_is_rejected() {
        let err = AnswerSheet::from_pairs(["land_size"]).unwrap_err();
        assert_eq!(err, SheetParseError("land_size".to_string()));
    }

    #[test]
    fn sheet_deserializes_from_toml() {
        let sheet: AnswerSheet = toml::from_str(
            r#"
land_size = "marginal"
interests = ["organic"]
"#,
        )
        .expect("toml sheet");
        assert_eq!(
            sheet.get("interests"),
            Some(&SheetValue::Many(vec!["organic".to_string()]))
        );
    }
}
