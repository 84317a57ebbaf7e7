use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::eligibility::RecommendationReport;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::questions::{AnswerSheet, AnswerStore, Question};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Question(usize),
    Results,
}

/// Step-by-step questionnaire over a shared [`Engine`].
///
/// Owns the answer store for one session. Every transition is synchronous;
/// reaching `Results` runs the full catalog evaluation exactly once.
#[derive(Debug, Clone)]
pub struct Wizard {
    engine: Arc<Engine>,
    step: WizardStep,
    answers: AnswerStore,
    report: Option<RecommendationReport>,
}

impl Wizard {
    pub fn new(engine: Arc<Engine>) -> Self {
        Self {
            engine,
            step: WizardStep::Question(0),
            answers: AnswerStore::new(),
            report: None,
        }
    }

    /// Builds a finished wizard from complete answers, walking every question
    /// in order. Fails on the first unknown id, bad value or missing answer.
    pub fn replay(engine: Arc<Engine>, sheet: &AnswerSheet) -> Result<Self, EngineError> {
        let mut wizard = Self::new(engine);
        wizard.fill(sheet)?;
        while wizard.step != WizardStep::Results {
            wizard.advance()?;
        }
        Ok(wizard)
    }

    /// Applies every answer on the sheet without moving between questions.
    /// Multi-select values are added, never toggled off. On error the answer
    /// store is left exactly as it was before the call.
    pub fn fill(&mut self, sheet: &AnswerSheet) -> Result<(), EngineError> {
        let snapshot = self.answers.clone();
        let result = self.apply_sheet(sheet);
        if result.is_err() {
            self.answers = snapshot;
        }
        result
    }

    fn apply_sheet(&mut self, sheet: &AnswerSheet) -> Result<(), EngineError> {
        let engine = Arc::clone(&self.engine);
        if let Some(unknown) = sheet
            .question_ids()
            .find(|id| engine.questions().by_id(id).is_none())
        {
            return Err(reject(EngineError::UnknownQuestion(unknown.to_string())));
        }

        for question in engine.questions().iter() {
            let Some(value) = sheet.get(&question.id) else {
                continue;
            };
            let values = value.values();
            if values.is_empty() {
                continue;
            }
            if question.is_multi() {
                for v in values {
                    if !self.answers.contains(&question.id, v) {
                        self.toggle_multi(&question.id, v)?;
                    }
                }
            } else if let [single] = values.as_slice() {
                self.select_single(&question.id, single)?;
            } else {
                return Err(reject(EngineError::ShapeMismatch {
                    question_id: question.id.clone(),
                    actual: question.shape.name(),
                    attempted: "multi_choice",
                }));
            }
        }
        Ok(())
    }

    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn report(&self) -> Option<&RecommendationReport> {
        self.report.as_ref()
    }

    pub fn into_report(self) -> Option<RecommendationReport> {
        self.report
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.step {
            WizardStep::Question(index) => self.engine.questions().get(index),
            WizardStep::Results => None,
        }
    }

    /// One-based position and total, for progress indicators.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.engine.questions().len();
        match self.step {
            WizardStep::Question(index) => (index + 1, total),
            WizardStep::Results => (total, total),
        }
    }

    pub fn select_single(&mut self, question_id: &str, value: &str) -> Result<(), EngineError> {
        let question = self.engine.questions().require(question_id).map_err(reject)?;
        if question.is_multi() {
            return Err(reject(EngineError::ShapeMismatch {
                question_id: question_id.to_string(),
                actual: question.shape.name(),
                attempted: "single_choice",
            }));
        }
        if !question.accepts(value) {
            return Err(reject(EngineError::InvalidOption {
                question_id: question_id.to_string(),
                value: value.to_string(),
            }));
        }
        self.answers.set_single(question_id, value);
        debug!(question = question_id, value, "answer selected");
        Ok(())
    }

    /// Returns whether `value` is selected after the toggle.
    pub fn toggle_multi(&mut self, question_id: &str, value: &str) -> Result<bool, EngineError> {
        let question = self.engine.questions().require(question_id).map_err(reject)?;
        if !question.is_multi() {
            return Err(reject(EngineError::ShapeMismatch {
                question_id: question_id.to_string(),
                actual: question.shape.name(),
                attempted: "multi_choice",
            }));
        }
        if !question.accepts(value) {
            return Err(reject(EngineError::InvalidOption {
                question_id: question_id.to_string(),
                value: value.to_string(),
            }));
        }
        let selected = self.answers.toggle(question_id, value);
        debug!(question = question_id, value, selected, "answer toggled");
        Ok(selected)
    }

    pub fn advance(&mut self) -> Result<WizardStep, EngineError> {
        let WizardStep::Question(index) = self.step else {
            return Ok(self.step);
        };
        if let Some(question) = self.engine.questions().get(index) {
            if !self.answers.is_answered(&question.id) {
                let message = if question.is_multi() {
                    "select at least one option to continue"
                } else {
                    "select an option to continue"
                };
                return Err(EngineError::Validation {
                    question_id: question.id.clone(),
                    message: message.to_string(),
                });
            }
        }

        if index + 1 >= self.engine.questions().len() {
            self.report = Some(self.engine.recommend(&self.answers));
            self.step = WizardStep::Results;
        } else {
            self.step = WizardStep::Question(index + 1);
        }
        debug!(step = ?self.step, "wizard advanced");
        Ok(self.step)
    }

    /// Steps back one question, keeping every answer. From `Results` this
    /// returns to the last question and drops the report.
    pub fn retreat(&mut self) -> WizardStep {
        self.step = match self.step {
            WizardStep::Question(0) => WizardStep::Question(0),
            WizardStep::Question(index) => WizardStep::Question(index - 1),
            WizardStep::Results => {
                self.report = None;
                WizardStep::Question(self.engine.questions().len().saturating_sub(1))
            }
        };
        self.step
    }

    pub fn restart(&mut self) {
        self.step = WizardStep::Question(0);
        self.answers.clear();
        self.report = None;
        debug!("wizard restarted");
    }
}

fn reject(err: EngineError) -> EngineError {
    if !err.is_user_error() {
        warn!("wizard rejected call: {err}");
    }
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::{AGE, CATEGORY, FARMER_TYPE, INTERESTS, LAND_SIZE};

    fn wizard() -> Wizard {
        Wizard::new(Arc::new(Engine::with_defaults()))
    }

    fn answer_all(wizard: &mut Wizard, land: &str, interests: &[&str]) {
        wizard.select_single(LAND_SIZE, land).expect("land");
        wizard.advance().expect("advance land");
        wizard.select_single(FARMER_TYPE, "owner").expect("type");
        wizard.advance().expect("advance type");
        wizard.select_single(AGE, "18-30").expect("age");
        wizard.advance().expect("advance age");
        wizard.select_single(CATEGORY, "general").expect("category");
        wizard.advance().expect("advance category");
        for interest in interests {
            wizard.toggle_multi(INTERESTS, interest).expect("interest");
        }
    }

    #[test]
    fn advance_without_answer_keeps_position() {
        let mut wizard = wizard();
        let err = wizard.advance().unwrap_err();
        assert!(err.is_user_error());
        assert_eq!(wizard.step(), WizardStep::Question(0));
    }

    #[test]
    fn empty_multi_select_fails_validation() {
        let mut wizard = wizard();
        answer_all(&mut wizard, "small", &["pension"]);
        wizard.toggle_multi(INTERESTS, "pension").expect("toggle off");
        assert_eq!(wizard.step(), WizardStep::Question(4));

        let err = wizard.advance().unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation {
                question_id: INTERESTS.to_string(),
                message: "select at least one option to continue".to_string(),
            }
        );
        assert_eq!(wizard.step(), WizardStep::Question(4));
        assert!(wizard.report().is_none());
    }

    #[test]
    fn last_advance_produces_results() {
        let mut wizard = wizard();
        answer_all(&mut wizard, "small", &["pension", "credit"]);
        assert_eq!(wizard.advance(), Ok(WizardStep::Results));
        let report = wizard.report().expect("report computed");
        assert_eq!(report.evaluated, wizard.engine().catalog().len());
        assert_eq!(wizard.progress(), (5, 5));
        assert_eq!(wizard.advance(), Ok(WizardStep::Results));
    }

    #[test]
    fn retreat_keeps_answers_and_stops_at_first_question() {
        let mut wizard = wizard();
        assert_eq!(wizard.retreat(), WizardStep::Question(0));

        wizard.select_single(LAND_SIZE, "marginal").expect("land");
        wizard.advance().expect("advance");
        assert_eq!(wizard.retreat(), WizardStep::Question(0));
        assert_eq!(wizard.answers().single(LAND_SIZE), Some("marginal"));

        wizard.select_single(LAND_SIZE, "medium").expect("change answer");
        assert_eq!(wizard.answers().single(LAND_SIZE), Some("medium"));
    }

    #[test]
    fn retreat_from_results_drops_report() {
        let mut wizard = wizard();
        answer_all(&mut wizard, "small", &["dairy"]);
        wizard.advance().expect("finish");
        assert_eq!(wizard.retreat(), WizardStep::Question(4));
        assert!(wizard.report().is_none());
        assert!(wizard.answers().contains(INTERESTS, "dairy"));
    }

    #[test]
    fn restart_clears_everything() {
        let mut wizard = wizard();
        answer_all(&mut wizard, "large", &["market", "credit"]);
        wizard.advance().expect("finish");

        wizard.restart();
        assert_eq!(wizard.step(), WizardStep::Question(0));
        assert!(wizard.answers().is_empty());
        assert!(wizard.report().is_none());

        answer_all(&mut wizard, "marginal", &["organic"]);
        wizard.advance().expect("finish again");
        assert_eq!(wizard.answers().single(LAND_SIZE), Some("marginal"));
        assert!(!wizard.answers().contains(INTERESTS, "market"));
        assert!(!wizard.answers().contains(INTERESTS, "credit"));
    }

    #[test]
    fn selection_rejects_programming_errors() {
        let mut wizard = wizard();
        assert_eq!(
            wizard.select_single("income", "high"),
            Err(EngineError::UnknownQuestion("income".to_string()))
        );
        assert!(matches!(
            wizard.select_single(LAND_SIZE, "enormous"),
            Err(EngineError::InvalidOption { .. })
        ));
        assert!(matches!(
            wizard.select_single(INTERESTS, "pension"),
            Err(EngineError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            wizard.toggle_multi(AGE, "18-30"),
            Err(EngineError::ShapeMismatch { .. })
        ));
        assert!(wizard.answers().is_empty());
    }

    #[test]
    fn failed_fill_leaves_answers_untouched() {
        let mut wizard = wizard();
        wizard.select_single(LAND_SIZE, "medium").expect("land");
        let sheet = AnswerSheet::from_pairs([
            "land_size=small",
            "farmer_type=owner",
            "age=99",
            "interests=pension",
        ])
        .expect("pairs");

        assert!(matches!(
            wizard.fill(&sheet),
            Err(EngineError::InvalidOption { question_id, .. }) if question_id == AGE
        ));
        assert_eq!(wizard.answers().single(LAND_SIZE), Some("medium"));
        assert!(!wizard.answers().is_answered(FARMER_TYPE));
        assert!(!wizard.answers().is_answered(INTERESTS));
        assert_eq!(wizard.answers().len(), 1);
    }

    #[test]
    fn replay_reports_first_missing_answer() {
        let engine = Arc::new(Engine::with_defaults());
        let sheet = AnswerSheet::from_pairs(["land_size=small", "farmer_type=owner"])
            .expect("pairs");
        let err = Wizard::replay(engine, &sheet).unwrap_err();
        assert!(matches!(err, EngineError::Validation { question_id, .. } if question_id == AGE));
    }

    #[test]
    fn replay_completes_full_sheet() {
        let engine = Arc::new(Engine::with_defaults());
        let sheet = AnswerSheet::from_pairs([
            "land_size=small",
            "farmer_type=owner",
            "age=18-30",
            "category=general",
            "interests=pension,credit,pension",
        ])
        .expect("pairs");
        let wizard = Wizard::replay(engine, &sheet).expect("replay");
        assert_eq!(wizard.step(), WizardStep::Results);
        assert_eq!(wizard.answers().multi(INTERESTS).map(|s| s.len()), Some(2));
    }
}
