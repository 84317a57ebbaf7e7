use crate::catalog::Scheme;
use crate::eligibility::Verdict;
use crate::questions::AnswerStore;

/// Applies a scheme's exclusions and priority tiers to one farmer.
///
/// Unanswered attributes never exclude. Priority-tier notes are only reported
/// for eligible farmers, after any exclusion reasons.
pub fn evaluate_scheme(answers: &AnswerStore, scheme: &Scheme) -> Verdict {
    let mut reasons = Vec::new();
    let mut violated = Vec::new();

    for exclusion in &scheme.exclusions {
        if exclusion.applies_to(answers) {
            reasons.push(exclusion.reason.clone());
            violated.push(exclusion.name.clone());
        }
    }

    let eligible = violated.is_empty();
    if eligible {
        reasons.extend(
            scheme
                .priority_tiers
                .iter()
                .filter(|tier| tier.applies_to(answers))
                .map(|tier| tier.note.clone()),
        );
    }

    Verdict {
        eligible,
        reasons,
        violated,
    }
}
