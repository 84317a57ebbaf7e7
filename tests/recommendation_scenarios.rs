//! End-to-end recommendation scenarios driven through the public wizard and
//! engine facade, the same way the CLI and HTTP surfaces use them.

use std::sync::Arc;

use scheme_advisor::catalog::SchemeCatalog;
use scheme_advisor::eligibility::scoring::ScoringWeights;
use scheme_advisor::eligibility::{RecommendationReport, ScoreKind};
use scheme_advisor::engine::Engine;
use scheme_advisor::questions::{AnswerSheet, QuestionSet, INTERESTS, LAND_SIZE};
use scheme_advisor::wizard::{Wizard, WizardStep};

fn sheet(pairs: &[&str]) -> AnswerSheet {
    AnswerSheet::from_pairs(pairs.iter().copied()).expect("valid pairs")
}

fn recommend(engine: Arc<Engine>, pairs: &[&str]) -> RecommendationReport {
    Wizard::replay(engine, &sheet(pairs))
        .expect("complete answers")
        .into_report()
        .expect("report computed")
}

fn default_engine() -> Arc<Engine> {
    Arc::new(Engine::with_defaults())
}

#[test]
fn small_owner_interested_in_pension_and_credit() {
    let engine = default_engine();
    let report = recommend(
        Arc::clone(&engine),
        &[
            "land_size=small",
            "farmer_type=owner",
            "age=18-30",
            "category=general",
            "interests=pension,credit",
        ],
    );

    assert_eq!(report.evaluated, engine.catalog().len());
    for id in ["pm-kmy", "kcc"] {
        let m = report.find(id).expect("scheme ranked");
        assert!(m.eligible, "{id} should be eligible");
        assert!(m.score.points_for(ScoreKind::InterestOverlap) > 0.0);
        assert!(m.score.points_for(ScoreKind::SmallHolding) > 0.0);
    }
    assert_eq!(report.matches[0].scheme_id, "pm-kmy");

    // Nothing that excludes small holdings may be reported eligible.
    for m in report.eligible() {
        let scheme = engine.catalog().require(&m.scheme_id).expect("known scheme");
        assert!(scheme
            .exclusions
            .iter()
            .filter(|e| e.attribute.question_id() == LAND_SIZE)
            .all(|e| !e.excluded.iter().any(|v| v == "small")));
    }
}

#[test]
fn large_older_farmer_is_excluded_with_reasons_and_sorted_last() {
    let report = recommend(
        default_engine(),
        &[
            "land_size=large",
            "farmer_type=owner",
            "age=45-60",
            "category=general",
            "interests=subsidy,pension",
        ],
    );

    for id in ["pm-kisan", "pm-kmy"] {
        let m = report.find(id).expect("scheme ranked");
        assert!(!m.eligible);
        assert!(m.reasons.iter().any(|r| r.contains("Land size")));
    }

    let first_ineligible = report
        .matches
        .iter()
        .position(|m| !m.eligible)
        .expect("some schemes excluded");
    assert!(report.matches[first_ineligible..].iter().all(|m| !m.eligible));
    assert_eq!(report.eligible_count, first_ineligible);
}

#[test]
fn identical_answers_give_identical_output() {
    let pairs = [
        "land_size=marginal",
        "farmer_type=tenant",
        "age=30-45",
        "category=sc",
        "interests=irrigation,dairy,market",
    ];
    let first = serde_json::to_string(&recommend(default_engine(), &pairs)).expect("json");
    let second = serde_json::to_string(&recommend(default_engine(), &pairs)).expect("json");
    assert_eq!(first, second);
}

#[test]
fn equal_scores_keep_catalog_order() {
    let data = r#"
[[schemes]]
id = "zeta"
name = "Zeta Market Link"
name_local = "ज़ेटा"
category = "market"
ministry = "State Marketing Board"
description = "Mandi linkage"
apply_link = "https://example.gov.in/zeta"

[[schemes]]
id = "alpha"
name = "Alpha Market Link"
name_local = "अल्फा"
category = "market"
ministry = "State Marketing Board"
description = "Mandi linkage"
apply_link = "https://example.gov.in/alpha"

[[schemes]]
id = "mid"
name = "Mid Market Link"
name_local = "मध्य"
category = "market"
ministry = "State Marketing Board"
description = "Mandi linkage"
apply_link = "https://example.gov.in/mid"
"#;
    let catalog = SchemeCatalog::from_toml_str(data, "inline").expect("catalog parses");
    let engine = Engine::new(
        QuestionSet::with_defaults(),
        catalog,
        ScoringWeights::default(),
    )
    .expect("catalog fits questionnaire");

    let report = recommend(
        Arc::new(engine),
        &[
            "land_size=medium",
            "farmer_type=owner",
            "age=30-45",
            "category=general",
            "interests=organic",
        ],
    );
    let order: Vec<&str> = report.matches.iter().map(|m| m.scheme_id.as_str()).collect();
    assert_eq!(order, ["zeta", "alpha", "mid"]);
    assert!(report.matches.iter().all(|m| m.match_score == 0.0));
}

#[test]
fn restart_leaves_no_trace_of_previous_session() {
    let engine = default_engine();
    let mut wizard = Wizard::replay(
        Arc::clone(&engine),
        &sheet(&[
            "land_size=large",
            "farmer_type=sharecropper",
            "age=60+",
            "category=general",
            "interests=dairy,credit",
        ]),
    )
    .expect("first session");
    assert_eq!(wizard.step(), WizardStep::Results);

    wizard.restart();
    wizard
        .fill(&sheet(&[
            "land_size=small",
            "farmer_type=owner",
            "age=18-30",
            "category=women",
            "interests=organic",
        ]))
        .expect("second session");
    while wizard.step() != WizardStep::Results {
        wizard.advance().expect("advance");
    }

    assert!(!wizard.answers().contains(INTERESTS, "dairy"));
    assert!(!wizard.answers().contains(INTERESTS, "credit"));
    let fresh = recommend(
        engine,
        &[
            "land_size=small",
            "farmer_type=owner",
            "age=18-30",
            "category=women",
            "interests=organic",
        ],
    );
    assert_eq!(wizard.report(), Some(&fresh));
}
