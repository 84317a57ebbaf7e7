use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::catalog::Scheme;
use crate::eligibility::{ranking, RecommendationReport, SchemeMatch};
use crate::questions::QuestionSet;

const UNRULED_NOTE: &str = "no rules on record, verify with the scheme office";

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn render_matches_table(matches: &[SchemeMatch]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Rank",
        "Scheme",
        "Category",
        "Eligible",
        "Score",
        "Reasons",
    ]);

    for (idx, m) in matches.iter().enumerate() {
        let elig = if m.eligible { "YES" } else { "NO" };
        let elig_cell = if m.eligible {
            Cell::new(elig).fg(Color::Green)
        } else {
            Cell::new(elig).fg(Color::Red)
        };
        table.add_row(Row::from(vec![
            Cell::new((idx + 1).to_string()),
            Cell::new(format!("{}\n{}", m.scheme_name, m.name_local)),
            Cell::new(m.category.to_string()),
            elig_cell,
            Cell::new(format!("{:.0}", m.match_score)),
            Cell::new(if m.unruled {
                UNRULED_NOTE.to_string()
            } else if m.reasons.is_empty() {
                "-".to_string()
            } else {
                m.reasons.join("\n")
            }),
        ]));
    }
    table.to_string()
}

pub fn render_report(report: &RecommendationReport, top_n: usize) -> String {
    let shown = ranking::top_n(&report.matches, top_n);
    let mut out = render_matches_table(shown);
    out.push_str(&format!(
        "\nEligible for {} of {} schemes (showing top {})",
        report.eligible_count,
        report.evaluated,
        shown.len()
    ));
    out
}

pub fn render_score_breakdown(m: &SchemeMatch) -> String {
    let mut table = new_table();
    table.set_header(vec!["Component", "Points", "Note"]);
    for component in &m.score.components {
        table.add_row(vec![
            format!("{:?}", component.kind),
            format!("{:.1}", component.points),
            component.note.clone(),
        ]);
    }
    table.to_string()
}

pub fn render_schemes_table(schemes: &[&Scheme]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Id", "Name", "Category", "Ministry", "Rules"]);
    for scheme in schemes {
        let rules = if scheme.is_unruled() {
            UNRULED_NOTE.to_string()
        } else {
            format!(
                "{} exclusion(s), {} tier(s)",
                scheme.exclusions.len(),
                scheme.priority_tiers.len()
            )
        };
        table.add_row(vec![
            scheme.id.clone(),
            format!("{}\n{}", scheme.name, scheme.name_local),
            scheme.category.to_string(),
            scheme.ministry.clone(),
            rules,
        ]);
    }
    table.to_string()
}

pub fn render_scheme_detail(scheme: &Scheme) -> String {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    let rows: Vec<(&str, String)> = vec![
        ("Name", format!("{} ({})", scheme.name, scheme.name_local)),
        ("Category", scheme.category.to_string()),
        ("Ministry", scheme.ministry.clone()),
        ("Description", scheme.description.clone()),
        ("Benefits", scheme.benefits.join("\n")),
        ("Eligibility", scheme.eligibility.join("\n")),
        ("Documents", scheme.documents_required.join("\n")),
        ("Apply", scheme.apply_link.clone()),
        (
            "Helpline",
            scheme.helpline.clone().unwrap_or_else(|| "-".to_string()),
        ),
    ];
    for (field, value) in rows {
        table.add_row(vec![field.to_string(), value]);
    }
    table.to_string()
}

pub fn render_questions_table(questions: &QuestionSet) -> String {
    let mut table = new_table();
    table.set_header(vec!["#", "Id", "Question", "Type", "Options"]);
    for (idx, question) in questions.iter().enumerate() {
        let options = question
            .choices()
            .iter()
            .map(|(value, label)| {
                if value == label {
                    value.to_string()
                } else {
                    format!("{value}: {label}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            (idx + 1).to_string(),
            question.id.clone(),
            question.prompt.clone(),
            question.shape.name().to_string(),
            options,
        ]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::questions::{AnswerStore, LAND_SIZE};

    #[test]
    fn report_footer_counts_full_catalog() {
        let engine = Engine::with_defaults();
        let mut answers = AnswerStore::new();
        answers.set_single(LAND_SIZE, "large");
        let report = engine.recommend(&answers);
        let rendered = render_report(&report, 3);
        assert!(rendered.contains(&format!(
            "of {} schemes (showing top 3)",
            engine.catalog().len()
        )));
    }

    #[test]
    fn unruled_schemes_are_marked_in_every_table() {
        let engine = Engine::with_defaults();
        let kcc = engine.catalog().require("kcc").expect("kcc");
        let pm_kisan = engine.catalog().require("pm-kisan").expect("pm-kisan");
        // Single word, so dynamic column wrapping cannot split it.
        assert!(UNRULED_NOTE.contains("verify"));
        assert!(render_schemes_table(&[kcc]).contains("verify"));
        assert!(!render_schemes_table(&[pm_kisan]).contains("verify"));

        let result = engine.check("kcc", &AnswerStore::new()).expect("known scheme");
        assert!(render_matches_table(&[result]).contains("verify"));
    }

    #[test]
    fn questions_table_lists_labels() {
        let rendered = render_questions_table(&QuestionSet::with_defaults());
        assert!(rendered.contains("marginal: Marginal (below 1 hectare)"));
        assert!(rendered.contains("60+"));
    }
}
