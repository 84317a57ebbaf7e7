use std::cmp::Ordering;

use crate::eligibility::SchemeMatch;

/// Eligible before ineligible, then descending score. `sort_by` is stable, so
/// equal entries keep catalog order.
pub fn rank_matches(mut matches: Vec<SchemeMatch>) -> Vec<SchemeMatch> {
    matches.sort_by(compare_matches);
    matches
}

fn compare_matches(a: &SchemeMatch, b: &SchemeMatch) -> Ordering {
    b.eligible
        .cmp(&a.eligible)
        .then_with(|| b.match_score.total_cmp(&a.match_score))
}

pub fn top_n(ranked: &[SchemeMatch], n: usize) -> &[SchemeMatch] {
    &ranked[..ranked.len().min(n)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::eligibility::MatchScore;

    fn entry(id: &str, eligible: bool, score: f64) -> SchemeMatch {
        SchemeMatch {
            scheme_id: id.to_string(),
            scheme_name: id.to_uppercase(),
            name_local: String::new(),
            category: Category::Subsidy,
            apply_link: String::new(),
            eligible,
            unruled: false,
            reasons: Vec::new(),
            match_score: score,
            score: MatchScore {
                total: score,
                components: Vec::new(),
            },
        }
    }

    fn ids(ranked: &[SchemeMatch]) -> Vec<&str> {
        ranked.iter().map(|m| m.scheme_id.as_str()).collect()
    }

    #[test]
    fn eligibility_outranks_score() {
        let ranked = rank_matches(vec![
            entry("rich-but-excluded", false, 90.0),
            entry("modest", true, 5.0),
            entry("best", true, 40.0),
        ]);
        assert_eq!(ids(&ranked), vec!["best", "modest", "rich-but-excluded"]);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let input = vec![
            entry("a", true, 10.0),
            entry("b", false, 10.0),
            entry("c", true, 10.0),
            entry("d", true, 10.0),
            entry("e", false, 10.0),
        ];
        for _ in 0..3 {
            let ranked = rank_matches(input.clone());
            assert_eq!(ids(&ranked), vec!["a", "c", "d", "b", "e"]);
        }
    }

    #[test]
    fn truncation_is_a_prefix_of_the_full_ranking() {
        let input: Vec<SchemeMatch> = (0..12)
            .map(|i| entry(&format!("s{i}"), i % 3 != 0, f64::from(i % 4)))
            .collect();
        let ranked = rank_matches(input);
        let top = top_n(&ranked, 8);
        assert_eq!(top.len(), 8);
        assert_eq!(top, &ranked[..8]);
        assert_eq!(top_n(&ranked, 50).len(), 12);
    }
}
