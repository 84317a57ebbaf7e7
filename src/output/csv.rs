use anyhow::Result;

use crate::catalog::Scheme;
use crate::eligibility::SchemeMatch;

pub fn matches_to_csv(matches: &[SchemeMatch]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "rank",
        "scheme_id",
        "scheme_name",
        "category",
        "eligible",
        "unruled",
        "match_score",
        "reasons",
        "apply_link",
    ])?;
    for (idx, m) in matches.iter().enumerate() {
        writer.write_record([
            (idx + 1).to_string(),
            m.scheme_id.clone(),
            m.scheme_name.clone(),
            m.category.as_slug().to_string(),
            m.eligible.to_string(),
            m.unruled.to_string(),
            format!("{:.2}", m.match_score),
            m.reasons.join("; "),
            m.apply_link.clone(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn schemes_to_csv(schemes: &[&Scheme]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["id", "name", "category", "ministry", "apply_link", "helpline"])?;
    for scheme in schemes {
        writer.write_record([
            scheme.id.clone(),
            scheme.name.clone(),
            scheme.category.as_slug().to_string(),
            scheme.ministry.clone(),
            scheme.apply_link.clone(),
            scheme.helpline.clone().unwrap_or_default(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}
