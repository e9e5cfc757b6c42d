//! Weighted rule-based persona match scoring.
//!
//! Each persona attribute that is set contributes a fixed weight to the
//! "total possible" denominator, and the same weight to the numerator when
//! the investor matches it. The final score is the rounded percentage of
//! earned weight; a persona with no attributes set scores 0 against every
//! investor. Matched/unmatched field labels accompany the score so the UI
//! can explain it.

use std::collections::HashMap;

use serde::Serialize;

/// Attribute weights. Additive, so the score is monotonically
/// non-decreasing in the number of matched attributes.
pub const WEIGHT_INVESTOR_TYPE: u32 = 35;
pub const WEIGHT_NATIONALITY: u32 = 25;
pub const WEIGHT_SECTOR: u32 = 20;
pub const WEIGHT_GENDER: u32 = 10;
pub const WEIGHT_AGE: u32 = 10;

/// Target-gender value meaning "no gender constraint".
pub const UNCONSTRAINED_GENDER: &str = "diverse";

/// Nationality sentinel expanding to the Gulf states below.
pub const GCC_SENTINEL: &str = "gcc";

/// Gulf state nationalities covered by the GCC sentinel (lowercase).
pub const GCC_STATES: [&str; 7] = [
    "saudi arabia",
    "uae",
    "united arab emirates",
    "qatar",
    "bahrain",
    "oman",
    "kuwait",
];

/// Best-score ceiling below which an investor counts as poorly matched
/// for persona-suggestion clustering.
pub const SUGGESTION_SCORE_CEILING: u8 = 50;

/// The scorable subset of a persona. Unset fields mean "no constraint".
#[derive(Debug, Clone, Default)]
pub struct PersonaTargets {
    pub investor_type: Option<String>,
    pub gender: Option<String>,
    pub age_min: Option<i32>,
    pub nationalities: Vec<String>,
    pub sectors: Vec<String>,
}

/// The scorable subset of an investor profile.
#[derive(Debug, Clone, Default)]
pub struct InvestorAttributes {
    pub investor_type: Option<String>,
    pub nationality: Option<String>,
    pub sector: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
}

/// Deterministic score with per-field explainability.
#[derive(Debug, Clone, Serialize)]
pub struct RuleScore {
    pub score: u8,
    pub matched_fields: Vec<&'static str>,
    pub unmatched_fields: Vec<&'static str>,
}

fn lower(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("").to_lowercase()
}

/// Score one investor against one persona.
pub fn score(investor: &InvestorAttributes, targets: &PersonaTargets) -> RuleScore {
    let mut total = 0u32;
    let mut earned = 0u32;
    let mut matched = Vec::new();
    let mut unmatched = Vec::new();

    let mut tally = |weight: u32, label: &'static str, hit: bool| {
        total += weight;
        if hit {
            earned += weight;
            matched.push(label);
        } else {
            unmatched.push(label);
        }
    };

    if let Some(target_type) = &targets.investor_type {
        let hit = lower(&investor.investor_type) == target_type.to_lowercase();
        tally(WEIGHT_INVESTOR_TYPE, "Investor type", hit);
    }

    if !targets.nationalities.is_empty() {
        let nationality = lower(&investor.nationality);
        let wanted: Vec<String> = targets
            .nationalities
            .iter()
            .map(|n| n.to_lowercase())
            .collect();
        let hit = wanted.iter().any(|n| n == &nationality)
            || (wanted.iter().any(|n| n == GCC_SENTINEL)
                && GCC_STATES.contains(&nationality.as_str()));
        tally(WEIGHT_NATIONALITY, "Nationality", hit);
    }

    if !targets.sectors.is_empty() {
        let sector = lower(&investor.sector);
        // Substring match in either direction so "Tech" targets hit
        // "Technology" investors and vice versa.
        let hit = targets.sectors.iter().any(|t| {
            let t = t.to_lowercase();
            !t.is_empty() && (sector.contains(&t) || t.contains(&sector))
        });
        tally(WEIGHT_SECTOR, "Sector", hit);
    }

    if let Some(target_gender) = &targets.gender {
        if !target_gender.eq_ignore_ascii_case(UNCONSTRAINED_GENDER) {
            let hit = lower(&investor.gender) == target_gender.to_lowercase();
            tally(WEIGHT_GENDER, "Gender", hit);
        }
    }

    if let Some(age_min) = targets.age_min {
        let hit = investor.age.is_some_and(|age| age >= age_min);
        tally(WEIGHT_AGE, "Age group", hit);
    }

    let score = if total > 0 {
        (earned as f64 / total as f64 * 100.0).round() as u8
    } else {
        0
    };

    RuleScore {
        score,
        matched_fields: matched,
        unmatched_fields: unmatched,
    }
}

/// Best deterministic score across a persona set. `None` when the fund
/// has no personas.
pub fn best_score(investor: &InvestorAttributes, personas: &[PersonaTargets]) -> Option<u8> {
    personas.iter().map(|p| score(investor, p).score).max()
}

/// Whether an investor is a candidate for a new persona: no personas
/// exist, or the best score against all of them is below the ceiling.
pub fn is_poorly_matched(investor: &InvestorAttributes, personas: &[PersonaTargets]) -> bool {
    match best_score(investor, personas) {
        None => true,
        Some(best) => best < SUGGESTION_SCORE_CEILING,
    }
}

/// A rule-based candidate persona derived from an investor cluster.
#[derive(Debug, Clone, Serialize)]
pub struct PersonaSuggestion {
    pub suggested_name: String,
    pub description: String,
    pub target_investor_type: Option<String>,
    pub target_nationalities: Vec<String>,
    pub target_sectors: Vec<String>,
    pub count: usize,
    pub example_investors: Vec<String>,
}

/// Group poorly matched investors by (investor type, nationality, sector)
/// and surface the 3 most frequent clusters as persona suggestions, each
/// with up to 3 example investor names.
pub fn cluster_unmatched(investors: &[(String, InvestorAttributes)]) -> Vec<PersonaSuggestion> {
    type ClusterKey = (String, String, String);

    let key_of = |attrs: &InvestorAttributes| -> ClusterKey {
        (
            attrs.investor_type.clone().unwrap_or_default(),
            attrs.nationality.clone().unwrap_or_default(),
            attrs.sector.clone().unwrap_or_default(),
        )
    };

    let mut clusters: HashMap<ClusterKey, Vec<&str>> = HashMap::new();
    for (name, attrs) in investors {
        clusters.entry(key_of(attrs)).or_default().push(name);
    }

    let mut ranked: Vec<(ClusterKey, Vec<&str>)> = clusters.into_iter().collect();
    // Most frequent first; tie-break on the key for deterministic output.
    ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(&b.0)));

    ranked
        .into_iter()
        .take(3)
        .map(|((itype, nationality, sector), names)| {
            let count = names.len();
            let name_parts: Vec<&str> = [itype.as_str(), nationality.as_str(), sector.as_str()]
                .into_iter()
                .filter(|p| !p.is_empty())
                .collect();
            PersonaSuggestion {
                suggested_name: if name_parts.is_empty() {
                    "Investor Archetype".to_string()
                } else {
                    name_parts.join(" / ")
                },
                description: format!(
                    "{count} investor(s) share this profile but don't match existing personas."
                ),
                target_investor_type: (!itype.is_empty()).then_some(itype),
                target_nationalities: if nationality.is_empty() {
                    vec![]
                } else {
                    vec![nationality]
                },
                target_sectors: if sector.is_empty() { vec![] } else { vec![sector] },
                count,
                example_investors: names.iter().take(3).map(|n| n.to_string()).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family_office(nationality: &str) -> InvestorAttributes {
        InvestorAttributes {
            investor_type: Some("Family Office".to_string()),
            nationality: Some(nationality.to_string()),
            sector: Some("Technology".to_string()),
            gender: Some("Male".to_string()),
            age: Some(52),
        }
    }

    fn full_persona() -> PersonaTargets {
        PersonaTargets {
            investor_type: Some("family office".to_string()),
            gender: Some("male".to_string()),
            age_min: Some(40),
            nationalities: vec!["Saudi Arabia".to_string()],
            sectors: vec!["Tech".to_string()],
        }
    }

    #[test]
    fn full_match_scores_100() {
        let result = score(&family_office("Saudi Arabia"), &full_persona());
        assert_eq!(result.score, 100);
        assert_eq!(
            result.matched_fields,
            vec![
                "Investor type",
                "Nationality",
                "Sector",
                "Gender",
                "Age group"
            ]
        );
        assert!(result.unmatched_fields.is_empty());
    }

    #[test]
    fn empty_persona_scores_zero() {
        let result = score(&family_office("Saudi Arabia"), &PersonaTargets::default());
        assert_eq!(result.score, 0);
        assert!(result.matched_fields.is_empty());
        assert!(result.unmatched_fields.is_empty());
    }

    // Worked example: type (35) matches, nationality (25) does not;
    // round(35 / 60 * 100) = 58.
    #[test]
    fn partial_match_worked_example() {
        let persona = PersonaTargets {
            investor_type: Some("Family Office".to_string()),
            nationalities: vec!["Saudi Arabia".to_string()],
            ..Default::default()
        };
        let investor = InvestorAttributes {
            investor_type: Some("Family Office".to_string()),
            nationality: Some("UAE".to_string()),
            ..Default::default()
        };

        let result = score(&investor, &persona);
        assert_eq!(result.score, 58);
        assert_eq!(result.matched_fields, vec!["Investor type"]);
        assert_eq!(result.unmatched_fields, vec!["Nationality"]);
    }

    #[test]
    fn gcc_sentinel_covers_gulf_states() {
        let persona = PersonaTargets {
            nationalities: vec!["GCC".to_string()],
            ..Default::default()
        };
        for state in ["Saudi Arabia", "UAE", "United Arab Emirates", "Kuwait"] {
            let result = score(&family_office(state), &persona);
            assert_eq!(result.score, 100, "{state}");
        }
        let result = score(&family_office("Germany"), &persona);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn sector_matches_substring_both_ways() {
        let persona = PersonaTargets {
            sectors: vec!["Tech".to_string()],
            ..Default::default()
        };
        assert_eq!(score(&family_office("UAE"), &persona).score, 100);

        let persona = PersonaTargets {
            sectors: vec!["Technology and Media".to_string()],
            ..Default::default()
        };
        // Investor sector "Technology" is contained in the target.
        assert_eq!(score(&family_office("UAE"), &persona).score, 100);
    }

    #[test]
    fn diverse_gender_target_is_skipped() {
        let persona = PersonaTargets {
            gender: Some("Diverse".to_string()),
            age_min: Some(40),
            ..Default::default()
        };
        let result = score(&family_office("UAE"), &persona);
        // Only the age weight is in play.
        assert_eq!(result.score, 100);
        assert_eq!(result.matched_fields, vec!["Age group"]);
    }

    #[test]
    fn missing_age_fails_age_constraint() {
        let persona = PersonaTargets {
            age_min: Some(40),
            ..Default::default()
        };
        let mut investor = family_office("UAE");
        investor.age = None;
        let result = score(&investor, &persona);
        assert_eq!(result.score, 0);
        assert_eq!(result.unmatched_fields, vec!["Age group"]);
    }

    #[test]
    fn score_is_monotone_in_matched_attributes() {
        let persona = full_persona();
        let mut investor = InvestorAttributes::default();
        let mut last = score(&investor, &persona).score;

        investor.investor_type = Some("Family Office".to_string());
        let s = score(&investor, &persona).score;
        assert!(s >= last);
        last = s;

        investor.nationality = Some("Saudi Arabia".to_string());
        let s = score(&investor, &persona).score;
        assert!(s >= last);
        last = s;

        investor.sector = Some("Technology".to_string());
        let s = score(&investor, &persona).score;
        assert!(s >= last);
    }

    #[test]
    fn best_score_and_poor_match_detection() {
        let personas = vec![full_persona()];
        assert!(is_poorly_matched(&family_office("Germany"), &personas));
        assert!(!is_poorly_matched(&family_office("Saudi Arabia"), &personas));
        // No personas at all: everyone is a suggestion candidate.
        assert!(is_poorly_matched(&family_office("Saudi Arabia"), &[]));
        assert_eq!(best_score(&family_office("UAE"), &[]), None);
    }

    #[test]
    fn clustering_surfaces_most_frequent_profiles() {
        let hnwi = |name: &str| {
            (
                name.to_string(),
                InvestorAttributes {
                    investor_type: Some("HNWI".to_string()),
                    nationality: Some("Qatar".to_string()),
                    sector: Some("Real Estate".to_string()),
                    ..Default::default()
                },
            )
        };
        let investors = vec![
            hnwi("Alia"),
            hnwi("Basim"),
            hnwi("Chloe"),
            hnwi("Dawood"),
            (
                "Eman".to_string(),
                InvestorAttributes {
                    investor_type: Some("Institutional".to_string()),
                    ..Default::default()
                },
            ),
        ];

        let suggestions = cluster_unmatched(&investors);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].count, 4);
        assert_eq!(suggestions[0].suggested_name, "HNWI / Qatar / Real Estate");
        assert_eq!(suggestions[0].example_investors.len(), 3);
        assert_eq!(suggestions[0].target_nationalities, vec!["Qatar"]);
        assert_eq!(suggestions[1].target_investor_type.as_deref(), Some("Institutional"));
        assert!(suggestions[1].target_nationalities.is_empty());
    }

    #[test]
    fn clustering_caps_at_three_suggestions() {
        let investors: Vec<_> = (0..5)
            .map(|i| {
                (
                    format!("Investor {i}"),
                    InvestorAttributes {
                        sector: Some(format!("Sector {i}")),
                        ..Default::default()
                    },
                )
            })
            .collect();
        assert_eq!(cluster_unmatched(&investors).len(), 3);
    }
}
