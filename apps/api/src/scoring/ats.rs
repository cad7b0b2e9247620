//! ATS keyword matching — pure-Rust, fast, deterministic, no LLM call.
//!
//! Extracts a keyword inventory from a pasted job description and measures
//! how well a resume document covers it:
//! - exact skill-name match → strength 1.0
//! - substring match anywhere in the flattened resume text → strength 0.6
//! - no match → miss
//! overall_score = Σ(strength × frequency) / Σ(frequency) × 100.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeContent;

/// Keywords beyond this rank are ignored — pasted JDs repeat themselves.
const MAX_KEYWORDS: usize = 30;

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "have", "in",
    "is", "it", "its", "of", "on", "or", "our", "that", "the", "their", "they", "this", "to",
    "was", "we", "were", "what", "which", "who", "will", "with", "you", "your",
    // JD boilerplate that would otherwise dominate the inventory
    "ability", "candidate", "company", "experience", "job", "looking", "new", "plus", "required",
    "requirements", "role", "skills", "strong", "team", "work", "working", "years",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    pub frequency: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordHit {
    pub term: String,
    pub frequency: u32,
    pub strength: f32,
}

/// Full match report returned to the client. Not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsReport {
    pub overall_score: u8,
    pub matched: Vec<KeywordHit>,
    pub missing: Vec<String>,
    pub recommendation: String,
}

/// Extracts the keyword inventory from a job description: lowercased,
/// stop-words and bare numbers dropped, ordered by frequency then
/// alphabetically so the result is stable for identical input.
pub fn extract_keywords(jd_text: &str) -> Vec<Keyword> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for token in jd_text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '+' && c != '#')
    {
        if token.chars().count() < 2 {
            continue;
        }
        if token.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        if STOP_WORDS.contains(&token) {
            continue;
        }
        *counts.entry(token.to_string()).or_insert(0) += 1;
    }

    let mut keywords: Vec<Keyword> = counts
        .into_iter()
        .map(|(term, frequency)| Keyword { term, frequency })
        .collect();
    keywords.sort_by(|a, b| b.frequency.cmp(&a.frequency).then(a.term.cmp(&b.term)));
    keywords.truncate(MAX_KEYWORDS);
    keywords
}

/// Scores a resume document against a job description.
pub fn compute_ats_report(content: &ResumeContent, jd_text: &str) -> AtsReport {
    let keywords = extract_keywords(jd_text);

    if keywords.is_empty() {
        return AtsReport {
            overall_score: 0,
            matched: vec![],
            missing: vec![],
            recommendation: "No keywords found in the job description — nothing to score."
                .to_string(),
        };
    }

    let skill_names: Vec<String> = content
        .skills
        .iter()
        .filter_map(|s| s.name.as_deref())
        .map(|n| n.trim().to_lowercase())
        .filter(|n| !n.is_empty())
        .collect();
    let body = flatten_resume_text(content);

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut total_frequency = 0.0_f32;
    let mut total_strength = 0.0_f32;

    for keyword in keywords {
        total_frequency += keyword.frequency as f32;

        let strength = if skill_names.iter().any(|s| s == &keyword.term) {
            1.0
        } else if body.contains(&keyword.term) {
            0.6
        } else {
            0.0
        };

        total_strength += strength * keyword.frequency as f32;

        if strength > 0.0 {
            matched.push(KeywordHit {
                term: keyword.term,
                frequency: keyword.frequency,
                strength,
            });
        } else {
            missing.push(keyword.term);
        }
    }

    let overall_score = ((total_strength / total_frequency) * 100.0)
        .round()
        .clamp(0.0, 100.0) as u8;

    AtsReport {
        recommendation: build_recommendation(overall_score, &missing),
        overall_score,
        matched,
        missing,
    }
}

/// Flattens every text field of a resume into one lowercase blob for
/// substring matching.
fn flatten_resume_text(content: &ResumeContent) -> String {
    let mut parts: Vec<String> = Vec::new();

    let profile = &content.profile_info;
    parts.extend(
        [&profile.full_name, &profile.designation, &profile.summary]
            .into_iter()
            .flatten()
            .cloned(),
    );
    if let Some(location) = &content.contact_info.location {
        parts.push(location.clone());
    }
    for entry in &content.work_experience {
        parts.extend([&entry.job_title, &entry.company].into_iter().flatten().cloned());
        if let Some(description) = &entry.description {
            parts.push(description.joined());
        }
    }
    for entry in &content.education {
        parts.extend([&entry.degree, &entry.institution].into_iter().flatten().cloned());
    }
    parts.extend(content.skills.iter().filter_map(|s| s.name.clone()));

    parts.join("\n").to_lowercase()
}

fn build_recommendation(score: u8, missing: &[String]) -> String {
    let top_missing: Vec<&str> = missing.iter().take(3).map(String::as_str).collect();

    if score >= 80 {
        "Strong keyword coverage. This resume should pass automated screening for this role."
            .to_string()
    } else if score >= 50 {
        format!(
            "Moderate coverage ({score}/100). Consider working these terms in: {}.",
            top_missing.join(", ")
        )
    } else {
        format!(
            "Low coverage ({score}/100). Key terms absent: {}. Tailor the summary and experience bullets to this posting.",
            top_missing.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Description, ProfileInfo, SkillEntry, WorkExperience};

    fn content_with_skills(skills: &[&str]) -> ResumeContent {
        ResumeContent {
            skills: skills
                .iter()
                .map(|s| SkillEntry { name: Some(s.to_string()) })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_exact_skill_match_scores_full_strength() {
        let content = content_with_skills(&["Rust", "PostgreSQL"]);
        let report = compute_ats_report(&content, "rust rust postgresql");
        assert_eq!(report.overall_score, 100);
        assert!(report.missing.is_empty());
        assert!(report.matched.iter().all(|hit| hit.strength == 1.0));
    }

    #[test]
    fn test_body_match_scores_partial_strength() {
        let content = ResumeContent {
            work_experience: vec![WorkExperience {
                description: Some(Description::Text(
                    "Deployed services to Kubernetes clusters".to_string(),
                )),
                ..Default::default()
            }],
            ..Default::default()
        };
        let report = compute_ats_report(&content, "kubernetes");
        assert_eq!(report.overall_score, 60);
        assert_eq!(report.matched.len(), 1);
        assert_eq!(report.matched[0].strength, 0.6);
    }

    #[test]
    fn test_unmatched_keyword_is_listed_missing() {
        let content = content_with_skills(&["Python"]);
        let report = compute_ats_report(&content, "terraform terraform");
        assert_eq!(report.overall_score, 0);
        assert_eq!(report.missing, vec!["terraform".to_string()]);
    }

    #[test]
    fn test_empty_jd_scores_zero() {
        let report = compute_ats_report(&ResumeContent::default(), "");
        assert_eq!(report.overall_score, 0);
        assert!(report.matched.is_empty());
        assert!(report.missing.is_empty());
    }

    #[test]
    fn test_stop_words_and_numbers_are_dropped() {
        let keywords = extract_keywords("We are looking for a candidate with 5 years experience");
        assert!(keywords.iter().all(|k| k.term != "we" && k.term != "5"));
    }

    #[test]
    fn test_keyword_order_is_stable() {
        let jd = "rust sql rust docker sql rust";
        let first = extract_keywords(jd);
        let second = extract_keywords(jd);
        let terms: Vec<_> = first.iter().map(|k| k.term.clone()).collect();
        assert_eq!(terms, vec!["rust", "sql", "docker"]);
        assert_eq!(terms, second.iter().map(|k| k.term.clone()).collect::<Vec<_>>());
    }

    #[test]
    fn test_plus_and_hash_survive_tokenization() {
        let keywords = extract_keywords("Looking for c++ and c# developers");
        let terms: Vec<_> = keywords.iter().map(|k| k.term.as_str()).collect();
        assert!(terms.contains(&"c++"));
        assert!(terms.contains(&"c#"));
    }

    #[test]
    fn test_score_is_weighted_by_frequency() {
        // "rust" appears 3×, "terraform" once: 3/4 of weight covered at 1.0
        let content = content_with_skills(&["Rust"]);
        let report = compute_ats_report(&content, "rust rust rust terraform");
        assert_eq!(report.overall_score, 75);
    }

    #[test]
    fn test_recommendation_bands() {
        assert!(build_recommendation(85, &[]).contains("Strong"));
        let missing = vec!["kafka".to_string()];
        assert!(build_recommendation(60, &missing).contains("kafka"));
        assert!(build_recommendation(20, &missing).contains("20"));
    }
}
