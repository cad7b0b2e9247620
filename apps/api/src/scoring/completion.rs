//! Resume completion scoring — the single source of truth for the 0–100
//! completeness percentage stored on every resume.
//!
//! The function is pure, total, and deterministic: any document shape
//! (absent sections, empty lists, whitespace-only strings, wrong-typed
//! fields already normalized away by `ResumeContent::from_value`) produces
//! a score and never an error. Callers persist the result into
//! `resumes.completion`; nothing is written here.
//!
//! All weights and thresholds live in `ScoringConfig` so tests can override
//! them without touching the scoring logic.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::{
    ContactInfo, Education, ProfileInfo, ResumeContent, SkillEntry, WorkExperience,
};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// Returns true when `value` looks like an email address. This is the one
/// email rule in the codebase — registration uses it too.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// Per-section weights. Must sum to 100.
#[derive(Debug, Clone)]
pub struct SectionWeights {
    pub profile: f64,
    pub contact: f64,
    pub experience: f64,
    pub education: f64,
    pub skills: f64,
}

/// All constants the scorer consults. `Default` is the canonical rule set;
/// every caller in the service uses it unchanged.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub weights: SectionWeights,
    pub min_name_len: usize,
    pub min_designation_len: usize,
    pub min_summary_len: usize,
    pub min_phone_digits: usize,
    pub min_location_len: usize,
    pub min_job_title_len: usize,
    pub min_company_len: usize,
    pub min_description_len: usize,
    pub min_degree_len: usize,
    pub min_institution_len: usize,
    pub min_skill_len: usize,
    /// Skill entries below this count earn no section credit at all.
    pub min_skill_count: usize,
    /// Rounded totals below this collapse to 0.
    pub damp_zero_below: u32,
    /// Rounded totals below this (and at or above `damp_zero_below`) are halved.
    pub damp_half_below: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: SectionWeights {
                profile: 30.0,
                contact: 20.0,
                experience: 25.0,
                education: 15.0,
                skills: 10.0,
            },
            min_name_len: 2,
            min_designation_len: 3,
            min_summary_len: 25,
            min_phone_digits: 10,
            min_location_len: 3,
            min_job_title_len: 3,
            min_company_len: 2,
            min_description_len: 15,
            min_degree_len: 3,
            min_institution_len: 3,
            min_skill_len: 2,
            min_skill_count: 3,
            damp_zero_below: 5,
            damp_half_below: 15,
        }
    }
}

/// Computes the completeness percentage for a resume document.
///
/// Each section contributes `valid_fields / total_fields × weight`; list
/// sections flatten their validators across every entry, and an empty list
/// contributes nothing. The weighted total is rounded half-up, clamped to
/// [0, 100], then dampened at the low end so a single trivially-filled
/// field does not read as meaningful progress.
pub fn compute_completion(content: &ResumeContent, cfg: &ScoringConfig) -> u8 {
    let total = profile_completion(&content.profile_info, cfg) * cfg.weights.profile
        + contact_completion(&content.contact_info, cfg) * cfg.weights.contact
        + experience_completion(&content.work_experience, cfg) * cfg.weights.experience
        + education_completion(&content.education, cfg) * cfg.weights.education
        + skills_completion(&content.skills, cfg) * cfg.weights.skills;

    // f64::round is round-half-up for the non-negative totals produced here.
    let rounded = total.round().clamp(0.0, 100.0) as u32;
    dampen(rounded, cfg) as u8
}

fn dampen(rounded: u32, cfg: &ScoringConfig) -> u32 {
    if rounded < cfg.damp_zero_below {
        0
    } else if rounded < cfg.damp_half_below {
        (rounded as f64 * 0.5).round() as u32
    } else {
        rounded
    }
}

fn profile_completion(profile: &ProfileInfo, cfg: &ScoringConfig) -> f64 {
    ratio(&[
        meets_len(&profile.full_name, cfg.min_name_len),
        meets_len(&profile.designation, cfg.min_designation_len),
        meets_len(&profile.summary, cfg.min_summary_len),
    ])
}

fn contact_completion(contact: &ContactInfo, cfg: &ScoringConfig) -> f64 {
    let phone_digits = trimmed(&contact.phone)
        .chars()
        .filter(|c| c.is_ascii_digit())
        .count();
    ratio(&[
        is_valid_email(trimmed(&contact.email)),
        phone_digits >= cfg.min_phone_digits,
        meets_len(&contact.location, cfg.min_location_len),
    ])
}

fn experience_completion(entries: &[WorkExperience], cfg: &ScoringConfig) -> f64 {
    let checks: Vec<bool> = entries
        .iter()
        .flat_map(|entry| {
            let description_len = entry
                .description
                .as_ref()
                .map(|d| d.joined().trim().chars().count())
                .unwrap_or(0);
            [
                meets_len(&entry.job_title, cfg.min_job_title_len),
                meets_len(&entry.company, cfg.min_company_len),
                has_value(&entry.start_date),
                description_len >= cfg.min_description_len,
            ]
        })
        .collect();
    ratio(&checks)
}

fn education_completion(entries: &[Education], cfg: &ScoringConfig) -> f64 {
    let checks: Vec<bool> = entries
        .iter()
        .flat_map(|entry| {
            [
                meets_len(&entry.degree, cfg.min_degree_len),
                meets_len(&entry.institution, cfg.min_institution_len),
                has_value(&entry.start_date),
            ]
        })
        .collect();
    ratio(&checks)
}

fn skills_completion(skills: &[SkillEntry], cfg: &ScoringConfig) -> f64 {
    if skills.len() < cfg.min_skill_count {
        return 0.0;
    }
    let checks: Vec<bool> = skills
        .iter()
        .map(|s| meets_len(&s.name, cfg.min_skill_len))
        .collect();
    ratio(&checks)
}

fn ratio(checks: &[bool]) -> f64 {
    if checks.is_empty() {
        return 0.0;
    }
    checks.iter().filter(|&&ok| ok).count() as f64 / checks.len() as f64
}

fn trimmed(field: &Option<String>) -> &str {
    field.as_deref().map(str::trim).unwrap_or("")
}

fn meets_len(field: &Option<String>, min: usize) -> bool {
    trimmed(field).chars().count() >= min
}

fn has_value(field: &Option<String>) -> bool {
    !trimmed(field).is_empty()
}
