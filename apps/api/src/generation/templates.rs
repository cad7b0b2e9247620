//! Local template-based drafting — the deterministic fallback used when the
//! generative-AI call fails. Pulls whatever it can out of the free-text
//! description (name, years of experience, a recognizable role) and fills a
//! role-keyed template. Total: always produces a document.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::{
    Description, ProfileInfo, ResumeContent, SkillEntry, WorkExperience,
};

/// A canned starting point for one family of roles.
struct RoleTemplate {
    /// Keywords in the description that select this template.
    triggers: &'static [&'static str],
    designation: &'static str,
    /// `{years}` is substituted when the description mentions a figure.
    summary: &'static str,
    skills: &'static [&'static str],
    responsibilities: &'static [&'static str],
}

static ROLE_TEMPLATES: &[RoleTemplate] = &[
    RoleTemplate {
        triggers: &["engineer", "developer", "programmer", "backend", "frontend", "fullstack"],
        designation: "Software Engineer",
        summary: "Software engineer with {years} years of experience designing, building, \
                  and operating production systems, with a focus on reliability and clean, \
                  maintainable code.",
        skills: &["Git", "SQL", "REST APIs", "Testing", "CI/CD"],
        responsibilities: &[
            "Designed and implemented features across the stack",
            "Reviewed code and mentored newer team members",
            "Improved reliability and performance of production services",
        ],
    },
    RoleTemplate {
        triggers: &["designer", "ux", "ui design", "product design"],
        designation: "Product Designer",
        summary: "Product designer with {years} years of experience turning ambiguous \
                  requirements into shipped, user-tested interfaces across web and mobile.",
        skills: &["Figma", "Prototyping", "User Research", "Design Systems", "Accessibility"],
        responsibilities: &[
            "Owned design from discovery through handoff",
            "Ran usability tests and folded findings into iterations",
            "Maintained and extended the design system",
        ],
    },
    RoleTemplate {
        triggers: &["manager", "lead", "director", "head of"],
        designation: "Engineering Manager",
        summary: "Engineering leader with {years} years of experience growing teams, \
                  shipping roadmaps, and keeping delivery predictable without burning \
                  people out.",
        skills: &["Team Leadership", "Roadmapping", "Hiring", "Stakeholder Management", "Agile"],
        responsibilities: &[
            "Led planning and delivery for a cross-functional team",
            "Hired, coached, and grew individual contributors",
            "Aligned engineering work with product and business goals",
        ],
    },
    RoleTemplate {
        triggers: &["analyst", "data", "scientist", "analytics"],
        designation: "Data Analyst",
        summary: "Data analyst with {years} years of experience building dashboards, \
                  pipelines, and analyses that turn raw data into decisions.",
        skills: &["SQL", "Python", "Data Visualization", "Statistics", "ETL"],
        responsibilities: &[
            "Built and maintained reporting used across the business",
            "Translated stakeholder questions into reproducible analyses",
            "Automated manual data workflows",
        ],
    },
    RoleTemplate {
        triggers: &["marketing", "growth", "content", "seo"],
        designation: "Marketing Specialist",
        summary: "Marketing specialist with {years} years of experience planning and \
                  executing campaigns across channels and measuring what actually moves \
                  the numbers.",
        skills: &["Campaign Management", "Copywriting", "SEO", "Analytics", "A/B Testing"],
        responsibilities: &[
            "Planned and ran multi-channel campaigns end to end",
            "Measured and reported on campaign performance",
            "Grew organic traffic through content and SEO work",
        ],
    },
];

/// Used when no trigger matches.
static GENERIC_TEMPLATE: RoleTemplate = RoleTemplate {
    triggers: &[],
    designation: "Professional",
    summary: "Motivated professional with {years} years of experience delivering results, \
              collaborating across teams, and picking up new tools quickly.",
    skills: &["Communication", "Problem Solving", "Organization", "Teamwork", "Adaptability"],
    responsibilities: &[
        "Delivered projects on time against shifting priorities",
        "Coordinated work across teams and stakeholders",
        "Documented and improved recurring processes",
    ],
};

static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    // "my name is Jane Doe", "I am Jane Doe", "I'm Jane Doe" — the trigger is
    // case-insensitive, the captured name must be capitalized
    Regex::new(r"(?i:my name is|i am|i'm)\s+([A-Z][a-zA-Z'-]+(?:\s+[A-Z][a-zA-Z'-]+)?)")
        .expect("name regex is valid")
});

static YEARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})\+?\s*(?:years|yrs)").expect("years regex is valid"));

/// Builds a complete draft document from the title and description.
pub fn build_content(title: &str, description: &str) -> ResumeContent {
    let template = detect_role(description)
        .or_else(|| detect_role(title))
        .unwrap_or(&GENERIC_TEMPLATE);

    let years = extract_years(description);
    let summary = template
        .summary
        .replace("{years}", &years.map_or_else(|| "several".to_string(), |y| y.to_string()));

    ResumeContent {
        profile_info: ProfileInfo {
            full_name: extract_name(description),
            designation: Some(template.designation.to_string()),
            summary: Some(collapse_whitespace(&summary)),
        },
        work_experience: vec![WorkExperience {
            job_title: Some(template.designation.to_string()),
            description: Some(Description::Bullets(
                template.responsibilities.iter().map(|s| s.to_string()).collect(),
            )),
            ..Default::default()
        }],
        skills: template
            .skills
            .iter()
            .map(|s| SkillEntry { name: Some(s.to_string()) })
            .collect(),
        ..Default::default()
    }
}

fn detect_role(text: &str) -> Option<&'static RoleTemplate> {
    let lower = text.to_lowercase();
    ROLE_TEMPLATES
        .iter()
        .find(|t| t.triggers.iter().any(|trigger| lower.contains(trigger)))
}

fn extract_name(text: &str) -> Option<String> {
    NAME_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn extract_years(text: &str) -> Option<u32> {
    YEARS_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// The summary constants are wrapped in source; collapse the indentation runs.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_engineering_role() {
        let content = build_content("My resume", "Backend developer working on APIs");
        assert_eq!(
            content.profile_info.designation.as_deref(),
            Some("Software Engineer")
        );
    }

    #[test]
    fn test_detects_role_from_title_when_description_is_vague() {
        let content = build_content("Product designer resume", "Looking for my next challenge");
        assert_eq!(
            content.profile_info.designation.as_deref(),
            Some("Product Designer")
        );
    }

    #[test]
    fn test_unknown_role_falls_back_to_generic() {
        let content = build_content("Resume", "I enjoy long walks");
        assert_eq!(content.profile_info.designation.as_deref(), Some("Professional"));
        assert_eq!(content.skills.len(), 5);
    }

    #[test]
    fn test_extracts_name() {
        assert_eq!(
            extract_name("Hello, my name is Jane Doe and I build things"),
            Some("Jane Doe".to_string())
        );
        assert_eq!(extract_name("I'm Priya and I design"), Some("Priya".to_string()));
        assert_eq!(extract_name("no name here"), None);
    }

    #[test]
    fn test_extracts_years_into_summary() {
        let content = build_content("Resume", "Software engineer with 7 years of experience");
        let summary = content.profile_info.summary.unwrap();
        assert!(summary.contains("7 years"));
    }

    #[test]
    fn test_missing_years_reads_several() {
        let content = build_content("Resume", "Software engineer");
        assert!(content.profile_info.summary.unwrap().contains("several years"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let a = build_content("Resume", "Data analyst, 3 years, my name is Sam Lee");
        let b = build_content("Resume", "Data analyst, 3 years, my name is Sam Lee");
        assert_eq!(a, b);
    }

    #[test]
    fn test_draft_always_has_experience_and_skills() {
        let content = build_content("", "");
        assert_eq!(content.work_experience.len(), 1);
        assert!(!content.skills.is_empty());
    }
}
