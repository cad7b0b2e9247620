// Prompt constants for the resume generation module.
// The completion MUST be a single JSON object matching ResumeContent —
// complete_json() strips fences but will not repair prose.

pub const GENERATION_SYSTEM: &str = "You are a resume-writing assistant. \
You produce structured resume drafts from a short free-text description of \
a person and their target role. You respond with a single JSON object and \
nothing else: no prose, no markdown, no explanations. Never invent employers, \
dates, or credentials the description does not mention; leave unknown fields \
null or empty.";

pub const DRAFT_PROMPT_TEMPLATE: &str = r#"Draft a resume from this description.

Resume title: {title}

Description:
{description}

Return a single JSON object with exactly this shape (snake_case keys, all
fields optional, omit nothing — use null or [] when unknown):

{
  "profile_info": {"full_name": string|null, "designation": string|null, "summary": string|null},
  "contact_info": {"email": string|null, "phone": string|null, "location": string|null},
  "work_experience": [{"job_title": string|null, "company": string|null,
                       "start_date": string|null, "end_date": string|null,
                       "description": [string, ...]}],
  "education": [{"degree": string|null, "institution": string|null,
                 "start_date": string|null, "end_date": string|null}],
  "skills": [{"name": string}]
}

Guidelines:
- summary: 2-3 sentences, at least 25 characters, grounded in the description.
- Write experience descriptions as concise achievement bullets.
- List 5-8 skills the description supports.
"#;

/// Fills the draft prompt with the user's input.
pub fn build_draft_prompt(title: &str, description: &str) -> String {
    DRAFT_PROMPT_TEMPLATE
        .replace("{title}", title)
        .replace("{description}", description)
}
