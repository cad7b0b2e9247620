use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Persisted resume record. `content` is the JSONB document edited by the
/// client; `completion` is the 0–100 score computed server-side on every
/// create and update.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: Value,
    pub completion: i16,
    pub thumbnail_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeRow {
    /// Decodes the stored JSONB document into the typed content model.
    pub fn content(&self) -> ResumeContent {
        ResumeContent::from_value(&self.content)
    }
}

/// The typed resume document. Every field is optional or defaulted: absent,
/// null, empty-string, and whitespace-only values all mean "not provided",
/// so scoring and rendering never have to special-case missing sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeContent {
    pub profile_info: ProfileInfo,
    pub contact_info: ContactInfo,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub skills: Vec<SkillEntry>,
}

impl ResumeContent {
    /// Decodes a JSON value section by section. A section whose stored value
    /// has the wrong shape (e.g. `skills` is a string) degrades to that
    /// section's default — it contributes zero to scoring but never fails.
    pub fn from_value(value: &Value) -> Self {
        ResumeContent {
            profile_info: lenient_section(value, "profile_info"),
            contact_info: lenient_section(value, "contact_info"),
            work_experience: lenient_section(value, "work_experience"),
            education: lenient_section(value, "education"),
            skills: lenient_section(value, "skills"),
        }
    }
}

fn lenient_section<T: DeserializeOwned + Default>(value: &Value, key: &str) -> T {
    value
        .get(key)
        .cloned()
        .map(|v| serde_json::from_value(v).unwrap_or_default())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileInfo {
    pub full_name: Option<String>,
    pub designation: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkExperience {
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<Description>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillEntry {
    pub name: Option<String>,
}

/// Free-text or bulleted description on a work experience entry. Clients
/// store either form; both flatten to one string for scoring and matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Bullets(Vec<String>),
}

impl Description {
    /// Flattens to a single string (bullets newline-joined).
    pub fn joined(&self) -> String {
        match self {
            Description::Text(s) => s.clone(),
            Description::Bullets(items) => items.join("\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_value_decodes_to_default() {
        let content = ResumeContent::from_value(&json!({}));
        assert_eq!(content, ResumeContent::default());
    }

    #[test]
    fn test_partial_document_decodes() {
        let content = ResumeContent::from_value(&json!({
            "profile_info": {"full_name": "Jane Doe"},
            "skills": [{"name": "Rust"}]
        }));
        assert_eq!(content.profile_info.full_name.as_deref(), Some("Jane Doe"));
        assert!(content.profile_info.summary.is_none());
        assert_eq!(content.skills.len(), 1);
        assert!(content.work_experience.is_empty());
    }

    #[test]
    fn test_wrong_shaped_section_degrades_to_default() {
        // skills is not a list — that section alone resets, the rest survives
        let content = ResumeContent::from_value(&json!({
            "profile_info": {"full_name": "Jane Doe"},
            "skills": "rust, sql"
        }));
        assert!(content.skills.is_empty());
        assert_eq!(content.profile_info.full_name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_description_accepts_text_and_bullets() {
        let text: Description = serde_json::from_value(json!("Shipped the thing")).unwrap();
        assert_eq!(text.joined(), "Shipped the thing");

        let bullets: Description =
            serde_json::from_value(json!(["Shipped the thing", "Fixed the bug"])).unwrap();
        assert_eq!(bullets.joined(), "Shipped the thing\nFixed the bug");
    }

    #[test]
    fn test_content_round_trips_through_json() {
        let content = ResumeContent::from_value(&json!({
            "profile_info": {"full_name": "Jane Doe", "designation": "Engineer"},
            "work_experience": [{"job_title": "Dev", "description": ["a", "b"]}]
        }));
        let encoded = serde_json::to_value(&content).unwrap();
        let decoded = ResumeContent::from_value(&encoded);
        assert_eq!(content, decoded);
    }
}
