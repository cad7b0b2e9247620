//! Axum route handler for AI-assisted resume drafting.

use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::middleware::CurrentUser;
use crate::errors::AppError;
use crate::generation::generator::DraftInput;
use crate::models::resume::ResumeRow;
use crate::scoring::completion::compute_completion;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateResumeRequest {
    pub title: String,
    pub description: String,
}

/// POST /api/v1/resumes/generate
///
/// Drafts a resume from a free-text description (LLM with template
/// fallback), scores it with the same rules as user-authored documents,
/// and persists it for the caller.
pub async fn handle_generate(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<GenerateResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::Validation(
            "description cannot be empty".to_string(),
        ));
    }

    let input = DraftInput {
        title: title.to_string(),
        description: request.description.clone(),
    };
    let content = state.generator.draft(&input).await?;

    let completion = compute_completion(&content, &state.scoring) as i16;
    let content_value = serde_json::to_value(&content)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize draft: {e}")))?;

    let resume = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (id, user_id, title, content, completion)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(title)
    .bind(&content_value)
    .bind(completion)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(
        "Generated resume {} (completion {}%) for user {}",
        resume.id,
        resume.completion,
        user.id
    );

    Ok(Json(resume))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_deserialization() {
        let request: GenerateResumeRequest = serde_json::from_value(serde_json::json!({
            "title": "Backend resume",
            "description": "Engineer with 5 years of Rust"
        }))
        .unwrap();
        assert_eq!(request.title, "Backend resume");
        assert!(!request.description.is_empty());
    }
}
