//! Axum route handlers for resume CRUD and the ATS report.
//!
//! Every route is owner-scoped: a resume belonging to another user is a 404,
//! not a 403, so ids do not leak existence.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::auth::middleware::CurrentUser;
use crate::errors::AppError;
use crate::models::resume::{ResumeContent, ResumeRow};
use crate::scoring::ats::{compute_ats_report, AtsReport};
use crate::scoring::completion::compute_completion;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateResumeRequest {
    pub title: String,
    #[serde(default)]
    pub content: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateResumeRequest {
    pub title: Option<String>,
    pub content: Option<Value>,
    pub thumbnail_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AtsScoreRequest {
    pub jd_text: String,
}

/// POST /api/v1/resumes
pub async fn handle_create(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    let content_value = request.content.unwrap_or_else(|| serde_json::json!({}));
    let completion = score_document(&content_value, &state) as i16;

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

    Ok(Json(resume))
}

/// GET /api/v1/resumes
pub async fn handle_list(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    let resumes = sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE user_id = $1 ORDER BY updated_at DESC",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(resumes))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    let resume = fetch_owned(&state, user.id, resume_id).await?;
    Ok(Json(resume))
}

/// PUT /api/v1/resumes/:id
///
/// Partial update: absent fields keep their stored values. The merged
/// document is rescored before it is written back.
pub async fn handle_update(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(resume_id): Path<Uuid>,
    Json(request): Json<UpdateResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    let existing = fetch_owned(&state, user.id, resume_id).await?;

    if let Some(title) = &request.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation("title cannot be empty".to_string()));
        }
    }

    let (title, content_value, thumbnail_key) = merge_update(existing, request);
    let completion = score_document(&content_value, &state) as i16;

    let resume = sqlx::query_as::<_, ResumeRow>(
        r#"
        UPDATE resumes
        SET title = $1, content = $2, completion = $3, thumbnail_key = $4, updated_at = NOW()
        WHERE id = $5 AND user_id = $6
        RETURNING *
        "#,
    )
    .bind(&title)
    .bind(&content_value)
    .bind(completion)
    .bind(&thumbnail_key)
    .bind(resume_id)
    .bind(user.id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(resume))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(resume_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
        .bind(resume_id)
        .bind(user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Resume {resume_id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/resumes/:id/ats-score
///
/// Scores the stored resume against a pasted job description. The report is
/// returned to the caller and not persisted.
pub async fn handle_ats_score(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(resume_id): Path<Uuid>,
    Json(request): Json<AtsScoreRequest>,
) -> Result<Json<AtsReport>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let resume = fetch_owned(&state, user.id, resume_id).await?;
    let report = compute_ats_report(&resume.content(), &request.jd_text);
    Ok(Json(report))
}

async fn fetch_owned(
    state: &AppState,
    user_id: Uuid,
    resume_id: Uuid,
) -> Result<ResumeRow, AppError> {
    sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
        .bind(resume_id)
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))
}

fn score_document(content_value: &Value, state: &AppState) -> u8 {
    compute_completion(&ResumeContent::from_value(content_value), &state.scoring)
}

/// Applies a partial update to a stored row, returning the merged
/// (title, content, thumbnail_key) triple to persist.
fn merge_update(
    existing: ResumeRow,
    request: UpdateResumeRequest,
) -> (String, Value, Option<String>) {
    let title = request
        .title
        .map(|t| t.trim().to_string())
        .unwrap_or(existing.title);
    let content = request.content.unwrap_or(existing.content);
    let thumbnail_key = request.thumbnail_key.or(existing.thumbnail_key);
    (title, content, thumbnail_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn row(title: &str, content: Value) -> ResumeRow {
        ResumeRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: title.to_string(),
            content,
            completion: 0,
            thumbnail_key: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_merge_keeps_stored_values_for_absent_fields() {
        let existing = row("My resume", json!({"skills": []}));
        let (title, content, thumbnail) = merge_update(existing, UpdateResumeRequest::default());
        assert_eq!(title, "My resume");
        assert_eq!(content, json!({"skills": []}));
        assert!(thumbnail.is_none());
    }

    #[test]
    fn test_merge_overwrites_present_fields() {
        let existing = row("Old title", json!({}));
        let request = UpdateResumeRequest {
            title: Some("  New title  ".to_string()),
            content: Some(json!({"profile_info": {"full_name": "Jane"}})),
            thumbnail_key: Some("uploads/u/t.png".to_string()),
        };
        let (title, content, thumbnail) = merge_update(existing, request);
        assert_eq!(title, "New title");
        assert_eq!(content["profile_info"]["full_name"], "Jane");
        assert_eq!(thumbnail.as_deref(), Some("uploads/u/t.png"));
    }

    #[test]
    fn test_merge_keeps_existing_thumbnail_when_absent() {
        let mut existing = row("Title", json!({}));
        existing.thumbnail_key = Some("uploads/u/old.png".to_string());
        let (_, _, thumbnail) = merge_update(existing, UpdateResumeRequest::default());
        assert_eq!(thumbnail.as_deref(), Some("uploads/u/old.png"));
    }

    #[test]
    fn test_create_request_accepts_missing_content() {
        let request: CreateResumeRequest =
            serde_json::from_value(json!({"title": "My resume"})).unwrap();
        assert!(request.content.is_none());
    }

    #[test]
    fn test_update_request_is_fully_optional() {
        let request: UpdateResumeRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.title.is_none());
        assert!(request.content.is_none());
        assert!(request.thumbnail_key.is_none());
    }
}
