//! Resume drafting backends behind one trait.
//!
//! `AppState` holds an `Arc<dyn ResumeGenerator>`; in production that is a
//! `FallbackGenerator` wrapping the LLM backend with the local template
//! backend, so a provider outage degrades to a usable draft instead of a
//! failed request. Drafts are scored and persisted by the handler exactly
//! like user-authored documents.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{build_draft_prompt, GENERATION_SYSTEM};
use crate::generation::templates;
use crate::llm_client::LlmClient;
use crate::models::resume::ResumeContent;

/// Free-text input to a draft request.
#[derive(Debug, Clone, Deserialize)]
pub struct DraftInput {
    pub title: String,
    pub description: String,
}

#[async_trait]
pub trait ResumeGenerator: Send + Sync {
    async fn draft(&self, input: &DraftInput) -> Result<ResumeContent, AppError>;
}

/// Drafts via the LLM. Fails when the provider does.
pub struct LlmResumeGenerator {
    llm: LlmClient,
}

impl LlmResumeGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeGenerator for LlmResumeGenerator {
    async fn draft(&self, input: &DraftInput) -> Result<ResumeContent, AppError> {
        let prompt = build_draft_prompt(&input.title, &input.description);
        let content: ResumeContent = self
            .llm
            .complete_json(GENERATION_SYSTEM, &prompt)
            .await
            .map_err(|e| AppError::Llm(format!("Draft generation failed: {e}")))?;
        Ok(content)
    }
}

/// Drafts from local role templates. Deterministic, never fails.
pub struct TemplateResumeGenerator;

#[async_trait]
impl ResumeGenerator for TemplateResumeGenerator {
    async fn draft(&self, input: &DraftInput) -> Result<ResumeContent, AppError> {
        Ok(templates::build_content(&input.title, &input.description))
    }
}

/// Tries the primary backend, falls back on any error.
pub struct FallbackGenerator {
    primary: Arc<dyn ResumeGenerator>,
    fallback: Arc<dyn ResumeGenerator>,
}

impl FallbackGenerator {
    pub fn new(primary: Arc<dyn ResumeGenerator>, fallback: Arc<dyn ResumeGenerator>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl ResumeGenerator for FallbackGenerator {
    async fn draft(&self, input: &DraftInput) -> Result<ResumeContent, AppError> {
        match self.primary.draft(input).await {
            Ok(content) => Ok(content),
            Err(e) => {
                warn!("Primary generator failed, using template fallback: {e}");
                let content = self.fallback.draft(input).await?;
                info!("Template fallback produced a draft");
                Ok(content)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysFails;

    #[async_trait]
    impl ResumeGenerator for AlwaysFails {
        async fn draft(&self, _input: &DraftInput) -> Result<ResumeContent, AppError> {
            Err(AppError::Llm("provider down".to_string()))
        }
    }

    struct FixedDraft(ResumeContent);

    #[async_trait]
    impl ResumeGenerator for FixedDraft {
        async fn draft(&self, _input: &DraftInput) -> Result<ResumeContent, AppError> {
            Ok(self.0.clone())
        }
    }

    fn input() -> DraftInput {
        DraftInput {
            title: "Backend resume".to_string(),
            description: "Backend engineer, 4 years".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fallback_engages_when_primary_fails() {
        let generator = FallbackGenerator::new(
            Arc::new(AlwaysFails),
            Arc::new(TemplateResumeGenerator),
        );
        let content = generator.draft(&input()).await.unwrap();
        assert!(content.profile_info.designation.is_some());
    }

    #[tokio::test]
    async fn test_primary_result_wins_when_it_succeeds() {
        let mut fixed = ResumeContent::default();
        fixed.profile_info.full_name = Some("From Primary".to_string());
        let generator =
            FallbackGenerator::new(Arc::new(FixedDraft(fixed)), Arc::new(AlwaysFails));
        let content = generator.draft(&input()).await.unwrap();
        assert_eq!(content.profile_info.full_name.as_deref(), Some("From Primary"));
    }

    #[tokio::test]
    async fn test_template_backend_is_total() {
        let content = TemplateResumeGenerator
            .draft(&DraftInput {
                title: String::new(),
                description: String::new(),
            })
            .await
            .unwrap();
        assert!(!content.skills.is_empty());
    }
}
