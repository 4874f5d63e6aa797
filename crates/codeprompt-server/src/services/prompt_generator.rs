use async_trait::async_trait;

use crate::models::{GeneratedPrompt, PromptRequest};
use crate::security::Credential;
use crate::utils::error::ApiError;

/// Turns a project description into a prompt for an AI-powered IDE.
///
/// The credential is handed over on every call; implementations must not
/// read it from process-wide state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PromptGenerator: Send + Sync {
    async fn generate(
        &self,
        credential: &Credential,
        request: &PromptRequest,
    ) -> Result<GeneratedPrompt, ApiError>;
}
