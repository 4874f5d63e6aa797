use axum::{extract::State, http::HeaderMap, response::Response, Form};
use std::time::Instant;
use tracing::{info, warn};

use super::pages::{open_session, respond};
use crate::models::{GeneratedPrompt, GenerationOutcome, PassForm};
use crate::router::{run_pass, RenderTarget};
use crate::session::{SessionContext, SessionId};
use crate::state::AppState;
use crate::utils::error::ApiError;

/// `POST /generate` - render pass plus a call to the prompt generator
pub async fn generate_prompt(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<PassForm>,
) -> Result<Response, ApiError> {
    let (id, mut context, created) = open_session(&state, &headers)?;
    let target = run_pass(&mut context, &form);

    // A stale page can post here while the session is on Home or blocked;
    // the dispatcher result wins and nothing is generated.
    if target == RenderTarget::GeneratePrompt {
        context.last_outcome = Some(run_generation(&state, id, &context).await);
    }

    respond(&state, id, context, created, target)
}

async fn run_generation(
    state: &AppState,
    id: SessionId,
    context: &SessionContext,
) -> GenerationOutcome {
    let start_time = Instant::now();
    match request_prompt(state, context).await {
        Ok(prompt) => {
            info!(
                session = %id,
                model = %prompt.model,
                chars = prompt.text.len(),
                "Prompt generated in {:?}",
                start_time.elapsed()
            );
            GenerationOutcome::Generated(prompt)
        }
        Err(e) => {
            warn!(session = %id, "Prompt generation failed: {}", e);
            GenerationOutcome::Failed(e.user_message())
        }
    }
}

async fn request_prompt(
    state: &AppState,
    context: &SessionContext,
) -> Result<GeneratedPrompt, ApiError> {
    if context.draft.project_description.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Please describe your project before generating a prompt.".to_string(),
        ));
    }

    let credential = context.credentials.get().ok_or_else(|| {
        ApiError::BadRequest("Please enter your Claude API key in the sidebar.".to_string())
    })?;

    state.generator.generate(credential, &context.draft).await
}
