//! One render pass over a session, without any HTTP or HTML involved.

use tracing::debug;

use super::dispatch::{dispatch, RenderTarget};
use crate::models::PassForm;
use crate::security::CredentialGate;
use crate::session::SessionContext;

/// Applies a submission to the session and decides what to render.
///
/// Order matters: navigation first, then widget values, then the gate reads
/// the key input and publishes it, and only then the dispatcher runs.
pub fn run_pass(context: &mut SessionContext, form: &PassForm) -> RenderTarget {
    if let Some(event) = form.nav {
        context.router.apply(event);
    }

    if let Some(api_key) = &form.api_key {
        context.api_key_input = api_key.clone();
    }
    if let Some(description) = &form.project_description {
        context.draft.project_description = description.clone();
    }
    if let Some(features) = &form.key_features {
        context.draft.key_features = features.clone();
    }
    if let Some(requirements) = &form.technical_requirements {
        context.draft.technical_requirements = requirements.clone();
    }

    let gate = CredentialGate::read(&context.api_key_input);
    let previous = context.credentials.get().cloned();
    let published = gate.publish(&mut context.credentials);

    // A result produced under another key is not shown under this one.
    if published && context.credentials.get() != previous.as_ref() {
        context.last_outcome = None;
    }

    let target = dispatch(context.router.current_view(), &gate);
    debug!(
        view = ?context.router.current_view(),
        ?target,
        published,
        "render pass dispatched"
    );
    target
}
