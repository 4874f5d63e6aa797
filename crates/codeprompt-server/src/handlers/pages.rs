use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
    Form,
};
use tracing::debug;

use crate::models::PassForm;
use crate::router::{run_pass, RenderTarget};
use crate::session::{cookie, SessionContext, SessionId};
use crate::state::AppState;
use crate::utils::error::ApiError;

/// `GET /` - render pass with no input (first visit or reload)
pub async fn show_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    render_pass(&state, &headers, PassForm::reload())
}

/// `POST /` - sidebar buttons and key input
pub async fn submit_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<PassForm>,
) -> Result<Response, ApiError> {
    render_pass(&state, &headers, form)
}

fn render_pass(state: &AppState, headers: &HeaderMap, form: PassForm) -> Result<Response, ApiError> {
    let (id, mut context, created) = open_session(state, headers)?;
    let target = run_pass(&mut context, &form);
    respond(state, id, context, created, target)
}

pub(crate) fn open_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(SessionId, SessionContext, bool), ApiError> {
    let requested = cookie::session_id_from_headers(headers, &state.settings.session.cookie_name);
    state.sessions.open(requested)
}

/// Renders the page, saves the session and attaches the cookie for new sessions.
pub(crate) fn respond(
    state: &AppState,
    id: SessionId,
    context: SessionContext,
    created: bool,
    target: RenderTarget,
) -> Result<Response, ApiError> {
    let body = state.pages.render(target, &context)?;
    debug!(session = %id, ?target, created, "Rendered page");
    state.sessions.save(id, context);

    let mut response = Html(body).into_response();
    if created {
        let value = cookie::session_cookie(
            &state.settings.session.cookie_name,
            id,
            state.settings.session.ttl(),
        )?;
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    Ok(response)
}
