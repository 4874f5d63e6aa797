use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Render passes
        .route(
            "/",
            get(handlers::pages::show_page).post(handlers::pages::submit_page),
        )
        .route("/generate", post(handlers::generate::generate_prompt))
        // Health
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check))
        .with_state(state)
        .layer(CatchPanicLayer::new())
        // Request headers carry the session cookie, so they stay out of spans
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::GeneratedPrompt;
    use crate::security::Credential;
    use crate::services::prompt_generator::MockPromptGenerator;
    use crate::session::SessionId;
    use crate::utils::error::ApiError;
    use crate::views::{PageRenderer, Stylesheet};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use std::sync::Arc;
    use tower::ServiceExt;

    const ADVISORY: &str = "Please enter your Claude API key in the sidebar";
    const GENERATE_FORM: &str = "formaction=\"/generate\"";

    fn test_state(generator: MockPromptGenerator) -> AppState {
        let pages = PageRenderer::new(Stylesheet::from_source(".test {}"), "CodePromptPro").unwrap();
        AppState::new(Settings::default(), Arc::new(generator), pages)
    }

    async fn get_page(app: &Router, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri("/");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        app.clone().oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
    }

    async fn post_form(app: &Router, uri: &str, cookie: Option<&str>, body: &str) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        app.clone()
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Returns the `name=value` cookie pair and the session id it carries.
    fn session_cookie(response: &Response) -> (String, SessionId) {
        let raw = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("session cookie")
            .to_str()
            .unwrap();
        let pair = raw.split(';').next().unwrap().to_string();
        let id = pair.split_once('=').unwrap().1.parse().unwrap();
        (pair, id)
    }

    fn published(state: &AppState, id: SessionId) -> Option<String> {
        state
            .sessions
            .get(id)
            .and_then(|ctx| ctx.credentials.get().map(|c| c.expose().to_string()))
    }

    #[tokio::test]
    async fn test_first_visit_renders_home_and_sets_cookie() {
        let app = build_router(test_state(MockPromptGenerator::new()));

        let response = get_page(&app, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let (cookie, _) = session_cookie(&response);
        assert!(cookie.starts_with("codeprompt_session="));

        let body = body_text(response).await;
        assert!(body.contains("Welcome to CodePromptPro"));
        assert!(body.contains("<style>.test {}</style>"));
    }

    #[tokio::test]
    async fn test_navigation_and_credential_scenario() {
        let state = test_state(MockPromptGenerator::new());
        let app = build_router(state.clone());

        let first = get_page(&app, None).await;
        let (cookie, id) = session_cookie(&first);

        let blocked = post_form(&app, "/", Some(&cookie), "nav=generate_prompt&api_key=").await;
        assert!(blocked.headers().get(header::SET_COOKIE).is_none());
        let body = body_text(blocked).await;
        assert!(body.contains(ADVISORY));
        assert!(!body.contains(GENERATE_FORM));

        let unlocked = post_form(&app, "/", Some(&cookie), "api_key=sk-test-123").await;
        let body = body_text(unlocked).await;
        assert!(body.contains(GENERATE_FORM));
        assert!(!body.contains(ADVISORY));
        assert_eq!(published(&state, id).as_deref(), Some("sk-test-123"));

        let cleared = post_form(&app, "/", Some(&cookie), "api_key=").await;
        assert!(body_text(cleared).await.contains(ADVISORY));

        let home = post_form(&app, "/", Some(&cookie), "nav=home&api_key=").await;
        assert!(body_text(home).await.contains("Welcome to CodePromptPro"));
    }

    #[tokio::test]
    async fn test_reload_forgets_key_but_keeps_view() {
        let state = test_state(MockPromptGenerator::new());
        let app = build_router(state.clone());

        let first = get_page(&app, None).await;
        let (cookie, id) = session_cookie(&first);
        let unlocked = post_form(
            &app,
            "/",
            Some(&cookie),
            "nav=generate_prompt&api_key=sk-secret-999",
        )
        .await;
        assert!(body_text(unlocked).await.contains("sk-secret-999"));

        let reloaded = get_page(&app, Some(&cookie)).await;
        let body = body_text(reloaded).await;
        assert!(body.contains(ADVISORY));
        assert!(!body.contains(GENERATE_FORM));
        assert!(!body.contains("sk-secret-999"));

        let context = state.sessions.get(id).unwrap();
        assert_eq!(context.router.current_view(), crate::router::ViewState::GeneratePrompt);
        assert!(context.api_key_input.is_empty());
    }

    #[tokio::test]
    async fn test_generate_passes_session_credential() {
        let mut generator = MockPromptGenerator::new();
        generator
            .expect_generate()
            .withf(|credential: &Credential, request| {
                credential.expose() == "sk-test-123"
                    && request.project_description == "Inventory tracker"
                    && request.key_features == "Barcode scanning"
            })
            .times(1)
            .returning(|_, _| Ok(GeneratedPrompt::new("# Inventory **prompt**", "claude-test")));
        let app = build_router(test_state(generator));

        let response = post_form(
            &app,
            "/generate",
            None,
            "nav=generate_prompt&api_key=sk-test-123&project_description=Inventory+tracker&key_features=Barcode+scanning&technical_requirements=",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(body.contains("<h1>Inventory <strong>prompt</strong></h1>"));
        assert!(body.contains("Inventory tracker"));
    }

    #[tokio::test]
    async fn test_sessions_do_not_share_credentials() {
        let mut generator = MockPromptGenerator::new();
        generator
            .expect_generate()
            .withf(|credential: &Credential, _| credential.expose() == "sk-bob")
            .times(1)
            .returning(|_, _| Ok(GeneratedPrompt::new("prompt for bob", "claude-test")));
        let state = test_state(generator);
        let app = build_router(state.clone());

        let alice = get_page(&app, None).await;
        let (alice_cookie, alice_id) = session_cookie(&alice);
        let bob = get_page(&app, None).await;
        let (bob_cookie, bob_id) = session_cookie(&bob);

        post_form(&app, "/", Some(&alice_cookie), "nav=generate_prompt&api_key=sk-alice").await;
        post_form(&app, "/", Some(&bob_cookie), "nav=generate_prompt&api_key=sk-bob").await;
        let response = post_form(
            &app,
            "/generate",
            Some(&bob_cookie),
            "api_key=sk-bob&project_description=Blog",
        )
        .await;
        assert!(body_text(response).await.contains("prompt for bob"));

        assert_eq!(published(&state, alice_id).as_deref(), Some("sk-alice"));
        assert_eq!(published(&state, bob_id).as_deref(), Some("sk-bob"));
    }

    #[tokio::test]
    async fn test_generate_is_not_called_when_blocked_or_incomplete() {
        let mut generator = MockPromptGenerator::new();
        generator.expect_generate().times(0);
        let app = build_router(test_state(generator));

        let blocked = post_form(
            &app,
            "/generate",
            None,
            "nav=generate_prompt&api_key=&project_description=Blog",
        )
        .await;
        assert!(body_text(blocked).await.contains(ADVISORY));

        let incomplete = post_form(
            &app,
            "/generate",
            None,
            "nav=generate_prompt&api_key=sk-test-123&project_description=++",
        )
        .await;
        assert!(body_text(incomplete)
            .await
            .contains("Please describe your project before generating a prompt."));
    }

    #[tokio::test]
    async fn test_rejected_key_is_shown_inline() {
        let mut generator = MockPromptGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_, _| Err(ApiError::Unauthorized("Anthropic API returned 401".into())));
        let app = build_router(test_state(generator));

        let response = post_form(
            &app,
            "/generate",
            None,
            "nav=generate_prompt&api_key=sk-bad&project_description=Blog",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("The API key was rejected"));
        assert!(body.contains(GENERATE_FORM));
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = build_router(test_state(MockPromptGenerator::new()));

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("\"status\":\"healthy\""));

        let response = app
            .oneshot(Request::builder().uri("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(body_text(response).await.contains("\"active_sessions\":0"));
    }
}
