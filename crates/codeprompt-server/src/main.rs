use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use codeprompt_server::config::Settings;
use codeprompt_server::routes::build_router;
use codeprompt_server::services::AnthropicClient;
use codeprompt_server::state::AppState;
use codeprompt_server::telemetry;
use codeprompt_server::utils::limiters::Limiters;
use codeprompt_server::views::{PageRenderer, Stylesheet};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration (also reads .env)
    let settings = Settings::load()?;

    // Initialize logging
    let _log_guard = telemetry::init_telemetry(&settings.logging)?;

    info!("🚀 Starting CodePromptPro server...");
    info!("✅ Configuration loaded");

    // Stylesheet and templates must be present before we accept traffic
    let stylesheet = Stylesheet::load(&settings.ui.stylesheet_path)?;
    let pages = PageRenderer::new(stylesheet, settings.ui.page_title.clone())?;
    info!("✅ Page templates compiled");

    let limiters = Arc::new(Limiters::new(&settings.limits));
    let generator = Arc::new(AnthropicClient::new(
        settings.anthropic.clone(),
        settings.prompts.system_prompt.clone(),
        limiters,
    ));
    info!(
        "✅ Anthropic client ready (model={}, base_url={})",
        settings.anthropic.model, settings.anthropic.base_url
    );

    let state = AppState::new(settings.clone(), generator, pages);

    // Drop expired sessions in the background
    state
        .sessions
        .clone()
        .spawn_sweeper(settings.session.cleanup_interval());
    info!("✅ Session sweeper started");

    let app = build_router(state);

    // Server address
    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));

    info!("🎯 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
