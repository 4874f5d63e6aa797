use std::sync::Arc;

use crate::config::Settings;
use crate::services::PromptGenerator;
use crate::session::SessionStore;
use crate::views::PageRenderer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub sessions: Arc<SessionStore>,
    pub generator: Arc<dyn PromptGenerator>,
    pub pages: Arc<PageRenderer>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        generator: Arc<dyn PromptGenerator>,
        pages: PageRenderer,
    ) -> Self {
        let sessions = Arc::new(SessionStore::new(&settings.session));
        Self {
            settings: Arc::new(settings),
            sessions,
            generator,
            pages: Arc::new(pages),
        }
    }
}
