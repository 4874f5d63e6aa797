use std::fmt;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::models::{GenerationOutcome, PromptRequest};
use crate::router::ViewRouter;
use crate::security::CredentialSlot;

pub type SessionId = Uuid;

/// Per-browser state that survives between render passes.
#[derive(Clone)]
pub struct SessionContext {
    pub router: ViewRouter,

    /// Current value of the masked sidebar input
    pub api_key_input: String,

    /// Retained values of the generate page inputs
    pub draft: PromptRequest,

    pub credentials: CredentialSlot,

    pub last_outcome: Option<GenerationOutcome>,

    pub created_at: Instant,
    pub last_activity: Instant,
}

impl SessionContext {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            router: ViewRouter::default(),
            api_key_input: String::new(),
            draft: PromptRequest::default(),
            credentials: CredentialSlot::default(),
            last_outcome: None,
            created_at: now,
            last_activity: now,
        }
    }

    /// Expired once older than `ttl` or unused for longer than `idle`.
    pub fn is_expired(&self, ttl: Duration, idle: Duration) -> bool {
        self.created_at.elapsed() > ttl || self.last_activity.elapsed() > idle
    }

    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("view", &self.router.current_view())
            .field("api_key_entered", &!self.api_key_input.is_empty())
            .field("credentials", &self.credentials)
            .field("has_outcome", &self.last_outcome.is_some())
            .field("created_at", &self.created_at)
            .field("last_activity", &self.last_activity)
            .finish()
    }
}
