use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::types::{SessionContext, SessionId};
use crate::config::SessionConfig;
use crate::utils::error::ApiError;

/// Thread-safe in-memory session storage
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<DashMap<SessionId, SessionContext>>,
    ttl: Duration,
    idle: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(config: &SessionConfig) -> Self {
        info!(
            "Initializing session store: ttl={}s, idle={}s, max_sessions={}",
            config.ttl_seconds, config.idle_seconds, config.max_sessions
        );
        Self {
            storage: Arc::new(DashMap::new()),
            ttl: config.ttl(),
            idle: config.idle_timeout(),
            max_sessions: config.max_sessions.max(1),
        }
    }

    /// Returns `(id, context, created)`. Unknown or expired ids get a fresh
    /// session under a new id; client-chosen ids are never adopted.
    pub fn open(
        &self,
        requested: Option<SessionId>,
    ) -> Result<(SessionId, SessionContext, bool), ApiError> {
        if let Some(id) = requested {
            if let Some(context) = self.get(id) {
                return Ok((id, context, false));
            }
        }

        if !self.can_create_new_session() {
            return Err(ApiError::ServiceUnavailable(
                "Too many active sessions".to_string(),
            ));
        }

        let id = Uuid::new_v4();
        let context = SessionContext::new();
        self.storage.insert(id, context.clone());
        debug!("Created session {}", id);
        Ok((id, context, true))
    }

    /// Returns None if not found or expired
    pub fn get(&self, id: SessionId) -> Option<SessionContext> {
        let entry = self.storage.get(&id)?;
        let context = entry.value().clone();

        if context.is_expired(self.ttl, self.idle) {
            drop(entry); // release read lock before removing
            self.remove(id);
            debug!("Session {} expired, removed", id);
            return None;
        }

        Some(context)
    }

    pub fn save(&self, id: SessionId, mut context: SessionContext) {
        context.touch();
        self.storage.insert(id, context);
    }

    pub fn remove(&self, id: SessionId) -> Option<SessionContext> {
        self.storage.remove(&id).map(|(_, context)| context)
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn can_create_new_session(&self) -> bool {
        let active = self.storage.len();
        if active >= self.max_sessions {
            warn!(
                "Session limit reached ({} of {}), rejecting new session",
                active, self.max_sessions
            );
            return false;
        }
        true
    }

    /// Returns number of sessions removed
    pub fn cleanup_expired(&self) -> usize {
        let start_len = self.storage.len();
        let (ttl, idle) = (self.ttl, self.idle);
        self.storage.retain(|_, context| !context.is_expired(ttl, idle));

        let count = start_len.saturating_sub(self.storage.len());
        if count > 0 {
            info!("Cleaned up {} expired sessions", count);
        }
        count
    }

    pub fn spawn_sweeper(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                self.cleanup_expired();
            }
        })
    }
}
