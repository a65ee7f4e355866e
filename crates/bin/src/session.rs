//! Session management for the web interface
//!
//! Maps session tokens to per-browser [`ChatSession`]s. Each browser gets
//! its own transcript, and no session can see another's.

use std::{collections::HashMap, sync::Arc, time::Duration};

use chatbox::{ChatSession, TranscriptController};
use tokio::{
    sync::{Mutex, RwLock},
    time::Instant,
};
use uuid::Uuid;

/// Session token (UUID stored in cookie)
pub type SessionToken = String;

/// Shared handle to one session's chat state.
pub type SessionHandle = Arc<Mutex<ChatSession>>;

/// Sessions unused for this long are dropped.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(60 * 60);

/// Upper bound on live sessions before the least recently used is evicted.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

struct SessionEntry {
    handle: SessionHandle,
    last_seen: Instant,
}

/// In-memory session store
///
/// Sessions are ephemeral and lost on server restart. A session expires
/// after `idle_ttl` without use, and the store never holds more than
/// `max_sessions` at once.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, SessionEntry>>>,
    controller: TranscriptController,
    idle_ttl: Duration,
    max_sessions: usize,
}

impl SessionStore {
    /// Create a new empty session store whose sessions use `controller`.
    pub fn new(controller: TranscriptController) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            controller,
            idle_ttl: DEFAULT_IDLE_TTL,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }

    /// Set the idle expiry and the session cap.
    pub fn with_limits(mut self, idle_ttl: Duration, max_sessions: usize) -> Self {
        self.idle_ttl = idle_ttl;
        self.max_sessions = max_sessions.max(1);
        self
    }

    pub fn idle_ttl(&self) -> Duration {
        self.idle_ttl
    }

    fn is_expired(&self, entry: &SessionEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.last_seen) >= self.idle_ttl
    }

    /// Create a new session with an empty transcript
    ///
    /// Returns the token to be stored in a cookie, along with the session.
    /// Expired sessions are dropped first. If the store is still full, the
    /// least recently used session is evicted.
    pub async fn create_session(&self) -> (SessionToken, SessionHandle) {
        let token = Uuid::new_v4().to_string();
        let session = Arc::new(Mutex::new(
            ChatSession::new().with_controller(self.controller.clone()),
        ));

        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, entry| !self.is_expired(entry, now));
        while sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(token, _)| token.clone())
            else {
                break;
            };
            sessions.remove(&oldest);
            tracing::debug!("Evicted least recently used session {oldest}");
        }

        sessions.insert(
            token.clone(),
            SessionEntry {
                handle: session.clone(),
                last_seen: now,
            },
        );
        tracing::debug!("Created session {token}");
        (token, session)
    }

    /// Get a session by token, refreshing its idle timer
    pub async fn get_session(&self, token: &str) -> Option<SessionHandle> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(token)?;
        if self.is_expired(entry, now) {
            sessions.remove(token);
            tracing::debug!("Session {token} expired");
            return None;
        }
        entry.last_seen = now;
        Some(entry.handle.clone())
    }

    /// Get the session for `token`, or create a fresh one.
    ///
    /// The returned token differs from the input when a new session was made.
    pub async fn get_or_create(&self, token: Option<&str>) -> (SessionToken, SessionHandle) {
        if let Some(token) = token
            && let Some(session) = self.get_session(token).await
        {
            return (token.to_string(), session);
        }
        self.create_session().await
    }

    /// Destroy a session, dropping its transcript
    pub async fn destroy_session(&self, token: &str) {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(token).is_some() {
            tracing::debug!("Destroyed session {token}");
        }
    }

    /// Drop every session idle for longer than the TTL.
    ///
    /// Returns the number of sessions removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_expired(entry, now));
        before - sessions.len()
    }

    /// Get the number of active sessions
    pub async fn session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(TranscriptController::new())
    }
}

/// Periodically drop idle sessions from `store`.
pub async fn sweep_expired(store: SessionStore, period: Duration) {
    let mut ticker = tokio::time::interval(period.max(Duration::from_secs(1)));
    loop {
        ticker.tick().await;
        let removed = store.purge_expired().await;
        if removed > 0 {
            tracing::info!("Expired {removed} idle session(s)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_or_create_reuses_known_token() {
        let store = SessionStore::default();
        let (token, _) = store.create_session().await;

        let (same, _) = store.get_or_create(Some(&token)).await;
        assert_eq!(same, token);
        assert_eq!(store.session_count().await, 1);

        let (fresh, _) = store.get_or_create(Some("unknown")).await;
        assert_ne!(fresh, "unknown");
        assert_eq!(store.session_count().await, 2);
    }

    #[tokio::test]
    async fn test_sessions_do_not_share_transcripts() {
        let store = SessionStore::default();
        let (_, a) = store.create_session().await;
        let (_, b) = store.create_session().await;

        a.lock().await.submit("only in a").unwrap();
        assert_eq!(a.lock().await.transcript().len(), 2);
        assert!(b.lock().await.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_destroy_session() {
        let store = SessionStore::default();
        let (token, _) = store.create_session().await;
        store.destroy_session(&token).await;
        assert!(store.get_session(&token).await.is_none());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_store_controller_applies_to_sessions() {
        let store = SessionStore::new(TranscriptController::new().with_plot_trigger("chart"));
        let (_, session) = store.create_session().await;
        let mut session = session.lock().await;
        session.submit("a chart please").unwrap();
        assert_eq!(session.transcript().len(), 3);
    }

    #[tokio::test]
    async fn test_cookieless_requests_are_capped() {
        let store = SessionStore::default().with_limits(DEFAULT_IDLE_TTL, 16);
        for _ in 0..1000 {
            store.get_or_create(None).await;
        }
        assert_eq!(store.session_count().await, 16);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_store_evicts_least_recently_used() {
        let store = SessionStore::default().with_limits(DEFAULT_IDLE_TTL, 2);
        let (a, _) = store.create_session().await;
        tokio::time::advance(Duration::from_secs(1)).await;
        let (b, _) = store.create_session().await;
        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(store.get_session(&a).await.is_some());
        tokio::time::advance(Duration::from_secs(1)).await;

        let (c, _) = store.create_session().await;
        assert_eq!(store.session_count().await, 2);
        assert!(store.get_session(&b).await.is_none());
        assert!(store.get_session(&a).await.is_some());
        assert!(store.get_session(&c).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_sessions_expire() {
        let store = SessionStore::default().with_limits(Duration::from_secs(60), 100);
        let (idle, _) = store.create_session().await;
        let (active, _) = store.create_session().await;

        tokio::time::advance(Duration::from_secs(45)).await;
        assert!(store.get_session(&active).await.is_some());
        tokio::time::advance(Duration::from_secs(30)).await;

        assert_eq!(store.purge_expired().await, 1);
        assert!(store.get_session(&idle).await.is_none());
        assert!(store.get_session(&active).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_token_gets_fresh_session() {
        let store = SessionStore::default().with_limits(Duration::from_secs(60), 100);
        let (token, old) = store.create_session().await;
        old.lock().await.submit("before expiry").unwrap();

        tokio::time::advance(Duration::from_secs(61)).await;
        let (fresh, session) = store.get_or_create(Some(&token)).await;
        assert_ne!(fresh, token);
        assert!(session.lock().await.transcript().is_empty());
        assert_eq!(store.session_count().await, 1);
    }
}
