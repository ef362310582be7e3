//! Per-client session state and the in-memory store that keeps it between requests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::debug;

use super::types::Flash;

/// Pending flashes kept per session; older ones are dropped first.
pub const MAX_PENDING_FLASHES: usize = 8;

/// SHA-256 of the session token; raw tokens are never used as keys.
pub type SessionKey = [u8; 32];

/// State attached to one client: at most one authenticated username plus pending flashes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    username: Option<String>,
    flashes: Vec<Flash>,
}

impl Session {
    #[must_use]
    pub fn current_user(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn set_user(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
    }

    pub fn clear_user(&mut self) {
        self.username = None;
    }

    /// Queue a flash. A message already pending is not queued twice.
    pub fn push_flash(&mut self, flash: Flash) {
        if self.flashes.contains(&flash) {
            return;
        }
        if self.flashes.len() >= MAX_PENDING_FLASHES {
            self.flashes.remove(0);
        }
        self.flashes.push(flash);
    }

    /// Drain pending flashes; each one is delivered once.
    pub fn take_flashes(&mut self) -> Vec<Flash> {
        std::mem::take(&mut self.flashes)
    }

    /// Nothing worth keeping: no user and no pending flashes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.flashes.is_empty()
    }
}

/// Storage collaborator for sessions, scoped per client by [`SessionKey`].
pub trait SessionStore: Send + Sync {
    fn load(&self, key: &SessionKey) -> Option<Session>;
    fn save(&self, key: SessionKey, session: Session);
    fn remove(&self, key: &SessionKey);
    /// Drop expired records and return how many were removed.
    fn purge_expired(&self) -> usize;
}

struct StoredSession {
    session: Session,
    touched_at: Instant,
}

/// Process-local session store with an idle TTL.
pub struct MemorySessionStore {
    ttl: Duration,
    sessions: Mutex<HashMap<SessionKey, StoredSession>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_expired(&self, stored: &StoredSession, now: Instant) -> bool {
        now.saturating_duration_since(stored.touched_at) >= self.ttl
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, key: &SessionKey) -> Option<Session> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        let stored = sessions.get(key)?;
        if self.is_expired(stored, now) {
            sessions.remove(key);
            return None;
        }
        Some(stored.session.clone())
    }

    fn save(&self, key: SessionKey, session: Session) {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.insert(
            key,
            StoredSession {
                session,
                touched_at: Instant::now(),
            },
        );
    }

    fn remove(&self, key: &SessionKey) {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.remove(key);
    }

    fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        let before = sessions.len();
        sessions.retain(|_, stored| !self.is_expired(stored, now));
        before - sessions.len()
    }
}

/// Periodically purge expired sessions so abandoned clients do not accumulate.
pub fn spawn_session_reaper(
    store: Arc<dyn SessionStore>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            sleep(interval).await;

            let purged = store.purge_expired();
            if purged > 0 {
                debug!("purged {purged} expired sessions");
            }
        }
    })
}
