//! In-memory registry of live sessions.
//!
//! Every session sits behind its own async mutex, so turns for different
//! sessions run concurrently while turns for the same session queue up.
//! A checkout counter marks sessions that are in use; the idle sweep never
//! removes a session whose counter is non-zero.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::domain::foundation::SessionId;
use crate::domain::orchestration::Session;

struct SessionEntry {
    state: Arc<Mutex<Session>>,
    checkouts: AtomicUsize,
}

/// Exclusive handle to one session. Dropping it touches the session and
/// releases the checkout.
pub struct CheckedOutSession {
    guard: OwnedMutexGuard<Session>,
    entry: Arc<SessionEntry>,
    is_new: bool,
}

impl CheckedOutSession {
    /// True when this checkout created the session.
    pub fn is_new(&self) -> bool {
        self.is_new
    }
}

impl Deref for CheckedOutSession {
    type Target = Session;

    fn deref(&self) -> &Session {
        &self.guard
    }
}

impl DerefMut for CheckedOutSession {
    fn deref_mut(&mut self) -> &mut Session {
        &mut self.guard
    }
}

impl Drop for CheckedOutSession {
    fn drop(&mut self) {
        self.guard.touch();
        self.entry.checkouts.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Owner of all session state.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Arc<SessionEntry>>>,
    max_turns: usize,
}

impl SessionRegistry {
    /// Creates an empty registry whose sessions keep at most `max_turns` turns.
    pub fn new(max_turns: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_turns,
        }
    }

    /// Resolves a session, creating it when unknown, and waits for exclusive access.
    ///
    /// Without an id a fresh one is minted.
    pub async fn checkout(&self, session_id: Option<SessionId>) -> CheckedOutSession {
        let session_id = session_id.unwrap_or_else(SessionId::generate);

        let (entry, is_new) = {
            let mut sessions = self.sessions.write().await;
            let mut is_new = false;
            let entry = sessions
                .entry(session_id.clone())
                .or_insert_with(|| {
                    is_new = true;
                    Arc::new(SessionEntry {
                        state: Arc::new(Mutex::new(Session::new(
                            session_id.clone(),
                            self.max_turns,
                        ))),
                        checkouts: AtomicUsize::new(0),
                    })
                })
                .clone();
            entry.checkouts.fetch_add(1, Ordering::SeqCst);
            (entry, is_new)
        };

        if is_new {
            tracing::info!(session_id = %session_id, "Session created");
        }

        let guard = Arc::clone(&entry.state).lock_owned().await;
        CheckedOutSession {
            guard,
            entry,
            is_new,
        }
    }

    /// Checks out an existing session without creating one.
    pub async fn checkout_existing(&self, session_id: &SessionId) -> Option<CheckedOutSession> {
        let entry = {
            let sessions = self.sessions.read().await;
            let entry = sessions.get(session_id)?.clone();
            entry.checkouts.fetch_add(1, Ordering::SeqCst);
            entry
        };

        let guard = Arc::clone(&entry.state).lock_owned().await;
        Some(CheckedOutSession {
            guard,
            entry,
            is_new: false,
        })
    }

    /// Refreshes a session's last-activity time. Returns false if unknown.
    pub async fn touch(&self, session_id: &SessionId) -> bool {
        // The checkout's drop does the touching.
        self.checkout_existing(session_id).await.is_some()
    }

    /// Removes sessions idle for longer than `max_idle` and returns how many.
    ///
    /// Sessions that are checked out, or whose lock is held, are skipped.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|session_id, entry| {
            if entry.checkouts.load(Ordering::SeqCst) > 0 {
                return true;
            }
            let Ok(session) = entry.state.try_lock() else {
                return true;
            };
            let idle = session.last_activity().elapsed();
            if idle > max_idle {
                tracing::info!(
                    session_id = %session_id,
                    idle_secs = idle.as_secs(),
                    "Session evicted for inactivity"
                );
                false
            } else {
                true
            }
        });

        before - sessions.len()
    }

    pub async fn contains(&self, session_id: &SessionId) -> bool {
        self.sessions.read().await.contains_key(session_id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
