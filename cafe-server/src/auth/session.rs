//! Server-side worker sessions
//!
//! A successful login issues a random opaque token (uuid v4). The token maps
//! to a [`WorkerSession`] held in a lock-free [`DashMap`]. Sessions live in
//! memory only, so a restart signs every worker out.

use dashmap::DashMap;
use shared::models::{SessionInfo, WorkerInfo};

use super::error::AuthError;

/// Authenticated worker identity
///
/// Handlers that need staff rights take this as an argument; it is only
/// obtainable from a valid bearer token (see the extractor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerSession {
    pub worker_id: i64,
    pub identifier: String,
    /// epoch millis
    pub issued_at: i64,
    /// epoch millis
    pub expires_at: i64,
}

impl WorkerSession {
    pub fn is_expired_at(&self, now_millis: i64) -> bool {
        now_millis >= self.expires_at
    }
}

impl From<&WorkerSession> for SessionInfo {
    fn from(session: &WorkerSession) -> Self {
        Self {
            worker_id: session.worker_id,
            identifier: session.identifier.clone(),
            issued_at: session.issued_at,
            expires_at: session.expires_at,
        }
    }
}

#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, WorkerSession>,
    ttl: chrono::Duration,
}

impl SessionStore {
    pub fn new(ttl: chrono::Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Start a session for `worker`; returns the bearer token and the session
    pub fn issue(&self, worker: &WorkerInfo) -> (String, WorkerSession) {
        let now = shared::util::now_millis();
        let session = WorkerSession {
            worker_id: worker.id,
            identifier: worker.identifier.clone(),
            issued_at: now,
            expires_at: now + self.ttl.num_milliseconds(),
        };
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.sessions.insert(token.clone(), session.clone());
        (token, session)
    }

    /// Resolve a token; expired sessions are evicted on sight
    pub fn validate(&self, token: &str) -> Result<WorkerSession, AuthError> {
        self.validate_at(token, shared::util::now_millis())
    }

    fn validate_at(&self, token: &str, now: i64) -> Result<WorkerSession, AuthError> {
        let session = self
            .sessions
            .get(token)
            .map(|s| s.value().clone())
            .ok_or(AuthError::InvalidSession)?;

        if session.is_expired_at(now) {
            self.sessions.remove(token);
            return Err(AuthError::SessionExpired);
        }
        Ok(session)
    }

    /// Returns false when the token was unknown
    pub fn revoke(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Drop every expired session; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(shared::util::now_millis())
    }

    /// Removals are counted inside `retain`, so logins racing the purge
    /// never skew the result
    fn purge_expired_at(&self, now: i64) -> usize {
        let mut removed = 0;
        self.sessions.retain(|_, s| {
            let expired = s.is_expired_at(now);
            if expired {
                removed += 1;
            }
            !expired
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
