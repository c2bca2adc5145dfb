//! Staff login, logout and worker management

use std::net::IpAddr;
use std::sync::Arc;

use shared::models::WorkerInfo;
use sqlx::SqlitePool;

use super::error::AuthError;
use super::password::{hash_password, verify_password};
use super::session::{SessionStore, WorkerSession};
use crate::db::repository::RepoError;
use crate::db::repository::worker as worker_repo;
use crate::notify::{LoginNotification, LoginNotifier};
use crate::security_log;

/// Maximum identifier length in characters
pub const MAX_IDENTIFIER_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct AuthService {
    pool: SqlitePool,
    sessions: Arc<SessionStore>,
    notifier: LoginNotifier,
}

impl AuthService {
    pub fn new(pool: SqlitePool, sessions: Arc<SessionStore>, notifier: LoginNotifier) -> Self {
        Self {
            pool,
            sessions,
            notifier,
        }
    }

    /// Verify credentials and open a session
    ///
    /// On success the administrator notification is queued before returning;
    /// delivery happens in the background and cannot fail the login.
    pub async fn authenticate(
        &self,
        identifier: &str,
        password: &str,
        client_ip: Option<IpAddr>,
    ) -> Result<(WorkerSession, String), AuthError> {
        let record = match worker_repo::find_by_identifier(&self.pool, identifier).await? {
            Some(record) => record,
            None => {
                security_log!("WARN", "login_unknown_worker", identifier = identifier.to_string());
                return Err(AuthError::WorkerNotFound(identifier.to_string()));
            }
        };

        if !verify_password(password, &record.password_hash) {
            security_log!(
                "WARN",
                "login_failed",
                identifier = identifier.to_string(),
                ip = format!("{client_ip:?}")
            );
            return Err(AuthError::InvalidCredentials);
        }

        let worker = WorkerInfo::from(record);
        let (token, session) = self.sessions.issue(&worker);

        self.notifier.notify(LoginNotification {
            worker_identifier: worker.identifier.clone(),
            timestamp: session.issued_at,
            ip: client_ip,
        });

        security_log!(
            "INFO",
            "login_success",
            identifier = worker.identifier.clone(),
            ip = format!("{client_ip:?}")
        );
        Ok((session, token))
    }

    /// End the session behind `token`; unknown tokens are an error
    pub fn logout(&self, token: &str) -> Result<(), AuthError> {
        if self.sessions.revoke(token) {
            tracing::info!("Worker session revoked");
            Ok(())
        } else {
            Err(AuthError::InvalidSession)
        }
    }

    /// Current profile of the signed-in worker
    pub async fn me(&self, session: &WorkerSession) -> Result<WorkerInfo, AuthError> {
        worker_repo::find_by_id(&self.pool, session.worker_id)
            .await?
            .ok_or_else(|| AuthError::WorkerNotFound(session.identifier.clone()))
    }

    pub async fn add_worker(&self, identifier: &str, password: &str) -> Result<WorkerInfo, AuthError> {
        add_worker(&self.pool, identifier, password).await
    }
}

/// Identifiers are 1 to 8 characters with no surrounding whitespace
pub fn validate_identifier(identifier: &str) -> Result<(), AuthError> {
    let len = identifier.chars().count();
    if len == 0 || len > MAX_IDENTIFIER_LEN || identifier.trim() != identifier {
        return Err(AuthError::InvalidIdentifier(identifier.to_string()));
    }
    Ok(())
}

/// Register a worker with a freshly salted password hash
pub async fn add_worker(
    pool: &SqlitePool,
    identifier: &str,
    password: &str,
) -> Result<WorkerInfo, AuthError> {
    validate_identifier(identifier)?;
    let hash = hash_password(password).map_err(|e| AuthError::Internal(e.to_string()))?;
    match worker_repo::create(pool, identifier, &hash).await {
        Ok(worker) => {
            tracing::info!(identifier = %worker.identifier, "Worker created");
            Ok(worker)
        }
        Err(RepoError::Duplicate(_)) => Err(AuthError::IdentifierTaken(identifier.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// Replace a worker's password; existing sessions stay valid
pub async fn set_password(pool: &SqlitePool, identifier: &str, password: &str) -> Result<(), AuthError> {
    let hash = hash_password(password).map_err(|e| AuthError::Internal(e.to_string()))?;
    match worker_repo::update_password(pool, identifier, &hash).await {
        Ok(()) => Ok(()),
        Err(RepoError::NotFound(_)) => Err(AuthError::WorkerNotFound(identifier.to_string())),
        Err(e) => Err(e.into()),
    }
}
