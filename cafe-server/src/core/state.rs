//! Shared server state

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::auth::{AuthService, SessionStore};
use crate::core::{Config, Result};
use crate::db;
use crate::notify::{LogMailer, LoginNotifier, Mailer, NotificationWorker, SesMailer};
use crate::orders::OrderService;

/// Name reported in login notification emails
pub const SYSTEM_NAME: &str = "Cafe order service";

/// How often expired sessions are swept
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(300);

/// State handed to every handler; cheap to clone
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub sessions: Arc<SessionStore>,
    pub notifier: LoginNotifier,
}

impl ServerState {
    /// Open the database and start the notification worker
    ///
    /// Login emails go through SES when `ADMIN_EMAIL` is set, otherwise they
    /// are only logged.
    pub async fn initialize(config: &Config) -> Result<Self> {
        let pool = db::connect(&config.database_url).await?;

        let state = match config.admin_email.as_deref() {
            Some(_) => {
                let mailer =
                    SesMailer::from_env(config.ses_from_email.clone(), config.ses_region.as_deref())
                        .await;
                Self::with_mailer(config.clone(), pool, mailer)
            }
            None => {
                if config.is_production() {
                    tracing::warn!("ADMIN_EMAIL not set, login notifications will only be logged");
                } else {
                    tracing::info!("ADMIN_EMAIL not set, login notifications will only be logged");
                }
                Self::with_mailer(config.clone(), pool, LogMailer)
            }
        };
        Ok(state)
    }

    /// Build state around an existing pool and mailer; must run inside a tokio runtime
    pub fn with_mailer<M: Mailer + 'static>(config: Config, pool: SqlitePool, mailer: M) -> Self {
        let (notifier, rx) = LoginNotifier::channel(config.notify_queue_capacity);
        let recipient = config
            .admin_email
            .clone()
            .unwrap_or_else(|| "admin@localhost".to_string());
        tokio::spawn(NotificationWorker::new(mailer, recipient, SYSTEM_NAME).run(rx));

        Self {
            sessions: Arc::new(SessionStore::new(config.session_ttl())),
            config,
            pool,
            notifier,
        }
    }

    pub fn orders(&self) -> OrderService {
        OrderService::new(self.pool.clone())
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.pool.clone(), self.sessions.clone(), self.notifier.clone())
    }

    /// Periodic session purge
    pub fn start_background_tasks(&self) {
        let sessions = self.sessions.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
            loop {
                interval.tick().await;
                let removed = sessions.purge_expired();
                if removed > 0 {
                    tracing::debug!(removed, "Purged expired worker sessions");
                }
            }
        });
    }
}
