//! Background worker that mails login notifications

use chrono::{TimeZone, Utc};
use tokio::sync::mpsc;

use super::LoginNotification;
use super::mailer::{Email, Mailer};

pub struct NotificationWorker<M> {
    mailer: M,
    recipient: String,
    system_name: String,
}

impl<M: Mailer> NotificationWorker<M> {
    pub fn new(mailer: M, recipient: impl Into<String>, system_name: impl Into<String>) -> Self {
        Self {
            mailer,
            recipient: recipient.into(),
            system_name: system_name.into(),
        }
    }

    /// Runs until every sender is dropped
    pub async fn run(self, mut rx: mpsc::Receiver<LoginNotification>) {
        tracing::info!(recipient = %self.recipient, "Login notification worker started");

        while let Some(notification) = rx.recv().await {
            let email = self.compose(&notification);
            match self.mailer.send(&email).await {
                Ok(()) => tracing::debug!(
                    worker = %notification.worker_identifier,
                    "Login notification delivered"
                ),
                Err(e) => tracing::warn!(
                    worker = %notification.worker_identifier,
                    error = %e,
                    "Failed to deliver login notification"
                ),
            }
        }

        tracing::info!("Login notification channel closed, worker stopping");
    }

    pub fn compose(&self, notification: &LoginNotification) -> Email {
        let when = Utc
            .timestamp_millis_opt(notification.timestamp)
            .single()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| notification.timestamp.to_string());
        let ip = notification
            .ip
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        Email {
            to: self.recipient.clone(),
            subject: format!("Worker {} signed in", notification.worker_identifier),
            body: format!(
                "Worker: {}\nTime: {}\nIP address: {}\nSystem: {}\n",
                notification.worker_identifier, when, ip, self.system_name
            ),
        }
    }
}
