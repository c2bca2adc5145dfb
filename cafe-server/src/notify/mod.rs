//! Admin login notifications
//!
//! A successful login enqueues a [`LoginNotification`] through the
//! [`LoginNotifier`] handle without waiting. [`NotificationWorker`] drains
//! the channel in the background and mails the administrator. A full or
//! closed channel only produces a log line; it never fails the login.

pub mod mailer;
pub mod worker;

use std::net::IpAddr;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

pub use mailer::{Email, LogMailer, MailError, Mailer, SesMailer};
pub use worker::NotificationWorker;

/// One successful staff login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginNotification {
    pub worker_identifier: String,
    /// epoch millis
    pub timestamp: i64,
    pub ip: Option<IpAddr>,
}

/// Cloneable sending side of the notification channel
#[derive(Debug, Clone)]
pub struct LoginNotifier {
    tx: mpsc::Sender<LoginNotification>,
}

impl LoginNotifier {
    /// Bounded channel; the receiver goes to [`NotificationWorker::run`]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<LoginNotification>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Enqueue without blocking; returns whether the notification was queued
    pub fn notify(&self, notification: LoginNotification) -> bool {
        match self.tx.try_send(notification) {
            Ok(()) => true,
            Err(TrySendError::Full(n)) => {
                tracing::warn!(
                    worker = %n.worker_identifier,
                    "Login notification queue full, dropping notification"
                );
                false
            }
            Err(TrySendError::Closed(n)) => {
                tracing::warn!(
                    worker = %n.worker_identifier,
                    "Login notification worker stopped, dropping notification"
                );
                false
            }
        }
    }
}
