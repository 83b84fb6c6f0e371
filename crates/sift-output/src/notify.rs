//! Notification channel abstraction.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while delivering a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Network or transport failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Required setting is absent
    #[error("Configuration error: {0}")]
    Config(String),

    /// The messaging platform rejected the request
    #[error("Platform error (HTTP {status}): {body}")]
    Platform {
        /// HTTP status returned by the platform
        status: u16,
        /// Response body, as returned
        body: String,
    },
}

/// Sends a subject and body to an external channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message.
    ///
    /// # Errors
    /// Returns a [`NotifyError`] when the message could not be delivered.
    async fn notify(&self, subject: &str, content: &str) -> Result<(), NotifyError>;
}
