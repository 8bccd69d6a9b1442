//! Alert delivery.
//!
//! Navigation hands each alert's title and body to a [`NotificationSink`].
//! Delivery is best effort: the tracker logs failures and carries on.

mod webhook;

use std::future::Future;

use futures::future::join_all;
use tracing::info;

pub use webhook::{WebhookConfig, WebhookSink};

/// Errors from notification delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The receiver answered with a non-success status
    #[error("notification rejected with status {status}")]
    Rejected { status: u16 },
}

/// Something that can show the traveler a notification.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, title: &str, body: &str)
    -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    async fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        info!(title, body, "notification");
        Ok(())
    }
}

/// Delivers to every inner sink concurrently.
///
/// All sinks are attempted; the first failure is returned.
#[derive(Debug, Clone, Default)]
pub struct FanOut<S> {
    sinks: Vec<S>,
}

impl<S> FanOut<S> {
    pub fn new(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl<S: NotificationSink> NotificationSink for FanOut<S> {
    async fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        let results = join_all(self.sinks.iter().map(|sink| sink.notify(title, body))).await;
        results.into_iter().collect()
    }
}

/// The sinks the server can be configured with.
#[derive(Debug, Clone)]
pub enum Notifier {
    Log(LogSink),
    Webhook(WebhookSink),
}

impl NotificationSink for Notifier {
    async fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        match self {
            Notifier::Log(sink) => sink.notify(title, body).await,
            Notifier::Webhook(sink) => sink.notify(title, body).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts deliveries; fails when `fail` is set.
    #[derive(Debug, Clone, Default)]
    struct Counting {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl NotificationSink for Counting {
        async fn notify(&self, _title: &str, _body: &str) -> Result<(), NotifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(NotifyError::Rejected { status: 503 })
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn log_sink_accepts_everything() {
        assert!(LogSink.notify("Arrived", "2 stops away").await.is_ok());
        let notifier = Notifier::Log(LogSink);
        assert!(notifier.notify("Arrived", "2 stops away").await.is_ok());
    }

    #[tokio::test]
    async fn fan_out_reaches_every_sink() {
        let calls = Arc::new(AtomicUsize::new(0));
        let sink = |fail| Counting {
            calls: Arc::clone(&calls),
            fail,
        };
        let fan_out = FanOut::new(vec![sink(false), sink(false), sink(false)]);
        assert!(fan_out.notify("t", "b").await.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn fan_out_reports_failure_after_trying_all() {
        let calls = Arc::new(AtomicUsize::new(0));
        let sink = |fail| Counting {
            calls: Arc::clone(&calls),
            fail,
        };
        let fan_out = FanOut::new(vec![sink(true), sink(false)]);
        let err = fan_out.notify("t", "b").await.unwrap_err();
        assert!(matches!(err, NotifyError::Rejected { status: 503 }));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn error_display() {
        let err = NotifyError::Rejected { status: 500 };
        assert_eq!(err.to_string(), "notification rejected with status 500");
    }
}
