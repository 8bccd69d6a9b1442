//! HTTP webhook notifications.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use super::{NotificationSink, NotifyError};

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the webhook sink.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// URL that receives `POST {"title", "body"}`
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl WebhookConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Serialize)]
struct Payload<'a> {
    title: &'a str,
    body: &'a str,
}

/// Posts each notification as JSON to a fixed URL.
#[derive(Debug, Clone)]
pub struct WebhookSink {
    http: reqwest::Client,
    url: String,
}

impl WebhookSink {
    pub fn new(config: WebhookConfig) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl NotificationSink for WebhookSink {
    async fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        let response = self
            .http
            .post(&self.url)
            .json(&Payload { title, body })
            .send()
            .await?;

        let status = response.status();
        debug!(url = %self.url, status = status.as_u16(), "webhook delivered");
        if !status.is_success() {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;
    use std::sync::{Arc, Mutex};

    type Received = Arc<Mutex<Vec<serde_json::Value>>>;

    /// Start a receiver on an ephemeral port answering with `status`.
    async fn receiver(status: StatusCode) -> (String, Received) {
        let received: Received = Arc::default();
        let store = Arc::clone(&received);
        let app = Router::new().route(
            "/hook",
            post(move |axum::Json(value): axum::Json<serde_json::Value>| {
                let store = Arc::clone(&store);
                async move {
                    store.lock().unwrap().push(value);
                    status
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/hook"), received)
    }

    #[test]
    fn config_builder() {
        let config = WebhookConfig::new("http://example.test/hook").with_timeout(3);
        assert_eq!(config.url, "http://example.test/hook");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(WebhookConfig::new("x").timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[tokio::test]
    async fn posts_title_and_body() {
        let (url, received) = receiver(StatusCode::OK).await;
        let sink = WebhookSink::new(WebhookConfig::new(url)).unwrap();

        sink.notify("Arrived at Rosslyn Station", "4 stops away from Metro Center")
            .await
            .unwrap();

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0]["title"], "Arrived at Rosslyn Station");
        assert_eq!(received[0]["body"], "4 stops away from Metro Center");
    }

    #[tokio::test]
    async fn non_success_status_is_rejected() {
        let (url, _) = receiver(StatusCode::SERVICE_UNAVAILABLE).await;
        let sink = WebhookSink::new(WebhookConfig::new(url)).unwrap();

        let err = sink.notify("t", "b").await.unwrap_err();
        assert!(matches!(err, NotifyError::Rejected { status: 503 }));
    }
}
