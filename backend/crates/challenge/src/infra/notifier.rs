//! Notifier Implementations
//!
//! `LogNotifier` writes the message to the log for local development;
//! `HttpNotifier` hands it to a transactional email HTTP API.

use crate::domain::ports::{Notification, Notifier};
use crate::error::{ChallengeError, ChallengeResult};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Local dev sender that logs the message instead of sending real email
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    async fn notify(&self, notification: &Notification) -> ChallengeResult<()> {
        // The body is the delivery itself here
        tracing::info!(
            destination = %notification.destination,
            subject = %notification.subject,
            body = %notification.body,
            "Email send stub"
        );
        Ok(())
    }
}

/// Email HTTP API settings
#[derive(Clone)]
pub struct HttpNotifierConfig {
    /// Endpoint accepting `POST` of a JSON message
    pub endpoint: String,
    /// Bearer key
    pub api_key: String,
    /// Verified sender address
    pub sender: String,
    pub timeout: Duration,
}

impl fmt::Debug for HttpNotifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpNotifierConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("sender", &self.sender)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HttpNotifierConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            sender: sender.into(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Serialize)]
struct OutgoingEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

/// Sends one request per notification; no retry
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    config: HttpNotifierConfig,
}

impl HttpNotifier {
    pub fn new(config: HttpNotifierConfig) -> ChallengeResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChallengeError::Internal(format!("HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }
}

impl Notifier for HttpNotifier {
    async fn notify(&self, notification: &Notification) -> ChallengeResult<()> {
        let payload = OutgoingEmail {
            from: &self.config.sender,
            to: [&notification.destination],
            subject: &notification.subject,
            text: &notification.body,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChallengeError::Delivery(format!("email API unreachable: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChallengeError::Delivery(format!(
                "email API returned {}",
                status
            )));
        }

        tracing::info!(destination = %notification.destination, "Email delivered");
        Ok(())
    }
}

/// Notifier chosen at start-up
#[derive(Debug, Clone)]
pub enum ConfiguredNotifier {
    Log(LogNotifier),
    Http(HttpNotifier),
}

impl Notifier for ConfiguredNotifier {
    async fn notify(&self, notification: &Notification) -> ChallengeResult<()> {
        match self {
            ConfiguredNotifier::Log(inner) => inner.notify(notification).await,
            ConfiguredNotifier::Http(inner) => inner.notify(notification).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    #[derive(Clone, Default)]
    struct Captured {
        requests: Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>>,
    }

    async fn capture(
        State(captured): State<Captured>,
        headers: HeaderMap,
        Json(body): Json<serde_json::Value>,
    ) -> StatusCode {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        captured.requests.lock().unwrap().push((auth, body));
        StatusCode::ACCEPTED
    }

    async fn reject() -> StatusCode {
        StatusCode::BAD_GATEWAY
    }

    async fn spawn_api(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/send", addr)
    }

    fn notification() -> Notification {
        Notification {
            destination: "user@example.com".to_string(),
            subject: "Your OTP Code".to_string(),
            body: "Your verification code is: 482913".to_string(),
        }
    }

    #[tokio::test]
    async fn test_http_notifier_posts_one_message() {
        let captured = Captured::default();
        let endpoint = spawn_api(
            Router::new()
                .route("/send", post(capture))
                .with_state(captured.clone()),
        )
        .await;

        let notifier =
            HttpNotifier::new(HttpNotifierConfig::new(endpoint, "key-1", "accounts@example.com"))
                .unwrap();
        notifier.notify(&notification()).await.unwrap();

        let requests = captured.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (auth, body) = &requests[0];
        assert_eq!(auth.as_deref(), Some("Bearer key-1"));
        assert_eq!(body["from"], "accounts@example.com");
        assert_eq!(body["to"][0], "user@example.com");
        assert_eq!(body["subject"], "Your OTP Code");
        assert_eq!(body["text"], "Your verification code is: 482913");
    }

    #[tokio::test]
    async fn test_http_notifier_rejected_is_delivery_error() {
        let endpoint = spawn_api(Router::new().route("/send", post(reject))).await;
        let notifier =
            HttpNotifier::new(HttpNotifierConfig::new(endpoint, "key", "accounts@example.com"))
                .unwrap();

        let err = notifier.notify(&notification()).await.unwrap_err();
        assert!(matches!(err, ChallengeError::Delivery(_)));
    }

    #[tokio::test]
    async fn test_http_notifier_unreachable_is_delivery_error() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let notifier = HttpNotifier::new(HttpNotifierConfig::new(
            format!("http://{}/send", addr),
            "key",
            "accounts@example.com",
        ))
        .unwrap();

        let err = notifier.notify(&notification()).await.unwrap_err();
        assert!(matches!(err, ChallengeError::Delivery(_)));
    }

    #[tokio::test]
    async fn test_log_notifier_always_succeeds() {
        let notifier = ConfiguredNotifier::Log(LogNotifier);
        assert!(notifier.notify(&notification()).await.is_ok());
    }

    #[test]
    fn test_notification_debug_hides_body() {
        assert!(!format!("{:?}", notification()).contains("482913"));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = HttpNotifierConfig::new("http://mail.test/send", "sk-live-31337", "accounts@example.com");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("sk-live-31337"));
        assert!(printed.contains("mail.test"));

        let notifier = HttpNotifier::new(config).unwrap();
        assert!(!format!("{:?}", notifier).contains("sk-live-31337"));
        let configured = ConfiguredNotifier::Http(notifier);
        assert!(!format!("{:?}", configured).contains("sk-live-31337"));
    }
}
