//! Outbound customer notifications (campaign messages).
//!
//! The salon's messages go through a hosted workflow service: one
//! authenticated POST per recipient. A batch succeeds only if every recipient
//! was accepted; the first failure aborts it with a single error.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::Client;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider rejected the request: {status} - {body}")]
    Rejected { status: u16, body: String },

    #[error("notifications are not configured")]
    NotConfigured,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipient {
    pub phone: String,
    pub name: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends `message` to every recipient. Returns how many were sent.
    async fn send_batch(&self, recipients: &[Recipient], message: &str) -> Result<usize, NotifyError>;
}

/// Client for a workflow-trigger endpoint
/// (`POST {base_url}/v1/workflows/{workflow}/trigger`).
#[derive(Debug, Clone)]
pub struct WorkflowNotifier {
    client: Client,
    base_url: String,
    api_key: String,
    workflow: String,
}

impl WorkflowNotifier {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        workflow: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(Duration::from_secs(15)).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            workflow: workflow.into(),
        })
    }

    fn trigger_url(&self) -> String {
        format!("{}/v1/workflows/{}/trigger", self.base_url, self.workflow)
    }

    async fn send_one(&self, recipient: &Recipient, message: &str) -> Result<(), NotifyError> {
        let body = json!({
            "recipients": [{
                "id": recipient.phone,
                "name": recipient.name,
                "phone_number": recipient.phone,
            }],
            "data": { "message": message },
        });

        let response = self
            .client
            .post(self.trigger_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected { status: status.as_u16(), body });
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for WorkflowNotifier {
    async fn send_batch(&self, recipients: &[Recipient], message: &str) -> Result<usize, NotifyError> {
        tracing::info!(
            recipients = recipients.len(),
            workflow = %self.workflow,
            "Triggering notification workflow"
        );

        try_join_all(recipients.iter().map(|r| self.send_one(r, message))).await?;
        Ok(recipients.len())
    }
}

/// Used when no provider is configured: every batch fails.
#[derive(Debug, Clone, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send_batch(&self, _recipients: &[Recipient], _message: &str) -> Result<usize, NotifyError> {
        Err(NotifyError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn recipients() -> Vec<Recipient> {
        vec![
            Recipient { phone: "9876500001".into(), name: "Asha".into() },
            Recipient { phone: "9876500002".into(), name: "Meera".into() },
        ]
    }

    #[tokio::test]
    async fn posts_once_per_recipient_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/workflows/salon-offer/trigger"))
            .and(header("authorization", "Bearer sk_test"))
            .and(body_partial_json(json!({ "data": { "message": "20% off" } })))
            .respond_with(ResponseTemplate::new(200))
            .expect(2)
            .mount(&server)
            .await;

        let notifier = WorkflowNotifier::new(server.uri(), "sk_test", "salon-offer").expect("client");
        let sent = notifier.send_batch(&recipients(), "20% off").await.expect("batch sent");

        assert_eq!(sent, 2);
    }

    #[tokio::test]
    async fn one_rejected_recipient_fails_the_batch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "recipients": [{ "id": "9876500002" }] })))
            .respond_with(ResponseTemplate::new(422).set_body_string("bad phone"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let notifier = WorkflowNotifier::new(server.uri(), "sk_test", "salon-offer").expect("client");
        let err = notifier.send_batch(&recipients(), "hi").await.unwrap_err();

        match err {
            NotifyError::Rejected { status, body } => {
                assert_eq!(status, 422);
                assert_eq!(body, "bad phone");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_batch_sends_nothing() {
        let notifier = WorkflowNotifier::new("http://127.0.0.1:9", "k", "w").expect("client");
        assert_eq!(notifier.send_batch(&[], "hi").await.expect("empty batch"), 0);
    }

    #[tokio::test]
    async fn disabled_notifier_refuses() {
        let err = DisabledNotifier.send_batch(&recipients(), "hi").await.unwrap_err();
        assert!(matches!(err, NotifyError::NotConfigured));
    }
}
