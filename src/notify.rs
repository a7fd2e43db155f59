// src/notify.rs

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("sms gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("sms gateway rejected the message")]
    Rejected,
}

/// Wire shape of a notification request (`POST /api/mock-sms` and any
/// gateway configured through `SMS_GATEWAY_URL`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsPayload {
    pub phone: String,
    #[serde(rename = "smsText")]
    pub sms_text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SmsAck {
    pub success: bool,
}

/// Where invite texts go. One call per recipient.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, phone: &str, sms_text: &str) -> Result<(), NotifyError>;
}

/// Print the text the patient would have received.
pub fn log_mock_sms(phone: &str, sms_text: &str) {
    tracing::info!("\n--- MOCK SMS ---\nTo: {phone}\nMessage: {sms_text}\n----------------\n");
}

/// Default sink: no network, the message only goes to the log.
#[derive(Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, phone: &str, sms_text: &str) -> Result<(), NotifyError> {
        log_mock_sms(phone, sms_text);
        Ok(())
    }
}

/// Posts `{ phone, smsText }` to an HTTP gateway and expects `{ success: true }`
/// (or at least a 2xx with no body).
#[derive(Clone)]
pub struct HttpNotifier {
    client: Client,
    url: String,
}

impl HttpNotifier {
    pub fn new(url: String) -> Self {
        Self { client: Client::new(), url }
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn send(&self, phone: &str, sms_text: &str) -> Result<(), NotifyError> {
        let body = SmsPayload {
            phone: phone.to_string(),
            sms_text: sms_text.to_string(),
        };

        let bytes = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        if bytes.is_empty() {
            return Ok(());
        }
        match serde_json::from_slice::<SmsAck>(&bytes) {
            Ok(SmsAck { success: false }) => Err(NotifyError::Rejected),
            _ => Ok(()),
        }
    }
}
