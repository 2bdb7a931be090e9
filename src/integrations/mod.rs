// src/integrations/mod.rs

//! Outbound side effects of lead capture. Both are optional and non-critical:
//! a failure here is logged and reported, never propagated as a request error.

pub mod notion;
pub mod resend;

use async_trait::async_trait;

use crate::models::lead::Lead;

pub use notion::NotionMirror;
pub use resend::ResendMailer;

#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// Receipt for an accepted email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub message_id: Option<String>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends the welcome auto-responder to a freshly captured lead.
    async fn send_welcome(&self, lead: &Lead) -> Result<SentEmail, IntegrationError>;
}

#[async_trait]
pub trait LeadMirror: Send + Sync {
    /// Copies the lead into the external CRM. Returns the remote record id.
    async fn mirror_lead(&self, lead: &Lead) -> Result<String, IntegrationError>;
}

/// Reads `message` from a provider error body, falling back to the raw text.
pub(crate) async fn rejection(response: reqwest::Response) -> IntegrationError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or(body);
    IntegrationError::Rejected { status, message }
}
