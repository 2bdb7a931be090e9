// src/integrations/resend.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    config::{ResendConfig, WELCOME_EMAIL_SUBJECT},
    integrations::{IntegrationError, Mailer, SentEmail, rejection},
    models::lead::Lead,
    utils::html::escape_text,
};

/// Resend transactional email client.
pub struct ResendMailer {
    client: reqwest::Client,
    config: ResendConfig,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: String,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}

impl ResendMailer {
    pub fn new(client: reqwest::Client, config: ResendConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send_welcome(&self, lead: &Lead) -> Result<SentEmail, IntegrationError> {
        let body = SendEmailRequest {
            from: &self.config.from,
            to: [lead.email.as_str()],
            subject: WELCOME_EMAIL_SUBJECT,
            html: welcome_html(&lead.name),
            text: welcome_text(&lead.name),
            reply_to: self.config.reply_to.as_deref(),
        };

        let response = self
            .client
            .post(format!("{}/emails", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let sent: SendEmailResponse = response.json().await?;
        tracing::info!("Welcome email accepted for lead {}", lead.id);
        Ok(SentEmail { message_id: sent.id })
    }
}

const HIGHLIGHTS: [&str; 4] = [
    "Exclusive networking with fellow changemakers",
    "Growth opportunities and mentorship",
    "Premium events and insider insights",
    "Early access to the Impact platform",
];

pub fn welcome_html(name: &str) -> String {
    let items: String = HIGHLIGHTS
        .iter()
        .map(|h| format!("<li>{}</li>", h))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{subject}</title></head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <h1 style="color: #2f855a;">Welcome to our community!</h1>
  <p>Dear {name},</p>
  <p>Thank you for joining our waitlist. We're thrilled to have you with us.</p>
  <ul>{items}</ul>
  <p>You'll be the first to hear about our launch, early-bird pricing and upcoming opportunities.</p>
  <p>Best regards,<br>The Impact team</p>
</body>
</html>"#,
        subject = WELCOME_EMAIL_SUBJECT,
        name = escape_text(name),
        items = items,
    )
}

pub fn welcome_text(name: &str) -> String {
    let items: String = HIGHLIGHTS.iter().map(|h| format!("- {}\n", h)).collect();
    format!(
        "Dear {name},\n\n\
         Thank you for joining our waitlist. We're thrilled to have you with us.\n\n\
         Here's what you can look forward to:\n\n\
         {items}\n\
         You'll be the first to hear about our launch, early-bird pricing and upcoming opportunities.\n\n\
         Best regards,\n\
         The Impact team\n"
    )
}
