// src/models/lead.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Represents the 'leads' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Lead {
    pub id: i64,
    pub name: String,

    /// Stored lower-cased; unique.
    pub email: String,

    pub company: Option<String>,
    pub phone: Option<String>,

    /// Where the signup came from (e.g. "website", "money-leak").
    pub source: String,

    pub quiz_slug: Option<String>,
    pub quiz_score: Option<i64>,
    pub quiz_percentage: Option<i64>,
    pub quiz_category: Option<String>,

    pub auto_responder_sent: bool,
    pub auto_responder_sent_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A normalized lead ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub source: String,
    pub quiz: Option<QuizResultSummary>,
}

/// Quiz result attached to a lead captured from a quiz submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResultSummary {
    pub slug: String,
    pub score: i64,
    pub percentage: i64,
    pub category: Option<String>,
}

/// DTO for lead capture (waitlist signup or quiz lead).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateLeadRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name and email are required"))]
    pub name: String,

    #[serde(default)]
    #[validate(
        length(min = 1, max = 254, message = "Name and email are required"),
        custom(function = validate_email)
    )]
    pub email: String,

    #[validate(length(max = 200))]
    pub company: Option<String>,

    #[validate(length(max = 40))]
    pub phone: Option<String>,

    #[validate(length(max = 50))]
    pub referral_source: Option<String>,
}

impl CreateLeadRequest {
    /// Trims every field and lower-cases the email. Blank optional fields become `None`.
    pub fn normalize(&self, default_source: &str) -> NewLead {
        fn clean(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        NewLead {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            company: clean(&self.company),
            phone: clean(&self.phone),
            source: clean(&self.referral_source).unwrap_or_else(|| default_source.to_string()),
            quiz: None,
        }
    }

    /// Trims name and email before validating, so whitespace-only input is rejected.
    pub fn trimmed(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        self
    }
}

fn validate_email(email: &str) -> Result<(), validator::ValidationError> {
    if email.is_empty() || EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("invalid_email");
        err.message = Some("Invalid email format".into());
        Err(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    Sent,
    Failed,
}

impl EmailStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EmailStatus::Sent => "sent",
            EmailStatus::Failed => "failed",
        }
    }
}

/// A row for the 'email_logs' table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmailLog {
    pub lead_id: i64,
    pub email_address: String,
    pub subject: String,
    pub status: EmailStatus,
    pub provider_message_id: Option<String>,
    pub error_message: Option<String>,
}

/// Payload returned after a lead is captured.
#[derive(Debug, Serialize, Deserialize)]
pub struct LeadCaptureReport {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub saved_to_database: bool,
    pub saved_to_notion: bool,
    pub email_sent: bool,
    pub email_details: String,
}
