// src/handlers/lead.rs

use axum::{Json, extract::State, extract::rejection::JsonRejection, response::IntoResponse};
use validator::Validate;

use crate::{
    config::WELCOME_EMAIL_SUBJECT,
    error::AppError,
    handlers::respond,
    models::lead::{
        CreateLeadRequest, EmailStatus, LeadCaptureReport, NewEmailLog, QuizResultSummary,
    },
    state::AppState,
};

/// Source recorded for signups that name none.
pub const WAITLIST_SOURCE: &str = "website";

/// Joins the waitlist.
pub async fn join_waitlist(
    State(state): State<AppState>,
    payload: Result<Json<CreateLeadRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let report = capture_lead(&state, req, WAITLIST_SOURCE, None).await?;

    Ok(respond("Successfully joined the waitlist!", report))
}

/// Validates and stores a lead, then runs the non-critical side effects.
///
/// Only validation, the duplicate check and the insert can fail the request.
/// The Notion mirror, the welcome email and the email log are best effort and
/// reported through the flags of the returned report.
pub async fn capture_lead(
    state: &AppState,
    req: CreateLeadRequest,
    default_source: &str,
    quiz: Option<QuizResultSummary>,
) -> Result<LeadCaptureReport, AppError> {
    let req = req.trimmed();
    req.validate()?;

    let mut new_lead = req.normalize(default_source);
    new_lead.quiz = quiz;

    if state.leads.find_lead_by_email(&new_lead.email).await?.is_some() {
        return Err(AppError::Conflict(
            "This email is already registered".to_string(),
        ));
    }

    let lead = state.leads.insert_lead(&new_lead).await?;
    tracing::info!("Lead {} captured from {}", lead.id, lead.source);

    let saved_to_notion = match &state.mirror {
        Some(mirror) => match mirror.mirror_lead(&lead).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Failed to mirror lead {} to Notion: {}", lead.id, e);
                false
            }
        },
        None => false,
    };

    let (email_sent, email_details) = match &state.mailer {
        Some(mailer) => {
            let (log, details) = match mailer.send_welcome(&lead).await {
                Ok(sent) => {
                    if let Err(e) = state.leads.mark_auto_responder_sent(lead.id).await {
                        tracing::warn!("Failed to flag auto-responder for lead {}: {}", lead.id, e);
                    }
                    (
                        NewEmailLog {
                            lead_id: lead.id,
                            email_address: lead.email.clone(),
                            subject: WELCOME_EMAIL_SUBJECT.to_string(),
                            status: EmailStatus::Sent,
                            provider_message_id: sent.message_id,
                            error_message: None,
                        },
                        "Welcome email sent successfully".to_string(),
                    )
                }
                Err(e) => {
                    tracing::warn!("Failed to send welcome email to lead {}: {}", lead.id, e);
                    (
                        NewEmailLog {
                            lead_id: lead.id,
                            email_address: lead.email.clone(),
                            subject: WELCOME_EMAIL_SUBJECT.to_string(),
                            status: EmailStatus::Failed,
                            provider_message_id: None,
                            error_message: Some(e.to_string()),
                        },
                        format!("Email failed: {}", e),
                    )
                }
            };
            let sent = log.status == EmailStatus::Sent;
            if let Err(e) = state.leads.log_email(&log).await {
                tracing::warn!("Failed to write email log for lead {}: {}", lead.id, e);
            }
            (sent, details)
        }
        None => (false, "Email service not configured".to_string()),
    };

    Ok(LeadCaptureReport {
        id: lead.id,
        name: lead.name,
        email: lead.email,
        company: lead.company,
        timestamp: lead.created_at,
        saved_to_database: true,
        saved_to_notion,
        email_sent,
        email_details,
    })
}
