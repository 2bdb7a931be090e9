// src/models/quiz.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    models::{
        lead::{CreateLeadRequest, LeadCaptureReport},
        persona::PersonaDetails,
    },
    scoring::{Quiz, QuizOutcome},
};

/// Catalog listing entry.
#[derive(Debug, Serialize)]
pub struct QuizSummary {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub question_count: usize,
}

impl From<&Quiz> for QuizSummary {
    fn from(quiz: &Quiz) -> Self {
        Self {
            slug: quiz.slug,
            title: quiz.title,
            description: quiz.description,
            question_count: quiz.questions.len(),
        }
    }
}

/// DTO for submitting a quiz.
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    /// Key: question id, Value: selected option id.
    pub answers: HashMap<String, String>,

    /// Contact details to capture alongside the result.
    pub lead: Option<CreateLeadRequest>,
}

/// Scored quiz returned to the client.
#[derive(Debug, Serialize)]
pub struct QuizResultResponse {
    #[serde(flatten)]
    pub outcome: QuizOutcome,

    /// Present for the persona routing quiz.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona: Option<&'static PersonaDetails>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead: Option<QuizLead>,
}

/// What happened to the contact details sent with a submission.
/// A failed capture never discards the scored result.
#[derive(Debug, Serialize)]
pub struct QuizLead {
    pub captured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(flatten)]
    pub report: Option<LeadCaptureReport>,
}
