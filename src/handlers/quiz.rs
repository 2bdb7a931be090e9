// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::IntoResponse,
};

use crate::{
    error::{AppError, ScoringError},
    handlers::{lead::capture_lead, respond},
    models::{
        lead::QuizResultSummary,
        persona::Persona,
        quiz::{QuizLead, QuizResultResponse, QuizSummary, SubmitQuizRequest},
    },
    quizzes,
    scoring::{self, Quiz},
    state::AppState,
};

fn lookup(slug: &str) -> Result<&'static Quiz, AppError> {
    quizzes::find(slug).ok_or_else(|| ScoringError::UnknownQuiz(slug.to_string()).into())
}

/// Lists the quiz catalog.
pub async fn list_quizzes() -> impl IntoResponse {
    let summaries: Vec<QuizSummary> = quizzes::QUIZZES
        .iter()
        .map(|quiz| QuizSummary::from(*quiz))
        .collect();

    respond("Quizzes retrieved", summaries)
}

/// Returns one quiz with its questions. Option weights are never exposed.
pub async fn get_quiz(Path(slug): Path<String>) -> Result<impl IntoResponse, AppError> {
    let quiz = lookup(&slug)?;
    Ok(respond("Quiz retrieved", quiz))
}

/// Scores a submission.
///
/// * Rejects incomplete submissions with the list of missing question ids.
/// * For the persona quiz, attaches the persona details.
/// * If contact details are present, captures a lead with the result attached.
///   An already registered email is reported in `lead` instead of failing.
pub async fn submit_quiz(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    payload: Result<Json<SubmitQuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let quiz = lookup(&slug)?;

    let outcome = scoring::evaluate(quiz, &req.answers)?;

    let persona = outcome
        .top_category
        .as_deref()
        .and_then(|id| id.parse::<Persona>().ok())
        .map(Persona::details);

    let lead = match req.lead {
        Some(contact) => {
            let summary = QuizResultSummary {
                slug: quiz.slug.to_string(),
                score: outcome.total_score,
                percentage: outcome.percentage,
                category: outcome.label().map(str::to_string),
            };
            // A returning visitor keeps their result.
            match capture_lead(&state, contact, quiz.slug, Some(summary)).await {
                Ok(report) => Some(QuizLead {
                    captured: true,
                    reason: None,
                    report: Some(report),
                }),
                Err(AppError::Conflict(reason)) => {
                    tracing::info!("Quiz {} lead not captured: {}", quiz.slug, reason);
                    Some(QuizLead {
                        captured: false,
                        reason: Some(reason),
                        report: None,
                    })
                }
                Err(e) => return Err(e),
            }
        }
        None => None,
    };

    tracing::debug!(
        "Quiz {} scored {}/{} ({}%)",
        quiz.slug,
        outcome.total_score,
        outcome.max_score,
        outcome.percentage
    );

    Ok(respond(
        "Quiz submitted successfully",
        QuizResultResponse {
            outcome,
            persona,
            lead,
        },
    ))
}
