// src/handlers/profile.rs

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::{
    config::ONBOARDING_BONUS_POINTS,
    error::AppError,
    handlers::respond,
    models::{
        persona::Persona,
        profile::{AwardPointsRequest, NewPointActivity, OnboardingRequest, UpsertProfileRequest},
    },
    quizzes::{self, IMPACT_PERSONA},
    scoring,
    state::AppState,
    utils::jwt::Claims,
};

/// Get the caller's profile.
pub async fn get_me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state
        .profiles
        .get_profile(&claims.sub)
        .await?
        .ok_or(AppError::NotFound("Profile not found".to_string()))?;

    Ok(respond("Profile retrieved", profile))
}

/// Create or update the caller's profile.
/// A new profile starts at score 0, level 1. The token name seeds the display name.
pub async fn upsert_me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<UpsertProfileRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(mut req) = payload?;
    req.check()?;

    if req.display_name.is_none() {
        let existing = state.profiles.get_profile(&claims.sub).await?;
        if existing.is_none() {
            req.display_name = claims.name.clone().filter(|n| !n.trim().is_empty());
        }
    }

    let profile = state.profiles.upsert_profile(&claims.sub, &req).await?;
    tracing::info!("Profile {} saved", profile.user_id);

    Ok(respond("Profile saved", profile))
}

/// Complete onboarding with the persona quiz.
///
/// * Evaluates the answers against the persona quiz.
/// * Stores the persona and awards the welcome bonus.
/// * A second attempt is a 409.
pub async fn complete_onboarding(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<OnboardingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let quiz = quizzes::find(IMPACT_PERSONA)
        .ok_or_else(|| AppError::InternalServerError("Persona quiz missing".to_string()))?;

    let outcome = scoring::evaluate(quiz, &req.answers)?;
    let persona = outcome
        .top_category
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("No persona could be determined".to_string()))?
        .parse::<Persona>()
        .map_err(AppError::InternalServerError)?;

    let bonus = NewPointActivity {
        points: ONBOARDING_BONUS_POINTS,
        activity_type: "onboarding_complete".to_string(),
        description: Some("Completed onboarding".to_string()),
        metadata: json!({
            "persona": persona,
            "persona_scores": outcome.category_scores,
        }),
    };

    let profile = state
        .profiles
        .complete_onboarding(&claims.sub, persona, &bonus)
        .await?;
    tracing::info!("Profile {} onboarded as {}", profile.user_id, persona);

    Ok(respond(
        "Onboarding complete",
        json!({
            "profile": profile,
            "persona": persona.details(),
            "bonus_points": ONBOARDING_BONUS_POINTS,
        }),
    ))
}

/// Award points to the caller.
pub async fn award_points(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<AwardPointsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let activity = NewPointActivity {
        points: req.points,
        activity_type: req.activity_type.trim().to_string(),
        description: req.description,
        metadata: req.metadata.unwrap_or_else(|| json!({})),
    };

    let profile = state.profiles.award_points(&claims.sub, &activity).await?;
    tracing::info!(
        "Awarded {} points to {} ({})",
        activity.points,
        profile.user_id,
        activity.activity_type
    );

    Ok(respond("Points awarded", profile))
}
