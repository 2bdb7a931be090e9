// src/handlers/leaderboard.rs

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    handlers::respond,
    leaderboard::{
        LeaderboardFilter, LeaderboardParams, PageRequest, assemble_page, global_rank,
    },
    models::{persona::Persona, profile::LeaderboardRow},
    state::AppState,
};

/// Pages through the leaderboard with a keyset cursor.
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    let request = PageRequest::from_params(&params)?;
    let rows = state
        .profiles
        .fetch_leaderboard(&request.filter, &request.window())
        .await?;

    Ok(respond("Leaderboard retrieved", assemble_page(&request, rows)))
}

#[derive(Debug, Deserialize)]
pub struct RankParams {
    pub persona: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RankResponse {
    pub user_id: String,
    /// `None` when the user is outside the requested view.
    pub rank: Option<i64>,
    pub score: i64,
}

/// A single user's global rank: one more than the number of strictly higher scores.
pub async fn get_user_rank(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<RankParams>,
) -> Result<impl IntoResponse, AppError> {
    let persona = params
        .persona
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<Persona>().map_err(AppError::BadRequest))
        .transpose()?;
    let filter = LeaderboardFilter { persona };

    let profile = state
        .profiles
        .get_profile(&user_id)
        .await?
        .ok_or(AppError::NotFound("Profile not found".to_string()))?;

    let rank = if filter.admits(&LeaderboardRow::from(&profile)) {
        let higher = state
            .profiles
            .count_above(&filter, profile.total_impact_score)
            .await?;
        Some(global_rank(higher))
    } else {
        None
    };

    Ok(respond(
        "Rank retrieved",
        RankResponse {
            user_id: profile.user_id,
            rank,
            score: profile.total_impact_score,
        },
    ))
}
