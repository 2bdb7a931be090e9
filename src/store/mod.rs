// src/store/mod.rs

//! Persistence seams. Handlers talk to these traits; `PgStore` backs them
//! with Postgres and `MemoryStore` keeps everything in process.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::{
    error::AppError,
    leaderboard::{LeaderboardFilter, Window},
    models::{
        lead::{Lead, NewEmailLog, NewLead},
        persona::Persona,
        profile::{LeaderboardRow, NewPointActivity, Profile, UpsertProfileRequest},
    },
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::config::POINTS_PER_LEVEL;

/// Level reached with `total` points.
pub fn level_for(total: i64) -> i64 {
    total.max(0) / POINTS_PER_LEVEL + 1
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Creates the profile on first sight, otherwise updates the given fields.
    async fn upsert_profile(
        &self,
        user_id: &str,
        update: &UpsertProfileRequest,
    ) -> Result<Profile, AppError>;

    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, AppError>;

    /// Rows admitted by `filter`, positioned and limited by `window`.
    async fn fetch_leaderboard(
        &self,
        filter: &LeaderboardFilter,
        window: &Window,
    ) -> Result<Vec<LeaderboardRow>, AppError>;

    /// Number of rows admitted by `filter` with a score strictly above `score`.
    async fn count_above(&self, filter: &LeaderboardFilter, score: i64) -> Result<i64, AppError>;

    /// Adds points and records the activity. `NotFound` if the profile is missing.
    async fn award_points(
        &self,
        user_id: &str,
        activity: &NewPointActivity,
    ) -> Result<Profile, AppError>;

    /// Sets the persona and awards the bonus. `Conflict` if already onboarded.
    async fn complete_onboarding(
        &self,
        user_id: &str,
        persona: Persona,
        bonus: &NewPointActivity,
    ) -> Result<Profile, AppError>;
}

#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Case-insensitive lookup.
    async fn find_lead_by_email(&self, email: &str) -> Result<Option<Lead>, AppError>;

    /// `Conflict` if the email is already registered.
    async fn insert_lead(&self, lead: &NewLead) -> Result<Lead, AppError>;

    async fn mark_auto_responder_sent(&self, lead_id: i64) -> Result<(), AppError>;

    async fn log_email(&self, log: &NewEmailLog) -> Result<(), AppError>;
}
