// src/models/profile.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use url::Url;
use validator::Validate;

/// Represents the 'profiles' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Profile {
    /// Identity provider subject.
    pub user_id: String,

    pub display_name: Option<String>,

    /// Lifetime impact points. Never negative.
    pub total_impact_score: i64,

    /// Starts at 1 and never decreases.
    pub level: i64,

    /// Persona id (e.g. "eco_warrior"), set by onboarding.
    pub persona: Option<String>,

    pub avatar_url: Option<String>,

    pub onboarded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Leaderboard columns selected from `profiles`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub user_id: String,
    pub display_name: Option<String>,
    pub total_impact_score: i64,
    pub level: i64,
    pub persona: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<&Profile> for LeaderboardRow {
    fn from(p: &Profile) -> Self {
        Self {
            user_id: p.user_id.clone(),
            display_name: p.display_name.clone(),
            total_impact_score: p.total_impact_score,
            level: p.level,
            persona: p.persona.clone(),
            avatar_url: p.avatar_url.clone(),
        }
    }
}

/// A ranked leaderboard row. The rank is assigned at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub user_id: String,
    pub display_name: Option<String>,
    pub total_impact_score: i64,
    pub level: i64,
    pub persona: Option<String>,
    pub avatar_url: Option<String>,
}

/// Represents the 'point_activities' table. Append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PointActivity {
    pub id: i64,
    pub user_id: String,
    pub points: i64,
    pub activity_type: String,
    pub description: Option<String>,
    pub metadata: sqlx::types::Json<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Points to add to a profile together with the activity that earned them.
#[derive(Debug, Clone)]
pub struct NewPointActivity {
    pub points: i64,
    pub activity_type: String,
    pub description: Option<String>,
    pub metadata: serde_json::Value,
}

/// DTO for creating or updating the caller's profile.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpsertProfileRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Display name length must be between 1 and 50 characters."
    ))]
    pub display_name: Option<String>,

    #[validate(length(max = 500))]
    pub avatar_url: Option<String>,
}

impl UpsertProfileRequest {
    /// Field validation plus the avatar URL scheme check.
    pub fn check(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()?;
        if let Some(url) = &self.avatar_url {
            if let Err(e) = validate_avatar_url(url) {
                let mut errors = validator::ValidationErrors::new();
                errors.add("avatar_url", e);
                return Err(errors);
            }
        }
        Ok(())
    }
}

/// DTO for awarding points to the caller.
#[derive(Debug, Deserialize, Validate)]
pub struct AwardPointsRequest {
    #[validate(range(min = 1, max = 10000, message = "Points must be between 1 and 10000."))]
    pub points: i64,

    #[validate(length(min = 1, max = 50))]
    pub activity_type: String,

    #[validate(length(max = 500))]
    pub description: Option<String>,

    pub metadata: Option<serde_json::Value>,
}

/// DTO for completing onboarding with persona quiz answers.
#[derive(Debug, Deserialize)]
pub struct OnboardingRequest {
    /// Key: question id, Value: option id.
    pub answers: std::collections::HashMap<String, String>,
}

fn validate_avatar_url(url: &str) -> Result<(), validator::ValidationError> {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_url")),
    }
}
