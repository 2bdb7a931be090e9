// src/store/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::AppError,
    leaderboard::{LeaderboardFilter, Window, select_window},
    models::{
        lead::{Lead, NewEmailLog, NewLead},
        persona::Persona,
        profile::{
            LeaderboardRow, NewPointActivity, PointActivity, Profile, UpsertProfileRequest,
        },
    },
    store::{LeadStore, ProfileStore, level_for},
};

#[derive(Default)]
struct Profiles {
    by_user: HashMap<String, Profile>,
    activities: Vec<PointActivity>,
}

#[derive(Default)]
struct Leads {
    rows: Vec<Lead>,
    email_logs: Vec<NewEmailLog>,
}

/// Process-local store used when no database is configured, and in tests.
#[derive(Default)]
pub struct MemoryStore {
    profiles: RwLock<Profiles>,
    leads: RwLock<Leads>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lead_count(&self) -> usize {
        self.leads.read().await.rows.len()
    }

    pub async fn email_logs(&self) -> Vec<NewEmailLog> {
        self.leads.read().await.email_logs.clone()
    }

    pub async fn activities_for(&self, user_id: &str) -> Vec<PointActivity> {
        self.profiles
            .read()
            .await
            .activities
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect()
    }
}

impl Profiles {
    fn credit(&mut self, user_id: &str, activity: &NewPointActivity) -> Result<Profile, AppError> {
        let profile = self
            .by_user
            .get_mut(user_id)
            .ok_or(AppError::NotFound("Profile not found".to_string()))?;

        profile.total_impact_score += activity.points;
        profile.level = profile.level.max(level_for(profile.total_impact_score));
        profile.updated_at = Utc::now();
        let updated = profile.clone();

        let id = self.activities.len() as i64 + 1;
        self.activities.push(PointActivity {
            id,
            user_id: user_id.to_string(),
            points: activity.points,
            activity_type: activity.activity_type.clone(),
            description: activity.description.clone(),
            metadata: sqlx::types::Json(activity.metadata.clone()),
            created_at: updated.updated_at,
        });

        Ok(updated)
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn upsert_profile(
        &self,
        user_id: &str,
        update: &UpsertProfileRequest,
    ) -> Result<Profile, AppError> {
        let mut profiles = self.profiles.write().await;
        let now = Utc::now();
        let profile = profiles
            .by_user
            .entry(user_id.to_string())
            .or_insert_with(|| Profile {
                user_id: user_id.to_string(),
                display_name: None,
                total_impact_score: 0,
                level: 1,
                persona: None,
                avatar_url: None,
                onboarded_at: None,
                created_at: now,
                updated_at: now,
            });

        if let Some(name) = &update.display_name {
            profile.display_name = Some(name.trim().to_string());
        }
        if let Some(url) = &update.avatar_url {
            profile.avatar_url = Some(url.clone());
        }
        profile.updated_at = now;

        Ok(profile.clone())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, AppError> {
        Ok(self.profiles.read().await.by_user.get(user_id).cloned())
    }

    async fn fetch_leaderboard(
        &self,
        filter: &LeaderboardFilter,
        window: &Window,
    ) -> Result<Vec<LeaderboardRow>, AppError> {
        let profiles = self.profiles.read().await;
        let rows = profiles.by_user.values().map(LeaderboardRow::from);
        Ok(select_window(rows, filter, window))
    }

    async fn count_above(&self, filter: &LeaderboardFilter, score: i64) -> Result<i64, AppError> {
        let profiles = self.profiles.read().await;
        let count = profiles
            .by_user
            .values()
            .map(LeaderboardRow::from)
            .filter(|row| filter.admits(row) && row.total_impact_score > score)
            .count();
        Ok(count as i64)
    }

    async fn award_points(
        &self,
        user_id: &str,
        activity: &NewPointActivity,
    ) -> Result<Profile, AppError> {
        self.profiles.write().await.credit(user_id, activity)
    }

    async fn complete_onboarding(
        &self,
        user_id: &str,
        persona: Persona,
        bonus: &NewPointActivity,
    ) -> Result<Profile, AppError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .by_user
            .get_mut(user_id)
            .ok_or(AppError::NotFound("Profile not found".to_string()))?;

        if profile.onboarded_at.is_some() {
            return Err(AppError::Conflict(
                "Onboarding already completed".to_string(),
            ));
        }
        profile.persona = Some(persona.as_str().to_string());
        profile.onboarded_at = Some(Utc::now());

        profiles.credit(user_id, bonus)
    }
}

#[async_trait]
impl LeadStore for MemoryStore {
    async fn find_lead_by_email(&self, email: &str) -> Result<Option<Lead>, AppError> {
        let needle = email.trim().to_lowercase();
        let leads = self.leads.read().await;
        Ok(leads
            .rows
            .iter()
            .find(|l| l.email.to_lowercase() == needle)
            .cloned())
    }

    async fn insert_lead(&self, lead: &NewLead) -> Result<Lead, AppError> {
        let mut leads = self.leads.write().await;
        let email = lead.email.to_lowercase();
        if leads.rows.iter().any(|l| l.email.to_lowercase() == email) {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let quiz = lead.quiz.as_ref();
        let row = Lead {
            id: leads.rows.len() as i64 + 1,
            name: lead.name.clone(),
            email,
            company: lead.company.clone(),
            phone: lead.phone.clone(),
            source: lead.source.clone(),
            quiz_slug: quiz.map(|q| q.slug.clone()),
            quiz_score: quiz.map(|q| q.score),
            quiz_percentage: quiz.map(|q| q.percentage),
            quiz_category: quiz.and_then(|q| q.category.clone()),
            auto_responder_sent: false,
            auto_responder_sent_at: None,
            created_at: Utc::now(),
        };
        leads.rows.push(row.clone());
        Ok(row)
    }

    async fn mark_auto_responder_sent(&self, lead_id: i64) -> Result<(), AppError> {
        let mut leads = self.leads.write().await;
        if let Some(lead) = leads.rows.iter_mut().find(|l| l.id == lead_id) {
            lead.auto_responder_sent = true;
            lead.auto_responder_sent_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn log_email(&self, log: &NewEmailLog) -> Result<(), AppError> {
        self.leads.write().await.email_logs.push(log.clone());
        Ok(())
    }
}
