// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    error::AppError,
    leaderboard::{Direction, LeaderboardFilter, Window},
    models::{
        lead::{Lead, NewEmailLog, NewLead},
        persona::Persona,
        profile::{LeaderboardRow, NewPointActivity, Profile, UpsertProfileRequest},
    },
    store::{LeadStore, ProfileStore},
};

use crate::config::POINTS_PER_LEVEL;

const PROFILE_COLUMNS: &str = "user_id, display_name, total_impact_score, level, persona, \
     avatar_url, onboarded_at, created_at, updated_at";

const LEAD_COLUMNS: &str = "id, name, email, company, phone, source, quiz_slug, quiz_score, \
     quiz_percentage, quiz_category, auto_responder_sent, auto_responder_sent_at, created_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Appends the filter conditions shared by leaderboard reads and rank counts.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &LeaderboardFilter) {
    builder.push(" WHERE total_impact_score > 0");
    if let Some(persona) = filter.persona {
        builder.push(" AND persona = ").push_bind(persona.as_str());
    }
}

/// Keyset query on (score DESC, user_id ASC). Prev pages scan the other way.
fn leaderboard_query(
    filter: &LeaderboardFilter,
    window: &Window,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new(
        "SELECT user_id, display_name, total_impact_score, level, persona, avatar_url \
         FROM profiles",
    );
    push_filter(&mut builder, filter);

    if let Some(cursor) = &window.cursor {
        let (score_op, id_op) = match window.direction {
            Direction::First => ("", ""),
            Direction::Next => ("<", ">"),
            Direction::Prev => (">", "<"),
        };
        if !score_op.is_empty() {
            builder.push(" AND (total_impact_score ");
            builder.push(score_op).push(" ").push_bind(cursor.score);
            if let Some(user_id) = &cursor.user_id {
                builder
                    .push(" OR (total_impact_score = ")
                    .push_bind(cursor.score)
                    .push(" AND user_id ")
                    .push(id_op)
                    .push(" ")
                    .push_bind(user_id.clone())
                    .push(")");
            }
            builder.push(")");
        }
    }

    match window.direction {
        Direction::Prev => builder.push(" ORDER BY total_impact_score ASC, user_id DESC"),
        _ => builder.push(" ORDER BY total_impact_score DESC, user_id ASC"),
    };
    builder.push(" LIMIT ").push_bind(window.limit);

    builder
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn upsert_profile(
        &self,
        user_id: &str,
        update: &UpsertProfileRequest,
    ) -> Result<Profile, AppError> {
        let sql = format!(
            r#"
            INSERT INTO profiles (user_id, display_name, avatar_url)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE SET
                display_name = COALESCE(EXCLUDED.display_name, profiles.display_name),
                avatar_url = COALESCE(EXCLUDED.avatar_url, profiles.avatar_url),
                updated_at = NOW()
            RETURNING {PROFILE_COLUMNS}
            "#
        );
        let profile = sqlx::query_as::<_, Profile>(&sql)
            .bind(user_id)
            .bind(update.display_name.as_deref().map(str::trim))
            .bind(update.avatar_url.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to upsert profile: {:?}", e);
                AppError::from(e)
            })?;

        Ok(profile)
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, AppError> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1");
        let profile = sqlx::query_as::<_, Profile>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    async fn fetch_leaderboard(
        &self,
        filter: &LeaderboardFilter,
        window: &Window,
    ) -> Result<Vec<LeaderboardRow>, AppError> {
        let mut builder = leaderboard_query(filter, window);
        let rows = builder
            .build_query_as::<LeaderboardRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch leaderboard: {:?}", e);
                AppError::from(e)
            })?;

        Ok(rows)
    }

    async fn count_above(&self, filter: &LeaderboardFilter, score: i64) -> Result<i64, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM profiles");
        push_filter(&mut builder, filter);
        builder.push(" AND total_impact_score > ").push_bind(score);

        let (count,): (i64,) = builder.build_query_as().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn award_points(
        &self,
        user_id: &str,
        activity: &NewPointActivity,
    ) -> Result<Profile, AppError> {
        let mut tx = self.pool.begin().await?;

        let profile = credit(&mut tx, user_id, activity.points).await?;
        record_activity(&mut tx, user_id, activity).await?;

        tx.commit().await?;
        Ok(profile)
    }

    async fn complete_onboarding(
        &self,
        user_id: &str,
        persona: Persona,
        bonus: &NewPointActivity,
    ) -> Result<Profile, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE profiles
            SET persona = $2, onboarded_at = NOW(), updated_at = NOW()
            WHERE user_id = $1 AND onboarded_at IS NULL
            "#,
        )
        .bind(user_id)
        .bind(persona.as_str())
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            let exists = sqlx::query_scalar::<_, String>("SELECT user_id FROM profiles WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
            return Err(match exists {
                Some(_) => AppError::Conflict("Onboarding already completed".to_string()),
                None => AppError::NotFound("Profile not found".to_string()),
            });
        }

        let profile = credit(&mut tx, user_id, bonus.points).await?;
        record_activity(&mut tx, user_id, bonus).await?;

        tx.commit().await?;
        Ok(profile)
    }
}

/// Atomically adds points; the level only ever moves up.
async fn credit(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    user_id: &str,
    points: i64,
) -> Result<Profile, AppError> {
    let sql = format!(
        r#"
        UPDATE profiles
        SET total_impact_score = total_impact_score + $2,
            level = GREATEST(level, (total_impact_score + $2) / $3 + 1),
            updated_at = NOW()
        WHERE user_id = $1
        RETURNING {PROFILE_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Profile>(&sql)
        .bind(user_id)
        .bind(points)
        .bind(POINTS_PER_LEVEL)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(AppError::NotFound("Profile not found".to_string()))
}

async fn record_activity(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    user_id: &str,
    activity: &NewPointActivity,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO point_activities (user_id, points, activity_type, description, metadata)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(user_id)
    .bind(activity.points)
    .bind(&activity.activity_type)
    .bind(activity.description.as_deref())
    .bind(sqlx::types::Json(&activity.metadata))
    .execute(&mut **tx)
    .await?;
    Ok(())
}

#[async_trait]
impl LeadStore for PgStore {
    async fn find_lead_by_email(&self, email: &str) -> Result<Option<Lead>, AppError> {
        let sql = format!("SELECT {LEAD_COLUMNS} FROM leads WHERE LOWER(email) = LOWER($1)");
        let lead = sqlx::query_as::<_, Lead>(&sql)
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Error checking existing email: {:?}", e);
                AppError::from(e)
            })?;

        Ok(lead)
    }

    async fn insert_lead(&self, lead: &NewLead) -> Result<Lead, AppError> {
        let sql = format!(
            r#"
            INSERT INTO leads (name, email, company, phone, source,
                               quiz_slug, quiz_score, quiz_percentage, quiz_category)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {LEAD_COLUMNS}
            "#
        );
        let quiz = lead.quiz.as_ref();
        sqlx::query_as::<_, Lead>(&sql)
            .bind(&lead.name)
            .bind(&lead.email)
            .bind(lead.company.as_deref())
            .bind(lead.phone.as_deref())
            .bind(&lead.source)
            .bind(quiz.map(|q| q.slug.as_str()))
            .bind(quiz.map(|q| q.score))
            .bind(quiz.map(|q| q.percentage))
            .bind(quiz.and_then(|q| q.category.as_deref()))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match AppError::from(e) {
                AppError::Conflict(_) => {
                    AppError::Conflict("Email already registered".to_string())
                }
                other => {
                    tracing::error!("Error inserting lead: {}", other);
                    other
                }
            })
    }

    async fn mark_auto_responder_sent(&self, lead_id: i64) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE leads SET auto_responder_sent = TRUE, auto_responder_sent_at = NOW() WHERE id = $1",
        )
        .bind(lead_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn log_email(&self, log: &NewEmailLog) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO email_logs (lead_id, email_address, subject, status,
                                    provider_message_id, error_message)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(log.lead_id)
        .bind(&log.email_address)
        .bind(&log.subject)
        .bind(log.status.as_str())
        .bind(log.provider_message_id.as_deref())
        .bind(log.error_message.as_deref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
