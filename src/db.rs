use chrono::{DateTime, Duration, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::chat::ChatReply;
use crate::error::EngineError;
use crate::models::Recommendation;

#[derive(Debug, Clone)]
pub struct StoredRecommendation {
    pub recommendation_id: String,
    pub category: String,
    pub title: String,
    pub priority: String,
    pub confidence_score: f64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub fn expiry(now: DateTime<Utc>, ttl_days: i64) -> Result<DateTime<Utc>, EngineError> {
    Duration::try_days(ttl_days.max(1))
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| {
            EngineError::UpstreamUnavailable(format!("expiry of {ttl_days} days is out of range"))
        })
}

/// Append-only; nothing in the engine reads these rows back.
pub async fn store_recommendations(
    pool: &PgPool,
    user_id: &str,
    recommendations: &[Recommendation],
    ttl_days: i64,
    now: DateTime<Utc>,
) -> Result<usize, EngineError> {
    let expires_at = expiry(now, ttl_days)?;
    let mut tx = pool.begin().await?;

    for rec in recommendations {
        sqlx::query(
            r#"
            INSERT INTO pcos_insights.ai_recommendations
            (id, user_id, recommendation_id, type, title, description, priority,
             confidence_score, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&rec.id)
        .bind(rec.category.as_str())
        .bind(&rec.title)
        .bind(&rec.description)
        .bind(rec.priority.as_str())
        .bind(f64::from(rec.confidence) / 100.0)
        .bind(now)
        .bind(expires_at)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(recommendations.len())
}

pub async fn store_conversation(
    pool: &PgPool,
    user_id: &str,
    message: &str,
    reply: &ChatReply,
    now: DateTime<Utc>,
) -> Result<(), EngineError> {
    sqlx::query(
        r#"
        INSERT INTO pcos_insights.ai_conversations
        (id, user_id, message, response, sentiment, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(message)
    .bind(&reply.response)
    .bind(reply.sentiment.as_str())
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn fetch_active_recommendations(
    pool: &PgPool,
    user_id: &str,
    now: DateTime<Utc>,
) -> anyhow::Result<Vec<StoredRecommendation>> {
    let rows = sqlx::query(
        "SELECT recommendation_id, type, title, priority, confidence_score, created_at, expires_at \
         FROM pcos_insights.ai_recommendations \
         WHERE user_id = $1 AND expires_at > $2 \
         ORDER BY created_at DESC, confidence_score DESC",
    )
    .bind(user_id)
    .bind(now)
    .fetch_all(pool)
    .await?;

    let mut stored = Vec::new();

    for row in rows {
        stored.push(StoredRecommendation {
            recommendation_id: row.get("recommendation_id"),
            category: row.get("type"),
            title: row.get("title"),
            priority: row.get("priority"),
            confidence_score: row.get("confidence_score"),
            created_at: row.get("created_at"),
            expires_at: row.get("expires_at"),
        });
    }

    Ok(stored)
}
