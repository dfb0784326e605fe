// src/db/campaign_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::marketing::{Campaign, CampaignStatus, CreateCampaignPayload},
};

const LOCK_QUERY: &str = "SELECT * FROM campaigns WHERE id = $1 FOR UPDATE";

const MARK_SENT_QUERY: &str = r#"
    UPDATE campaigns SET sent = sent + $2, status = $3
    WHERE id = $1 AND status <> $3
    RETURNING *
"#;

const ADD_RESPONSES_QUERY: &str = r#"
    UPDATE campaigns SET responses = responses + $2
    WHERE id = $1 AND responses + $2 <= sent
    RETURNING *
"#;

#[derive(Clone)]
pub struct CampaignRepository {
    pool: PgPool,
}

impl CampaignRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Campaign>, AppError> {
        let campaigns = sqlx::query_as::<_, Campaign>(
            "SELECT * FROM campaigns ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(campaigns)
    }

    /// Row-locked read for a transaction that is about to change the campaign.
    pub async fn lock_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Campaign>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let campaign = sqlx::query_as::<_, Campaign>(LOCK_QUERY)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(campaign)
    }

    pub async fn create(&self, input: &CreateCampaignPayload) -> Result<Campaign, AppError> {
        let campaign = sqlx::query_as::<_, Campaign>(
            r#"
            INSERT INTO campaigns (name, channel, target_audience, message)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(input.channel)
        .bind(input.target_audience)
        .bind(&input.message)
        .fetch_one(&self.pool)
        .await?;
        Ok(campaign)
    }

    /// Adds `sent` to the counter and marks the campaign as sent.
    /// `None` when the campaign is missing or was already sent.
    pub async fn mark_sent<'e, E>(&self, executor: E, id: Uuid, sent: i32) -> Result<Option<Campaign>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let campaign = sqlx::query_as::<_, Campaign>(MARK_SENT_QUERY)
            .bind(id)
            .bind(sent)
            .bind(CampaignStatus::Sent)
            .fetch_optional(executor)
            .await?;
        Ok(campaign)
    }

    /// `None` when the campaign is missing or the total would pass `sent`.
    pub async fn add_responses<'e, E>(&self, executor: E, id: Uuid, count: i32) -> Result<Option<Campaign>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let campaign = sqlx::query_as::<_, Campaign>(ADD_RESPONSES_QUERY)
            .bind(id)
            .bind(count)
            .fetch_optional(executor)
            .await?;
        Ok(campaign)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campaign_reads_before_writes_lock_the_row() {
        assert!(LOCK_QUERY.ends_with("FOR UPDATE"));
    }

    #[test]
    fn counter_updates_carry_their_guards() {
        assert!(MARK_SENT_QUERY.contains("AND status <> $3"));
        assert!(ADD_RESPONSES_QUERY.contains("AND responses + $2 <= sent"));
    }
}
