use crate::sink::{SinkError, WaitlistSink};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// A waitlist row about to be persisted.
///
/// The `waitlist` table enforces email uniqueness; a duplicate insert
/// surfaces as a `SinkError::Rejected` carrying the Postgres code `23505`.
#[derive(Serialize, Debug)]
pub struct NewWaitlistEntry {
    pub email: String,
    pub id: Uuid,
    pub joined_at: DateTime<Utc>,
}

impl NewWaitlistEntry {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            id: Uuid::new_v4(),
            joined_at: Utc::now(),
        }
    }

    #[tracing::instrument(name = "Saving waitlist entry in the database", skip(self, pool))]
    pub async fn store(&self, pool: &PgPool) -> Result<(), SinkError> {
        sqlx::query(
            r#"
              INSERT INTO waitlist (id, email, joined_at)
              VALUES ($1, $2, $3)
            "#,
        )
        .bind(self.id)
        .bind(&self.email)
        .bind(self.joined_at)
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl WaitlistSink for PgPool {
    async fn insert_waitlist_email(&self, email: &str) -> Result<(), SinkError> {
        NewWaitlistEntry::new(email).store(self).await
    }
}
