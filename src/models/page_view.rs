use crate::analytics::PageVisit;
use crate::sink::{PageViewSink, SinkError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// One anonymous page view, attributed to a persisted visitor identifier.
#[derive(Serialize, Debug)]
pub struct NewPageView {
    pub id: Uuid,
    pub path: String,
    pub referrer: String,
    pub user_agent: String,
    pub viewed_at: DateTime<Utc>,
    pub visitor_id: String,
}

impl NewPageView {
    pub fn new(visitor_id: String, visit: PageVisit) -> Self {
        Self {
            id: Uuid::new_v4(),
            path: visit.path,
            referrer: visit.referrer,
            user_agent: visit.user_agent,
            viewed_at: Utc::now(),
            visitor_id,
        }
    }

    #[tracing::instrument(name = "Saving page view in the database", skip(self, pool))]
    pub async fn store(&self, pool: &PgPool) -> Result<(), SinkError> {
        sqlx::query(
            r#"
              INSERT INTO page_views (id, visitor_id, path, user_agent, referrer, viewed_at)
              VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(self.id)
        .bind(&self.visitor_id)
        .bind(&self.path)
        .bind(&self.user_agent)
        .bind(&self.referrer)
        .bind(self.viewed_at)
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl PageViewSink for PgPool {
    async fn insert_page_view(&self, page_view: &NewPageView) -> Result<(), SinkError> {
        page_view.store(self).await
    }
}
