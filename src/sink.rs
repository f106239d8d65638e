use crate::models::NewPageView;
use crate::utils::error_chain_fmt;
use async_trait::async_trait;

/// Postgres error code raised when an insert trips a unique constraint.
pub const UNIQUE_VIOLATION_CODE: &str = "23505";

/// Failure modes of the hosted store, as seen by the submission pipeline.
///
/// `Rejected` carries the structured `{code, message}` pair the store
/// reports; everything else (connection loss, pool exhaustion, decoding
/// surprises) collapses into `UnexpectedError`.
#[derive(thiserror::Error)]
pub enum SinkError {
    #[error("The store rejected the record.")]
    Rejected {
        code: Option<String>,
        message: Option<String>,
    },
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl SinkError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            SinkError::Rejected { code: Some(code), .. } if code == UNIQUE_VIOLATION_CODE
        )
    }
}

impl From<sqlx::Error> for SinkError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(db_error) => SinkError::Rejected {
                code: db_error.code().map(|code| code.into_owned()),
                message: Some(db_error.message().to_owned()),
            },
            other => SinkError::UnexpectedError(other.into()),
        }
    }
}

#[async_trait]
pub trait WaitlistSink: Send + Sync {
    async fn insert_waitlist_email(&self, email: &str) -> Result<(), SinkError>;
}

#[async_trait]
pub trait PageViewSink: Send + Sync {
    async fn insert_page_view(&self, page_view: &NewPageView) -> Result<(), SinkError>;
}
