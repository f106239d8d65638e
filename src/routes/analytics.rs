use crate::analytics::{PageVisit, track_page_view};
use crate::session_state::VisitorSession;
use actix_web::http::header::USER_AGENT;
use actix_web::{HttpRequest, HttpResponse, post, web};
use serde::Deserialize;
use sqlx::PgPool;

#[derive(Deserialize, Debug)]
pub struct PageViewParams {
    path: String,
    #[serde(default)]
    referrer: String,
}

/// Page view beacon. Always answers 204: a failure to record a visit is a
/// diagnostics concern, never the visitor's.
#[post("/analytics/page_views")]
#[tracing::instrument(name = "Receiving page view beacon", skip_all, fields(path = %params.path))]
pub async fn post(
    params: web::Json<PageViewParams>,
    pool: web::Data<PgPool>,
    session: VisitorSession,
    request: HttpRequest,
) -> HttpResponse {
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let visit = PageVisit {
        path: params.0.path,
        referrer: params.0.referrer,
        user_agent,
    };

    track_page_view(pool.get_ref(), &session, visit).await;

    HttpResponse::NoContent().finish()
}
