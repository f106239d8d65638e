use actix_web::{HttpResponse, get};

/// Liveness probe for the deployment platform.
#[get("/health_check")]
pub async fn get() -> HttpResponse {
    HttpResponse::Ok().finish()
}
