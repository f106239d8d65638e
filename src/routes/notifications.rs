use crate::notifications::NotificationChannel;
use crate::utils::ResponseMessage;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, delete, get, web};

/// The notification the page should be showing right now, or `null`.
#[get("/notifications")]
pub async fn get(channel: web::Data<NotificationChannel>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::json())
        .json(channel.current())
}

/// Explicit dismissal (the visitor clicked the notification). Idempotent.
#[delete("/notifications")]
pub async fn delete(channel: web::Data<NotificationChannel>) -> HttpResponse {
    channel.dismiss();
    HttpResponse::Ok()
        .content_type(ContentType::json())
        .json(ResponseMessage::from("The notification has been dismissed."))
}
