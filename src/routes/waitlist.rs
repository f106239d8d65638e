use crate::domain::WaitlistEmail;
use crate::startup::WaitlistForms;
use crate::utils::e400;
use actix_web::{HttpResponse, post, web};
use serde::Deserialize;

/// Which of the two capture forms on the page issued the submission.
/// Each placement keeps its own input buffer and in-flight guard.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormPlacement {
    #[default]
    Hero,
    Footer,
}

#[derive(Deserialize, Debug)]
pub struct JoinWaitlistParams {
    email: String,
    #[serde(default)]
    placement: FormPlacement,
}

#[post("/waitlist")]
#[tracing::instrument(
    name = "Joining the waitlist",
    skip(params, forms),
    fields(placement = ?params.placement)
)]
pub async fn post(
    params: web::Json<JoinWaitlistParams>,
    forms: web::Data<WaitlistForms>,
) -> Result<HttpResponse, actix_web::Error> {
    let JoinWaitlistParams { email, placement } = params.0;
    let email = WaitlistEmail::parse(email).map_err(e400)?;

    let form = forms.get(placement);
    form.submit(email.as_ref()).await;

    // The outcome travels through the notification channel; the response
    // simply relays whatever the page should be showing right now.
    Ok(HttpResponse::Ok().json(form.notifications().current()))
}
