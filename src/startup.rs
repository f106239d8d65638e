use crate::configuration::{DatabaseSettings, Settings};
use crate::notifications::NotificationChannel;
use crate::routes::waitlist::FormPlacement;
use crate::routes::{analytics, health_check, index, notifications, waitlist};
use crate::waitlist::WaitlistForm;
use actix_cors::Cors;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::dev::Server;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use secrecy::{ExposeSecret, Secret};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&configuration.database);
        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr().unwrap().port();
        let server = run(
            listener,
            connection_pool,
            configuration.application.hmac_secret,
            configuration.application.session_key,
            configuration.hosts.client,
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_connection_pool(configuration: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new().connect_lazy_with(configuration.connect_options())
}

/// The two waitlist capture forms on the page. They share the notification
/// channel and the sink but nothing else: each keeps its own input buffer
/// and in-flight guard.
pub struct WaitlistForms {
    footer: WaitlistForm,
    hero: WaitlistForm,
}

impl WaitlistForms {
    pub fn new(pool: PgPool, channel: NotificationChannel) -> Self {
        let sink: Arc<PgPool> = Arc::new(pool);
        Self {
            footer: WaitlistForm::new(sink.clone(), channel.clone()),
            hero: WaitlistForm::new(sink, channel),
        }
    }

    pub fn get(&self, placement: FormPlacement) -> &WaitlistForm {
        match placement {
            FormPlacement::Footer => &self.footer,
            FormPlacement::Hero => &self.hero,
        }
    }
}

fn run(
    listener: TcpListener,
    db_pool: PgPool,
    hmac_secret: Secret<String>,
    session_key: String,
    client_url: String,
) -> Result<Server, anyhow::Error> {
    let notification_channel = NotificationChannel::new();
    let waitlist_forms = Data::new(WaitlistForms::new(
        db_pool.clone(),
        notification_channel.clone(),
    ));
    let notification_channel = Data::new(notification_channel);
    let db_pool = Data::new(db_pool);
    let secret_key = Key::from(hmac_secret.expose_secret().as_bytes());

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(client_url.as_str())
            .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS", "HEAD"])
            .allowed_headers(&[
                actix_web::http::header::ACCEPT,
                actix_web::http::header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .block_on_origin_mismatch(true)
            .max_age(3600);
        // TLS terminates upstream; the session carries nothing but the
        // anonymous visitor identifier.
        let session_middleware =
            SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                .cookie_name(session_key.clone())
                .cookie_secure(false)
                .build();

        App::new()
            .wrap(session_middleware)
            .wrap(cors)
            .wrap(TracingLogger::default())
            .service(index::get)
            .service(health_check::get)
            .service(waitlist::post)
            .service(notifications::get)
            .service(notifications::delete)
            .service(analytics::post)
            .app_data(db_pool.clone())
            .app_data(waitlist_forms.clone())
            .app_data(notification_channel.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
