mod analytics;
mod health_check;
mod helpers;
mod notifications;
