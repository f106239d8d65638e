pub mod analytics;
pub mod configuration;
pub mod domain;
pub mod models;
pub mod notifications;
pub mod routes;
pub mod session_state;
pub mod sink;
pub mod startup;
pub mod telemetry;
pub mod utils;
pub mod waitlist;
