use crate::analytics::IdentityStore;
use actix_session::{Session, SessionExt};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use std::future::{Ready, ready};

/// The visitor's cookie-backed session.
///
/// This is the "client-local storage" of the site: the only thing ever kept
/// in it is the opaque visitor identifier used to attribute page views.
pub struct VisitorSession(Session);

impl IdentityStore for VisitorSession {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get::<String>(key).ok().flatten()
    }

    // A session that cannot be written must not break the page view path,
    // so serialization failures are ignored.
    fn set(&self, key: &str, value: String) {
        let _ = self.0.insert(key, value);
    }
}

impl FromRequest for VisitorSession {
    // Return the same error returned by the implementation of `FromRequest`
    // for `Session`.
    type Error = <Session as FromRequest>::Error;
    // Rust does not yet support the `async` syntax in traits.
    // `FromRequest` expects a `Future` as return type to allow for extractors
    // that need to perform asynchronous operations (e.g. an HTTP call).
    // We do not have a `Future` because we don't perform any I/O,
    // so we wrap `VisitorSession` into `Ready` to convert it into a `Future`
    // that resolves to the wrapped value the first time it's polled by
    // the executor.
    type Future = Ready<Result<VisitorSession, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(VisitorSession(req.get_session())))
    }
}
