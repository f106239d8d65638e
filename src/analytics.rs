use crate::models::NewPageView;
use crate::sink::PageViewSink;
use uuid::Uuid;

/// Key under which the visitor identifier lives in the visitor's store.
pub const VISITOR_ID_KEY: &str = "friction_visitor_id";

/// Client-local storage for the opaque visitor identifier.
///
/// Production backs this with the visitor's session cookie; tests use an
/// in-memory map.
pub trait IdentityStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
}

/// Returns the stored visitor identifier, minting one on first use.
/// The identifier never expires and is never rotated.
pub fn resolve_visitor_id(store: &impl IdentityStore) -> String {
    match store.get(VISITOR_ID_KEY) {
        Some(visitor_id) => visitor_id,
        None => {
            let visitor_id = Uuid::new_v4().to_string();
            store.set(VISITOR_ID_KEY, visitor_id.clone());
            visitor_id
        }
    }
}

/// What the page reports about itself on load.
#[derive(Debug)]
pub struct PageVisit {
    pub path: String,
    pub referrer: String,
    pub user_agent: String,
}

/// Record one page view. Fire-and-forget: a failed insert is logged for
/// diagnostics and otherwise swallowed, so the beacon can never disrupt
/// the visit.
#[tracing::instrument(name = "Recording page view", skip(sink, store))]
pub async fn track_page_view(
    sink: &impl PageViewSink,
    store: &impl IdentityStore,
    visit: PageVisit,
) {
    let visitor_id = resolve_visitor_id(store);
    let page_view = NewPageView::new(visitor_id, visit);
    if let Err(e) = sink.insert_page_view(&page_view).await {
        tracing::warn!(error = ?e, "Failed to record page view");
    }
}
