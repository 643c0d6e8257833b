use std::sync::Arc;

use tokio::sync::Mutex;

use crate::bookmarks::BookmarkStore;
use crate::llm_client::GenerationService;
use crate::session::Session;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generation backend. `LlmClient` in production, canned replies in tests.
    pub generator: Arc<dyn GenerationService>,
    /// The one student session this process serves.
    pub session: Arc<Mutex<Session>>,
    pub bookmarks: Arc<Mutex<BookmarkStore>>,
}

impl AppState {
    pub fn new(generator: Arc<dyn GenerationService>, bookmarks: BookmarkStore) -> Self {
        Self {
            generator,
            session: Arc::new(Mutex::new(Session::default())),
            bookmarks: Arc::new(Mutex::new(bookmarks)),
        }
    }
}
