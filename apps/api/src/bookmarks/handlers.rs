//! Axum route handlers for the saved-universities view.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::recommendation::Recommendation;
use crate::results::{saved_cards, RecommendationCard};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SavedListResponse {
    pub count: usize,
    pub items: Vec<RecommendationCard>,
}

#[derive(Debug, Serialize)]
pub struct BookmarkStatusResponse {
    pub bookmarked: bool,
    pub count: usize,
}

/// GET /api/v1/bookmarks
pub async fn handle_list_bookmarks(State(state): State<AppState>) -> Json<SavedListResponse> {
    let bookmarks = state.bookmarks.lock().await;
    Json(SavedListResponse {
        count: bookmarks.len(),
        items: saved_cards(&bookmarks),
    })
}

/// POST /api/v1/bookmarks/toggle
///
/// Body is the full recommendation; identity is taken from university, major and
/// admission track only.
pub async fn handle_toggle_bookmark(
    State(state): State<AppState>,
    Json(rec): Json<Recommendation>,
) -> Result<Json<BookmarkStatusResponse>, AppError> {
    let mut bookmarks = state.bookmarks.lock().await;
    let bookmarked = bookmarks.toggle(&rec).await?;
    Ok(Json(BookmarkStatusResponse {
        bookmarked,
        count: bookmarks.len(),
    }))
}

/// POST /api/v1/bookmarks/check
pub async fn handle_check_bookmark(
    State(state): State<AppState>,
    Json(rec): Json<Recommendation>,
) -> Json<BookmarkStatusResponse> {
    let bookmarks = state.bookmarks.lock().await;
    Json(BookmarkStatusResponse {
        bookmarked: bookmarks.is_bookmarked(&rec),
        count: bookmarks.len(),
    })
}
