pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::bookmarks::handlers as bookmarks;
use crate::form::handlers as form;
use crate::recommendation::handlers as recommendation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Form
        .route("/api/v1/catalog", get(form::handle_catalog))
        .route(
            "/api/v1/profile",
            get(form::handle_get_profile).patch(form::handle_patch_profile),
        )
        .route(
            "/api/v1/profile/regions/toggle",
            post(form::handle_toggle_region),
        )
        .route(
            "/api/v1/profile/interests/toggle",
            post(form::handle_toggle_interest),
        )
        .route(
            "/api/v1/profile/interests/custom",
            post(form::handle_add_custom_interest),
        )
        .route(
            "/api/v1/profile/interests/custom/remove",
            post(form::handle_remove_custom_interest),
        )
        // Recommendations
        .route(
            "/api/v1/recommendations",
            get(recommendation::handle_get_recommendations).post(recommendation::handle_submit),
        )
        .route(
            "/api/v1/recommendations/reset",
            post(recommendation::handle_reset),
        )
        .route(
            "/api/v1/recommendations/error",
            delete(recommendation::handle_dismiss_error),
        )
        // Bookmarks
        .route("/api/v1/bookmarks", get(bookmarks::handle_list_bookmarks))
        .route(
            "/api/v1/bookmarks/toggle",
            post(bookmarks::handle_toggle_bookmark),
        )
        .route(
            "/api/v1/bookmarks/check",
            post(bookmarks::handle_check_bookmark),
        )
        .with_state(state)
}
