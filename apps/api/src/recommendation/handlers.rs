//! Axum route handlers for submitting a profile and reading the results.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::recommendation::requester::request_recommendations;
use crate::results::{build_report, RecommendationReport};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RecommendationsView {
    /// idle | in_flight | succeeded | failed
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<RecommendationReport>,
}

/// POST /api/v1/recommendations
///
/// Submits the session profile. Rejected with 409 while a request is in flight
/// and with 400 when the profile is incomplete.
///
/// The generation call runs on its own task so a dropped connection cannot leave
/// the session stuck in flight. A panicking task is recorded as a failure.
pub async fn handle_submit(
    State(state): State<AppState>,
) -> Result<Json<RecommendationReport>, AppError> {
    let profile = state.session.lock().await.begin_submission()?;
    info!("Recommendation request started");

    let task_state = state.clone();
    let task_profile = profile.clone();
    let joined = tokio::spawn(async move {
        let outcome =
            request_recommendations(&task_profile, task_state.generator.as_ref()).await;
        task_state
            .session
            .lock()
            .await
            .finish_submission(task_profile, &outcome);
        outcome
    })
    .await;

    let outcome = match joined {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Recommendation task failed: {e}");
            let outcome = Err(AppError::RecommendationFetch);
            state
                .session
                .lock()
                .await
                .finish_submission(profile.clone(), &outcome);
            outcome
        }
    };

    let recommendations = outcome?;
    info!(
        "Recommendation request finished with {} results",
        recommendations.len()
    );

    let bookmarks = state.bookmarks.lock().await;
    Ok(Json(build_report(&profile, &recommendations, &bookmarks)))
}

/// GET /api/v1/recommendations
pub async fn handle_get_recommendations(
    State(state): State<AppState>,
) -> Json<RecommendationsView> {
    let session = state.session.lock().await;
    let report = match session.results() {
        Some((submitted, recommendations)) => {
            let bookmarks = state.bookmarks.lock().await;
            Some(build_report(submitted, recommendations, &bookmarks))
        }
        None => None,
    };

    Json(RecommendationsView {
        status: session.status(),
        error: session.error_message().map(str::to_string),
        report,
    })
}

/// POST /api/v1/recommendations/reset
pub async fn handle_reset(State(state): State<AppState>) -> StatusCode {
    state.session.lock().await.reset_results();
    StatusCode::NO_CONTENT
}

/// DELETE /api/v1/recommendations/error
pub async fn handle_dismiss_error(State(state): State<AppState>) -> StatusCode {
    state.session.lock().await.dismiss_error();
    StatusCode::NO_CONTENT
}
