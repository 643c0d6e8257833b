//! Axum route handlers for the profile form.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::form::{FormController, MissingField};
use crate::models::profile::{
    AdmissionPreference, Gender, Profile, TargetType, INTERESTS, NO_PREFERENCE, REGIONS,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub regions: &'static [&'static str],
    pub interests: &'static [&'static str],
    pub no_preference: &'static str,
}

/// Everything the form needs to render, including whether submit is enabled.
#[derive(Debug, Serialize)]
pub struct FormView {
    pub profile: Profile,
    pub is_valid: bool,
    pub missing_fields: Vec<MissingField>,
    pub custom_interests: Vec<String>,
    pub submitting: bool,
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct ProfilePatch {
    pub target_type: Option<TargetType>,
    pub gender: Option<Gender>,
    pub gpa: Option<String>,
    pub csat_participation: Option<bool>,
    pub admission_preference: Option<AdmissionPreference>,
    pub mock_exam_grade: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub value: String,
}

impl FormView {
    fn new(form: &FormController, submitting: bool) -> Self {
        Self {
            profile: form.profile().clone(),
            is_valid: form.is_valid(),
            missing_fields: form.missing_fields(),
            custom_interests: form.custom_interests(),
            submitting,
        }
    }
}

/// Validates every field of the patch before mutating anything.
fn apply_patch(form: &mut FormController, patch: ProfilePatch) -> Result<(), AppError> {
    let mut staged = form.clone();

    if let Some(target_type) = patch.target_type {
        staged.set_target_type(target_type);
    }
    if let Some(gender) = patch.gender {
        staged.set_gender(gender);
    }
    if let Some(gpa) = patch.gpa {
        staged.set_gpa(&gpa)?;
    }
    if let Some(participates) = patch.csat_participation {
        staged.set_csat_participation(participates);
    }
    if let Some(preference) = patch.admission_preference {
        staged.set_admission_preference(preference);
    }
    if let Some(grade) = patch.mock_exam_grade {
        staged.set_mock_exam_grade(&grade)?;
    }
    if let Some(details) = patch.details {
        staged.set_details(details);
    }

    *form = staged;
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/catalog
pub async fn handle_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        regions: REGIONS,
        interests: INTERESTS,
        no_preference: NO_PREFERENCE,
    })
}

/// GET /api/v1/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Json<FormView> {
    let session = state.session.lock().await;
    Json(FormView::new(&session.form, session.is_in_flight()))
}

/// PATCH /api/v1/profile
pub async fn handle_patch_profile(
    State(state): State<AppState>,
    Json(patch): Json<ProfilePatch>,
) -> Result<Json<FormView>, AppError> {
    let mut session = state.session.lock().await;
    apply_patch(&mut session.form, patch)?;
    Ok(Json(FormView::new(&session.form, session.is_in_flight())))
}

/// POST /api/v1/profile/regions/toggle
pub async fn handle_toggle_region(
    State(state): State<AppState>,
    Json(req): Json<SelectionRequest>,
) -> Result<Json<FormView>, AppError> {
    let mut session = state.session.lock().await;
    session.form.toggle_region(&req.value)?;
    Ok(Json(FormView::new(&session.form, session.is_in_flight())))
}

/// POST /api/v1/profile/interests/toggle
pub async fn handle_toggle_interest(
    State(state): State<AppState>,
    Json(req): Json<SelectionRequest>,
) -> Json<FormView> {
    let mut session = state.session.lock().await;
    session.form.toggle_interest(&req.value);
    Json(FormView::new(&session.form, session.is_in_flight()))
}

/// POST /api/v1/profile/interests/custom
pub async fn handle_add_custom_interest(
    State(state): State<AppState>,
    Json(req): Json<SelectionRequest>,
) -> Json<FormView> {
    let mut session = state.session.lock().await;
    session.form.add_custom_interest(&req.value);
    Json(FormView::new(&session.form, session.is_in_flight()))
}

/// POST /api/v1/profile/interests/custom/remove
pub async fn handle_remove_custom_interest(
    State(state): State<AppState>,
    Json(req): Json<SelectionRequest>,
) -> Json<FormView> {
    let mut session = state.session.lock().await;
    session.form.remove_custom_interest(&req.value);
    Json(FormView::new(&session.form, session.is_in_flight()))
}
