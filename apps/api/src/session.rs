//! The single in-process session: the profile being edited and the state of the
//! outstanding recommendation request.

use crate::errors::AppError;
use crate::form::FormController;
use crate::models::profile::Profile;
use crate::models::recommendation::Recommendation;

/// Lifecycle of the recommendation request. Replaces separate loading/error flags so
/// "in flight and failed" cannot be represented.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    /// Results together with the profile they were generated for.
    Succeeded {
        profile: Profile,
        recommendations: Vec<Recommendation>,
    },
    Failed(String),
}

#[derive(Debug, Default)]
pub struct Session {
    pub form: FormController,
    pub request: RequestState,
}

impl Session {
    /// Moves to `InFlight` and returns the profile to submit.
    ///
    /// Rejects (never queues) a second submission, and refuses an incomplete profile.
    pub fn begin_submission(&mut self) -> Result<Profile, AppError> {
        if self.request == RequestState::InFlight {
            return Err(AppError::Conflict(
                "A recommendation request is already in progress".to_string(),
            ));
        }

        let missing = self.form.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Profile is incomplete: missing {missing:?}"
            )));
        }

        self.request = RequestState::InFlight;
        Ok(self.form.profile().clone())
    }

    /// Records the outcome of the request started by `begin_submission`.
    ///
    /// `submitted` is the profile `begin_submission` handed out. Later form edits
    /// never change how stored results are presented.
    pub fn finish_submission(
        &mut self,
        submitted: Profile,
        outcome: &Result<Vec<Recommendation>, AppError>,
    ) {
        self.request = match outcome {
            Ok(recs) => RequestState::Succeeded {
                profile: submitted,
                recommendations: recs.clone(),
            },
            Err(e) => RequestState::Failed(e.to_string()),
        };
    }

    pub fn status(&self) -> &'static str {
        match self.request {
            RequestState::Idle => "idle",
            RequestState::InFlight => "in_flight",
            RequestState::Succeeded { .. } => "succeeded",
            RequestState::Failed(_) => "failed",
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.request {
            RequestState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.request == RequestState::InFlight
    }

    /// The submitted profile and its recommendations, once a request has succeeded.
    pub fn results(&self) -> Option<(&Profile, &[Recommendation])> {
        match &self.request {
            RequestState::Succeeded {
                profile,
                recommendations,
            } => Some((profile, recommendations)),
            _ => None,
        }
    }

    /// "Set conditions again": drops results, keeps the profile.
    pub fn reset_results(&mut self) {
        if !self.is_in_flight() {
            self.request = RequestState::Idle;
        }
    }

    /// Clears a failure notification. Other states are left alone.
    pub fn dismiss_error(&mut self) {
        if matches!(self.request, RequestState::Failed(_)) {
            self.request = RequestState::Idle;
        }
    }
}
