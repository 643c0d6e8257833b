//! Form Controller: edits the session profile and decides when it may be submitted.
//!
//! Pure state transitions only: no network, no persistence.

pub mod handlers;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::errors::AppError;
use crate::models::profile::{
    AdmissionPreference, Gender, InterestSelection, Profile, TargetType, INTERESTS, NO_PREFERENCE,
    REGIONS,
};

const MIN_GRADE: f64 = 1.0;
const MAX_GRADE: f64 = 9.0;

/// A required field that currently blocks submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingField {
    Gpa,
    Regions,
    Interests,
    MockExamGrade,
}

/// Owns the profile being edited.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    profile: Profile,
}

impl FormController {
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn set_target_type(&mut self, target_type: TargetType) {
        self.profile.target_type = target_type;
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.profile.gender = gender;
    }

    pub fn set_gpa(&mut self, gpa: &str) -> Result<(), AppError> {
        self.profile.gpa = parse_grade("gpa", gpa)?;
        Ok(())
    }

    /// Leaving the CSAT falls back to the GPA-weighted round.
    pub fn set_csat_participation(&mut self, participates: bool) {
        self.profile.csat_participation = participates;
        if !participates {
            self.profile.admission_preference = AdmissionPreference::Susi;
        }
    }

    pub fn set_admission_preference(&mut self, preference: AdmissionPreference) {
        self.profile.admission_preference = preference;
    }

    pub fn set_mock_exam_grade(&mut self, grade: &str) -> Result<(), AppError> {
        self.profile.mock_exam_grade = parse_grade("mock_exam_grade", grade)?;
        Ok(())
    }

    pub fn set_details(&mut self, details: String) {
        self.profile.details = details;
    }

    pub fn toggle_region(&mut self, region: &str) -> Result<(), AppError> {
        if !REGIONS.contains(&region) {
            return Err(AppError::Validation(format!("Unknown region '{region}'")));
        }
        if !self.profile.regions.remove(region) {
            self.profile.regions.insert(region.to_string());
        }
        Ok(())
    }

    /// Selecting the sentinel replaces everything with it. Selecting anything else
    /// drops the sentinel first, then flips the value.
    pub fn toggle_interest(&mut self, interest: &str) {
        if interest == NO_PREFERENCE {
            self.profile.interests = InterestSelection::NoPreference;
            return;
        }

        let mut fields = self.take_fields();
        if !fields.remove(interest) {
            fields.insert(interest.to_string());
        }
        self.profile.interests = InterestSelection::Fields(fields);
    }

    /// Adds a free-text interest outside the catalog. Blank input is ignored.
    pub fn add_custom_interest(&mut self, interest: &str) {
        let interest = interest.trim();
        if interest.is_empty() {
            return;
        }
        if interest == NO_PREFERENCE {
            self.profile.interests = InterestSelection::NoPreference;
            return;
        }
        let mut fields = self.take_fields();
        fields.insert(interest.to_string());
        self.profile.interests = InterestSelection::Fields(fields);
    }

    pub fn remove_custom_interest(&mut self, interest: &str) {
        if let InterestSelection::Fields(fields) = &mut self.profile.interests {
            fields.remove(interest);
        }
    }

    /// Selected interests that are not part of the fixed catalog.
    pub fn custom_interests(&self) -> Vec<String> {
        match &self.profile.interests {
            InterestSelection::NoPreference => Vec::new(),
            InterestSelection::Fields(fields) => fields
                .iter()
                .filter(|f| !INTERESTS.contains(&f.as_str()))
                .cloned()
                .collect(),
        }
    }

    pub fn missing_fields(&self) -> Vec<MissingField> {
        missing_fields(&self.profile)
    }

    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    fn take_fields(&mut self) -> BTreeSet<String> {
        match std::mem::take(&mut self.profile.interests) {
            InterestSelection::NoPreference => BTreeSet::new(),
            InterestSelection::Fields(fields) => fields,
        }
    }
}

/// Lists every submission invariant the profile currently violates.
pub fn missing_fields(profile: &Profile) -> Vec<MissingField> {
    let mut missing = Vec::new();
    if profile.gpa.trim().is_empty() {
        missing.push(MissingField::Gpa);
    }
    if profile.regions.is_empty() {
        missing.push(MissingField::Regions);
    }
    if profile.interests.is_empty() {
        missing.push(MissingField::Interests);
    }
    if profile.is_exam_weighted() && profile.mock_exam_grade.trim().is_empty() {
        missing.push(MissingField::MockExamGrade);
    }
    missing
}

/// Accepts an empty string (field cleared) or a grade between 1.0 and 9.0.
fn parse_grade(field: &str, raw: &str) -> Result<String, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(String::new());
    }
    let grade: f64 = raw
        .parse()
        .map_err(|_| AppError::Validation(format!("{field} must be a number, got '{raw}'")))?;
    if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
        return Err(AppError::Validation(format!(
            "{field} must be between {MIN_GRADE:.1} and {MAX_GRADE:.1}, got {raw}"
        )));
    }
    Ok(raw.to_string())
}
