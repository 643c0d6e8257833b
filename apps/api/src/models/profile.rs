use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The "no preference" interest marker. Mutually exclusive with every other interest.
pub const NO_PREFERENCE: &str = "없음";

pub const REGIONS: &[&str] = &[
    "서울",
    "경기/인천",
    "강원",
    "충청/대전",
    "전라/광주",
    "경상/부산/대구/울산",
    "제주",
    "전국(기숙사 가능)",
];

pub const INTERESTS: &[&str] = &[
    NO_PREFERENCE,
    "IT/소프트웨어",
    "디자인/예술",
    "경영/회계/금융",
    "보건/간호",
    "공학/엔지니어링",
    "조리/외식",
    "뷰티/미용",
    "관광/호텔",
    "유아교육/사회복지",
    "반려동물",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    #[default]
    FourYear,
    TwoYear,
}

impl TargetType {
    pub fn label(self) -> &'static str {
        match self {
            TargetType::FourYear => "4년제 대학교",
            TargetType::TwoYear => "전문대학(2-3년제)",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "남학생",
            Gender::Female => "여학생",
        }
    }
}

/// Which admission round the student is aiming for.
/// Only meaningful when the student sits the CSAT.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionPreference {
    /// 수시: school-record (GPA) weighted, CSAT only as a minimum bar.
    #[default]
    Susi,
    /// 정시: CSAT (mock exam) weighted.
    Jeongsi,
}

/// Interest selection. Either the sentinel alone or a set of concrete fields.
///
/// Serialized as a plain list of strings; `["없음"]` is the sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub enum InterestSelection {
    NoPreference,
    Fields(BTreeSet<String>),
}

impl Default for InterestSelection {
    fn default() -> Self {
        InterestSelection::Fields(BTreeSet::new())
    }
}

impl InterestSelection {
    pub fn is_empty(&self) -> bool {
        matches!(self, InterestSelection::Fields(fields) if fields.is_empty())
    }

    pub fn is_no_preference(&self) -> bool {
        matches!(self, InterestSelection::NoPreference)
    }

    /// Selected values in display order, with the sentinel rendered as `없음`.
    pub fn values(&self) -> Vec<String> {
        match self {
            InterestSelection::NoPreference => vec![NO_PREFERENCE.to_string()],
            InterestSelection::Fields(fields) => fields.iter().cloned().collect(),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        match self {
            InterestSelection::NoPreference => value == NO_PREFERENCE,
            InterestSelection::Fields(fields) => fields.contains(value),
        }
    }
}

impl From<Vec<String>> for InterestSelection {
    fn from(values: Vec<String>) -> Self {
        if values.iter().any(|v| v == NO_PREFERENCE) {
            InterestSelection::NoPreference
        } else {
            InterestSelection::Fields(values.into_iter().collect())
        }
    }
}

impl From<InterestSelection> for Vec<String> {
    fn from(selection: InterestSelection) -> Self {
        selection.values()
    }
}

/// The student's academic profile as entered on the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub target_type: TargetType,
    pub gender: Gender,
    /// 내신 등급, decimal string in 1.0–9.0.
    pub gpa: String,
    pub csat_participation: bool,
    pub admission_preference: AdmissionPreference,
    /// 모의고사 평균 등급, only required on the exam-weighted track.
    pub mock_exam_grade: String,
    pub regions: BTreeSet<String>,
    pub interests: InterestSelection,
    pub details: String,
}

impl Profile {
    /// True when the student sits the CSAT and targets the exam-weighted round.
    pub fn is_exam_weighted(&self) -> bool {
        self.csat_participation && self.admission_preference == AdmissionPreference::Jeongsi
    }

    /// True when the student sits the CSAT but targets the GPA-weighted round.
    pub fn uses_exam_minimum(&self) -> bool {
        self.csat_participation && self.admission_preference == AdmissionPreference::Susi
    }

    pub fn regions_joined(&self) -> String {
        self.regions.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }

    pub fn interests_joined(&self) -> String {
        self.interests.values().join(", ")
    }
}
