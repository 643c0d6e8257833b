use serde::{Deserialize, Serialize};

/// Admission-likelihood bucket. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    /// ~20–30% estimated admit probability.
    #[serde(rename = "상향")]
    Stretch,
    /// ~40–50%.
    #[serde(rename = "소신")]
    Ambitious,
    /// ~70–80%.
    #[serde(rename = "적정")]
    Match,
    /// 90% or more.
    #[serde(rename = "안정")]
    Safety,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Stretch, Tier::Ambitious, Tier::Match, Tier::Safety];

    pub fn label(self) -> &'static str {
        match self {
            Tier::Stretch => "상향",
            Tier::Ambitious => "소신",
            Tier::Match => "적정",
            Tier::Safety => "안정",
        }
    }

    /// How many records of this tier the model is asked to return.
    pub fn expected_count(self) -> usize {
        match self {
            Tier::Stretch | Tier::Ambitious | Tier::Safety => 2,
            Tier::Match => 4,
        }
    }
}

/// One suggested university program, exactly as returned by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub university_name: String,
    pub major_name: String,
    pub location: String,
    pub match_score: f64,
    pub reason: String,
    /// 전형 유형, free text (e.g. 특성화고 특별전형).
    pub admission_type: String,
    pub tags: Vec<String>,
    pub admission_url: String,
    pub previous_result: String,
    pub category: Tier,
}

/// Bookmark identity: university + major + admission track, compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookmarkKey<'a> {
    pub university_name: &'a str,
    pub major_name: &'a str,
    pub admission_type: &'a str,
}

impl Recommendation {
    pub fn bookmark_key(&self) -> BookmarkKey<'_> {
        BookmarkKey {
            university_name: &self.university_name,
            major_name: &self.major_name,
            admission_type: &self.admission_type,
        }
    }

    pub fn same_identity(&self, other: &Recommendation) -> bool {
        self.bookmark_key() == other.bookmark_key()
    }
}
