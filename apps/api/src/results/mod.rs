//! Result Presenter: groups recommendations into the four tiers and builds the report.

use serde::Serialize;

use crate::bookmarks::BookmarkStore;
use crate::models::profile::Profile;
use crate::models::recommendation::{Recommendation, Tier};

const EMPTY_RESULTS_MESSAGE: &str = "추천 결과가 없습니다. 조건을 조금 더 넓혀보세요.";
const JEONGSI_GUIDE: &str =
    "정시는 가/나/다군 각 1회씩 총 3회 지원 가능합니다. 군별로 적절히 분산하여 지원하세요.";
const SUSI_GUIDE: &str = "일반적으로 4년제 수시 지원은 6회까지 가능하므로, \
    상향/소신/적정/안정을 조합하여 지원하세요.";
const DISCLAIMER: &str =
    "* 본 결과는 AI 분석에 기반한 참고용 자료입니다. 반드시 담임 선생님과 상담 후 최종 결정하세요.";

/// A recommendation as displayed, with its bookmark status.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationCard {
    #[serde(flatten)]
    pub recommendation: Recommendation,
    pub bookmarked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TierSection {
    pub tier: Tier,
    pub title: &'static str,
    pub description: &'static str,
    pub cards: Vec<RecommendationCard>,
}

/// The header line above the results: which grade drove the strategy, where, who.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub grade_label: String,
    pub regions: String,
    pub gender_label: &'static str,
    pub csat_minimum_considered: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationGuide {
    pub advice: &'static str,
    pub disclaimer: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    pub summary: ReportSummary,
    pub sections: Vec<TierSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
    pub guide: ApplicationGuide,
}

fn tier_heading(tier: Tier) -> (&'static str, &'static str) {
    match tier {
        Tier::Stretch => (
            "상향 지원 (도전)",
            "합격 확률 20~30% | 도전해볼 만한 대학",
        ),
        Tier::Ambitious => (
            "소신 지원 (목표)",
            "합격 확률 40~50% | 추가 합격을 노려볼 수 있는 목표 대학",
        ),
        Tier::Match => (
            "적정 지원 (합격권)",
            "합격 확률 70~80% | 무난하게 지원 가능한 대학",
        ),
        Tier::Safety => (
            "안정 지원 (보험)",
            "합격 확률 90% 이상 | 확실한 합격을 기대할 수 있는 대학",
        ),
    }
}

/// Groups in tier order (stretch, ambitious, match, safety). Empty tiers are omitted.
pub fn partition_by_tier(recs: &[Recommendation]) -> Vec<(Tier, Vec<&Recommendation>)> {
    Tier::ALL
        .into_iter()
        .map(|tier| {
            let group: Vec<&Recommendation> = recs.iter().filter(|r| r.category == tier).collect();
            (tier, group)
        })
        .filter(|(_, group)| !group.is_empty())
        .collect()
}

fn card(rec: &Recommendation, bookmarks: &BookmarkStore) -> RecommendationCard {
    RecommendationCard {
        recommendation: rec.clone(),
        bookmarked: bookmarks.is_bookmarked(rec),
    }
}

pub fn summarize(profile: &Profile) -> ReportSummary {
    let grade_label = if profile.is_exam_weighted() {
        format!("모의고사 {}등급", profile.mock_exam_grade)
    } else {
        format!("내신 {}등급", profile.gpa)
    };

    ReportSummary {
        grade_label,
        regions: profile.regions_joined(),
        gender_label: profile.gender.label(),
        csat_minimum_considered: profile.uses_exam_minimum(),
    }
}

pub fn application_guide(profile: &Profile) -> ApplicationGuide {
    ApplicationGuide {
        advice: if profile.is_exam_weighted() {
            JEONGSI_GUIDE
        } else {
            SUSI_GUIDE
        },
        disclaimer: DISCLAIMER,
    }
}

pub fn build_report(
    profile: &Profile,
    recs: &[Recommendation],
    bookmarks: &BookmarkStore,
) -> RecommendationReport {
    let sections = partition_by_tier(recs)
        .into_iter()
        .map(|(tier, group)| {
            let (title, description) = tier_heading(tier);
            TierSection {
                tier,
                title,
                description,
                cards: group.into_iter().map(|rec| card(rec, bookmarks)).collect(),
            }
        })
        .collect();

    RecommendationReport {
        summary: summarize(profile),
        sections,
        empty_message: recs.is_empty().then_some(EMPTY_RESULTS_MESSAGE),
        guide: application_guide(profile),
    }
}

/// The saved view: every bookmark, all flagged as bookmarked.
pub fn saved_cards(bookmarks: &BookmarkStore) -> Vec<RecommendationCard> {
    bookmarks
        .items()
        .iter()
        .map(|rec| RecommendationCard {
            recommendation: rec.clone(),
            bookmarked: true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::bookmarks::storage::memory::MemoryKeyValueStore;
    use crate::models::profile::{AdmissionPreference, Gender};
    use crate::models::recommendation::fixtures::recommendation;

    fn empty_bookmarks() -> BookmarkStore {
        BookmarkStore::load(Arc::new(MemoryKeyValueStore::default()))
    }

    fn profile() -> Profile {
        Profile {
            gpa: "3.5".to_string(),
            regions: ["서울".to_string(), "제주".to_string()].into_iter().collect(),
            ..Profile::default()
        }
    }

    fn mixed() -> Vec<Recommendation> {
        vec![
            recommendation("A대학교", "가학과", "일반전형", Tier::Safety),
            recommendation("B대학교", "나학과", "일반전형", Tier::Stretch),
            recommendation("C대학교", "다학과", "일반전형", Tier::Safety),
            recommendation("D대학교", "라학과", "일반전형", Tier::Match),
        ]
    }

    #[test]
    fn test_partition_keeps_tier_order_and_omits_empty() {
        let recs = mixed();
        let groups = partition_by_tier(&recs);
        let tiers: Vec<Tier> = groups.iter().map(|(t, _)| *t).collect();
        assert_eq!(tiers, vec![Tier::Stretch, Tier::Match, Tier::Safety]);

        let safety = &groups[2].1;
        assert_eq!(safety.len(), 2);
        assert_eq!(safety[0].university_name, "A대학교");
        assert_eq!(safety[1].university_name, "C대학교");
    }

    #[test]
    fn test_partition_of_nothing_is_empty() {
        assert!(partition_by_tier(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_report_marks_bookmarked_cards() {
        let recs = mixed();
        let mut bookmarks = empty_bookmarks();
        bookmarks.toggle(&recs[3]).await.unwrap();

        let report = build_report(&profile(), &recs, &bookmarks);
        assert_eq!(report.sections.len(), 3);
        assert!(report.empty_message.is_none());

        let match_section = &report.sections[1];
        assert_eq!(match_section.title, "적정 지원 (합격권)");
        assert!(match_section.cards[0].bookmarked);
        assert!(!report.sections[0].cards[0].bookmarked);
    }

    #[test]
    fn test_empty_report_has_message() {
        let report = build_report(&profile(), &[], &empty_bookmarks());
        assert!(report.sections.is_empty());
        assert_eq!(report.empty_message, Some(EMPTY_RESULTS_MESSAGE));
    }

    #[test]
    fn test_summary_for_susi_with_csat() {
        let profile = Profile {
            csat_participation: true,
            gender: Gender::Female,
            ..profile()
        };
        let summary = summarize(&profile);
        assert_eq!(summary.grade_label, "내신 3.5등급");
        assert_eq!(summary.regions, "서울, 제주");
        assert_eq!(summary.gender_label, "여학생");
        assert!(summary.csat_minimum_considered);
        assert_eq!(application_guide(&profile).advice, SUSI_GUIDE);
    }

    #[test]
    fn test_summary_for_jeongsi() {
        let profile = Profile {
            csat_participation: true,
            admission_preference: AdmissionPreference::Jeongsi,
            mock_exam_grade: "2.8".to_string(),
            ..profile()
        };
        let summary = summarize(&profile);
        assert_eq!(summary.grade_label, "모의고사 2.8등급");
        assert!(!summary.csat_minimum_considered);
        assert_eq!(application_guide(&profile).advice, JEONGSI_GUIDE);
    }

    #[test]
    fn test_card_serializes_flat() {
        let card = RecommendationCard {
            recommendation: recommendation("E대학교", "마학과", "일반전형", Tier::Ambitious),
            bookmarked: true,
        };
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["universityName"], "E대학교");
        assert_eq!(json["category"], "소신");
        assert_eq!(json["bookmarked"], true);
    }

    #[tokio::test]
    async fn test_saved_cards_are_all_bookmarked() {
        let mut bookmarks = empty_bookmarks();
        let recs = mixed();
        bookmarks.toggle(&recs[0]).await.unwrap();
        bookmarks.toggle(&recs[1]).await.unwrap();
        let cards = saved_cards(&bookmarks);
        assert_eq!(cards.len(), 2);
        assert!(cards.iter().all(|c| c.bookmarked));
    }
}
