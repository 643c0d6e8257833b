//! Recommendation Requester: turns a validated profile into one generation call
//! and parses the reply into recommendations.
//!
//! Prompt construction is a pure function of the profile. The only side effect
//! is the single call through `GenerationService`.

use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::{CONSULTANT_PERSONA, REAL_DATA_INSTRUCTION};
use crate::llm_client::{strip_json_fences, GenerationRequest, GenerationService};
use crate::models::profile::{Gender, InterestSelection, Profile, TargetType};
use crate::models::recommendation::{Recommendation, Tier};
use crate::recommendation::prompts::{
    FEMALE_INCLUSION_NOTE, FOUR_YEAR_CRITERIA, INTEREST_FOCUS_TEMPLATE, JEONGSI_STRATEGY_TEMPLATE,
    MALE_EXCLUSION_RULE, NO_EXAM_STRATEGY, NO_PREFERENCE_INTEREST_INSTRUCTION,
    SUSI_WITH_EXAM_MINIMUM_STRATEGY, SYSTEM_INSTRUCTION_TEMPLATE, TASK_PROMPT_TEMPLATE,
    TWO_YEAR_EMPLOYABILITY_CRITERIA, TWO_YEAR_MAJOR_FIT_CRITERIA,
};
use crate::recommendation::schema::{response_schema, TAGS_PER_RECOMMENDATION};

/// Exactly one of these applies to any profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionStrategy {
    /// No CSAT: only tracks without a CSAT minimum.
    NoExam,
    /// CSAT + 수시: clearable CSAT minimums, vocational-school tracks first.
    SusiWithExamMinimum,
    /// CSAT + 정시: the mock exam grade is the primary criterion.
    JeongsiExamWeighted,
}

impl AdmissionStrategy {
    pub fn for_profile(profile: &Profile) -> Self {
        if !profile.csat_participation {
            AdmissionStrategy::NoExam
        } else if profile.is_exam_weighted() {
            AdmissionStrategy::JeongsiExamWeighted
        } else {
            AdmissionStrategy::SusiWithExamMinimum
        }
    }
}

/// The instruction block, task prompt, and schema for one profile.
#[derive(Debug, Clone)]
pub struct RecommendationPrompt {
    pub system_instruction: String,
    pub prompt: String,
    pub response_schema: serde_json::Value,
}

impl RecommendationPrompt {
    pub fn for_profile(profile: &Profile) -> Self {
        Self {
            system_instruction: build_system_instruction(profile),
            prompt: build_task_prompt(profile),
            response_schema: response_schema(),
        }
    }

    fn as_request(&self) -> GenerationRequest<'_> {
        GenerationRequest {
            system_instruction: &self.system_instruction,
            prompt: &self.prompt,
            response_schema: &self.response_schema,
        }
    }
}

/// Asks the generation service for recommendations.
///
/// An absent or blank reply is an empty list. Every other failure (transport,
/// non-2xx, unparsable body) collapses into `AppError::RecommendationFetch`.
pub async fn request_recommendations(
    profile: &Profile,
    service: &dyn GenerationService,
) -> Result<Vec<Recommendation>, AppError> {
    let prompt = RecommendationPrompt::for_profile(profile);
    info!(
        "Requesting recommendations: target={:?} strategy={:?}",
        profile.target_type,
        AdmissionStrategy::for_profile(profile)
    );

    let text = service.generate(prompt.as_request()).await.map_err(|e| {
        error!("Generation call failed: {e}");
        AppError::RecommendationFetch
    })?;

    let recommendations = parse_recommendations(text.as_deref()).map_err(|e| {
        error!("Generation response could not be parsed: {e}");
        AppError::RecommendationFetch
    })?;

    check_contract(&recommendations);
    Ok(recommendations)
}

/// `None` or whitespace-only text means "no recommendations", not a failure.
pub fn parse_recommendations(text: Option<&str>) -> Result<Vec<Recommendation>, serde_json::Error> {
    match text.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(text) => serde_json::from_str(strip_json_fences(text)),
    }
}

/// Logs deviations from the requested 10 records / 2-2-4-2 split / 3 tags. Never rejects.
fn check_contract(recommendations: &[Recommendation]) {
    let expected_total: usize = Tier::ALL.iter().map(|t| t.expected_count()).sum();
    if recommendations.len() != expected_total {
        warn!(
            "Expected {expected_total} recommendations, got {}",
            recommendations.len()
        );
    }

    for tier in Tier::ALL {
        let count = recommendations.iter().filter(|r| r.category == tier).count();
        if count != tier.expected_count() {
            warn!(
                "Tier {} has {count} recommendations (expected {})",
                tier.label(),
                tier.expected_count()
            );
        }
    }

    for rec in recommendations
        .iter()
        .filter(|r| r.tags.len() != TAGS_PER_RECOMMENDATION)
    {
        warn!(
            "{} {} has {} tags",
            rec.university_name,
            rec.major_name,
            rec.tags.len()
        );
    }
}

/// The grade line the strategy is anchored on.
pub fn grade_info(profile: &Profile) -> String {
    match AdmissionStrategy::for_profile(profile) {
        AdmissionStrategy::NoExam => format!("내신 등급: {}등급 (수능 미응시)", profile.gpa),
        AdmissionStrategy::SusiWithExamMinimum => {
            format!("내신 등급: {}등급 (수능 최저 고려 가능)", profile.gpa)
        }
        AdmissionStrategy::JeongsiExamWeighted => format!(
            "모의고사 평균 등급: {}등급 (내신 {}등급은 참고용)",
            profile.mock_exam_grade, profile.gpa
        ),
    }
}

fn strategy_instruction(profile: &Profile) -> String {
    match AdmissionStrategy::for_profile(profile) {
        AdmissionStrategy::NoExam => NO_EXAM_STRATEGY.to_string(),
        AdmissionStrategy::SusiWithExamMinimum => SUSI_WITH_EXAM_MINIMUM_STRATEGY.to_string(),
        AdmissionStrategy::JeongsiExamWeighted => fill_template(
            JEONGSI_STRATEGY_TEMPLATE,
            &[("mock_exam_grade", profile.mock_exam_grade.as_str())],
        ),
    }
}

fn gender_rule(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => MALE_EXCLUSION_RULE,
        Gender::Female => FEMALE_INCLUSION_NOTE,
    }
}

fn interest_instruction(profile: &Profile) -> String {
    match &profile.interests {
        InterestSelection::NoPreference => NO_PREFERENCE_INTEREST_INSTRUCTION.to_string(),
        InterestSelection::Fields(fields) if fields.is_empty() => {
            NO_PREFERENCE_INTEREST_INSTRUCTION.to_string()
        }
        InterestSelection::Fields(_) => fill_template(
            INTEREST_FOCUS_TEMPLATE,
            &[("interests", profile.interests_joined().as_str())],
        ),
    }
}

fn two_year_criteria(profile: &Profile) -> &'static str {
    if profile.interests.is_no_preference() || profile.interests.is_empty() {
        TWO_YEAR_EMPLOYABILITY_CRITERIA
    } else {
        TWO_YEAR_MAJOR_FIT_CRITERIA
    }
}

pub fn build_system_instruction(profile: &Profile) -> String {
    fill_template(
        SYSTEM_INSTRUCTION_TEMPLATE,
        &[
            ("persona", CONSULTANT_PERSONA),
            ("four_year_label", TargetType::FourYear.label()),
            ("four_year_criteria", FOUR_YEAR_CRITERIA),
            ("two_year_label", TargetType::TwoYear.label()),
            ("two_year_criteria", two_year_criteria(profile)),
            ("gender_rule", gender_rule(profile.gender)),
            ("strategy", strategy_instruction(profile).as_str()),
            ("interest_instruction", interest_instruction(profile).as_str()),
            ("grade_info", grade_info(profile).as_str()),
            ("regions", profile.regions_joined().as_str()),
            ("interests", profile.interests_joined().as_str()),
            ("details", profile.details.as_str()),
            ("real_data_instruction", REAL_DATA_INSTRUCTION),
        ],
    )
}

pub fn build_task_prompt(profile: &Profile) -> String {
    fill_template(
        TASK_PROMPT_TEMPLATE,
        &[("target_label", profile.target_type.label())],
    )
}

/// Single-pass `{name}` substitution. Substituted values are never re-scanned,
/// so braces in student-entered text survive untouched.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::LlmError;
    use crate::models::profile::AdmissionPreference;

    /// Replays a canned reply and records the request it was given.
    struct CannedService {
        reply: Result<Option<String>, u16>,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl CannedService {
        fn new(reply: Result<Option<String>, u16>) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerationService for CannedService {
        async fn generate(
            &self,
            request: GenerationRequest<'_>,
        ) -> Result<Option<String>, LlmError> {
            self.seen.lock().unwrap().push((
                request.system_instruction.to_string(),
                request.prompt.to_string(),
            ));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "unavailable".to_string(),
                }),
            }
        }
    }

    fn scenario_profile() -> Profile {
        Profile {
            target_type: TargetType::FourYear,
            gender: Gender::Male,
            gpa: "3.5".to_string(),
            csat_participation: false,
            regions: ["서울".to_string()].into_iter().collect(),
            interests: InterestSelection::Fields(
                ["IT/소프트웨어".to_string()].into_iter().collect(),
            ),
            ..Profile::default()
        }
    }

    const ONE_RECOMMENDATION: &str = r#"[{
        "universityName": "한국공학대학교",
        "majorName": "컴퓨터공학부",
        "location": "경기 시흥시",
        "matchScore": 78,
        "reason": "최저 없는 특성화고 전형",
        "admissionType": "특성화고교졸업자전형",
        "tags": ["공학", "취업", "산학협력"],
        "admissionUrl": "https://ipsi.tukorea.ac.kr",
        "previousResult": "전년도 70% 컷 3.8등급",
        "category": "적정"
    }]"#;

    #[test]
    fn test_strategy_selection() {
        let mut profile = scenario_profile();
        assert_eq!(AdmissionStrategy::for_profile(&profile), AdmissionStrategy::NoExam);

        profile.csat_participation = true;
        assert_eq!(
            AdmissionStrategy::for_profile(&profile),
            AdmissionStrategy::SusiWithExamMinimum
        );

        profile.admission_preference = AdmissionPreference::Jeongsi;
        assert_eq!(
            AdmissionStrategy::for_profile(&profile),
            AdmissionStrategy::JeongsiExamWeighted
        );
    }

    #[test]
    fn test_male_no_exam_scenario_instruction() {
        let prompt = RecommendationPrompt::for_profile(&scenario_profile());
        let system = &prompt.system_instruction;

        assert!(system.contains("'여자대학교'"));
        assert!(system.contains("반드시 제외하십시오"));
        assert!(system.contains("수능 최저학력기준이 **없는** 대학/전형만"));
        assert!(!system.contains("[수시 지원 전략 (수능 응시함)]"));
        assert!(!system.contains("[정시 지원 전략"));

        assert!(system.contains("**상향 (2개)**"));
        assert!(system.contains("**소신 (2개)**"));
        assert!(system.contains("**적정 (4개)**"));
        assert!(system.contains("**안정 (2개)**"));
        assert!(prompt.prompt.contains("**총 10곳**"));
        assert!(prompt.prompt.contains("상향 2개, 소신 2개, 적정 4개, 안정 2개"));
        assert!(prompt.prompt.contains("4년제 대학교"));

        assert!(system.contains("선호 지역: 서울"));
        assert!(system.contains("관심 분야: IT/소프트웨어. 이 분야와 연관성이 높은 학과"));
        assert!(system.contains("내신 등급: 3.5등급 (수능 미응시)"));
    }

    #[test]
    fn test_female_instruction_has_no_exclusion() {
        let profile = Profile {
            gender: Gender::Female,
            ..scenario_profile()
        };
        let system = build_system_instruction(&profile);
        assert!(system.contains(FEMALE_INCLUSION_NOTE));
        assert!(!system.contains("반드시 제외하십시오"));
    }

    #[test]
    fn test_susi_with_exam_minimum_instruction() {
        let profile = Profile {
            csat_participation: true,
            ..scenario_profile()
        };
        let system = build_system_instruction(&profile);
        assert!(system.contains("수능 최저학력기준 활용"));
        assert!(system.contains("학생부 종합 지양"));
        assert!(system.contains("내신 등급: 3.5등급 (수능 최저 고려 가능)"));
        assert!(!system.contains("수능 최저 미적용"));
    }

    #[test]
    fn test_jeongsi_instruction_uses_mock_grade() {
        let profile = Profile {
            csat_participation: true,
            admission_preference: AdmissionPreference::Jeongsi,
            mock_exam_grade: "4.2".to_string(),
            ..scenario_profile()
        };
        let system = build_system_instruction(&profile);
        assert!(system.contains("**모의고사 등급(4.2)**을 절대적인 기준"));
        assert!(system.contains("모의고사 평균 등급: 4.2등급 (내신 3.5등급은 참고용)"));
        assert!(!system.contains("수능 최저 미적용"));
    }

    #[test]
    fn test_two_year_criteria_follow_interest_choice() {
        let mut profile = Profile {
            target_type: TargetType::TwoYear,
            ..scenario_profile()
        };
        assert_eq!(two_year_criteria(&profile), TWO_YEAR_MAJOR_FIT_CRITERIA);
        assert!(build_task_prompt(&profile).contains("전문대학(2-3년제)"));

        profile.interests = InterestSelection::NoPreference;
        assert_eq!(two_year_criteria(&profile), TWO_YEAR_EMPLOYABILITY_CRITERIA);
        let system = build_system_instruction(&profile);
        assert!(system.contains("대학 간판이나 합격 가능성"));
        assert!(system.contains("관심 분야: 없음"));
    }

    #[test]
    fn test_instruction_is_deterministic() {
        let profile = scenario_profile();
        assert_eq!(
            build_system_instruction(&profile),
            build_system_instruction(&profile)
        );
    }

    #[test]
    fn test_fill_template_leaves_user_braces_alone() {
        let profile = Profile {
            details: "자격증 {regions} 보유".to_string(),
            ..scenario_profile()
        };
        let system = build_system_instruction(&profile);
        assert!(system.contains("추가 정보: 자격증 {regions} 보유"));
        assert!(!system.contains("{details}"));
        assert!(!system.contains("{strategy}"));
    }

    #[test]
    fn test_fill_template_unknown_placeholder_is_literal() {
        assert_eq!(fill_template("a {x} {y}", &[("x", "1")]), "a 1 {y}");
        assert_eq!(fill_template("{open", &[]), "{open");
    }

    #[test]
    fn test_parse_absent_or_blank_text_is_empty() {
        assert!(parse_recommendations(None).unwrap().is_empty());
        assert!(parse_recommendations(Some("")).unwrap().is_empty());
        assert!(parse_recommendations(Some("  \n")).unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_text_is_error() {
        assert!(parse_recommendations(Some("not json")).is_err());
        assert!(parse_recommendations(Some(r#"[{"universityName": "x"}]"#)).is_err());
        assert!(parse_recommendations(Some(r#"[{"category": "최상"}]"#)).is_err());
    }

    #[test]
    fn test_parse_fenced_array() {
        let fenced = format!("```json\n{ONE_RECOMMENDATION}\n```");
        let recs = parse_recommendations(Some(&fenced)).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].category, Tier::Match);
    }

    #[tokio::test]
    async fn test_request_sends_prompts_and_parses_reply() {
        let service = CannedService::new(Ok(Some(ONE_RECOMMENDATION.to_string())));
        let recs = request_recommendations(&scenario_profile(), &service)
            .await
            .unwrap();

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].university_name, "한국공학대학교");

        let seen = service.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].0.contains("'여자대학교'"));
        assert!(seen[0].1.contains("**총 10곳**"));
    }

    #[tokio::test]
    async fn test_request_with_empty_reply_returns_empty_list() {
        let service = CannedService::new(Ok(Some(String::new())));
        let recs = request_recommendations(&scenario_profile(), &service)
            .await
            .unwrap();
        assert!(recs.is_empty());

        let service = CannedService::new(Ok(None));
        let recs = request_recommendations(&scenario_profile(), &service)
            .await
            .unwrap();
        assert!(recs.is_empty());
    }

    #[tokio::test]
    async fn test_request_with_malformed_reply_fails() {
        let service = CannedService::new(Ok(Some("{\"oops\": true".to_string())));
        let err = request_recommendations(&scenario_profile(), &service)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RecommendationFetch));
    }

    #[tokio::test]
    async fn test_request_with_service_error_fails() {
        let service = CannedService::new(Err(503));
        let err = request_recommendations(&scenario_profile(), &service)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RecommendationFetch));
        assert_eq!(service.seen.lock().unwrap().len(), 1);
    }
}
