//! Output contract handed to the generation service alongside the prompts.

use serde_json::{json, Value};

use crate::models::recommendation::Tier;

/// Every record must carry all of these, in this order.
pub const REQUIRED_FIELDS: [&str; 10] = [
    "universityName",
    "majorName",
    "location",
    "matchScore",
    "reason",
    "admissionType",
    "tags",
    "admissionUrl",
    "previousResult",
    "category",
];

pub const TAGS_PER_RECOMMENDATION: usize = 3;

/// Gemini `responseSchema`: an array of recommendation objects.
pub fn response_schema() -> Value {
    let tier_labels: Vec<&str> = Tier::ALL.iter().map(|t| t.label()).collect();

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "universityName": { "type": "STRING", "description": "대학 이름" },
                "majorName": { "type": "STRING", "description": "학과 이름" },
                "location": { "type": "STRING", "description": "지역 (시/군/구)" },
                "matchScore": { "type": "NUMBER", "description": "학생 적합도 점수 (0-100)" },
                "reason": { "type": "STRING", "description": "이 전형을 선택한 이유 및 학과 추천 사유" },
                "admissionType": { "type": "STRING", "description": "추천 전형 이름 (예: 일반전형, 특성화고 특별전형)" },
                "tags": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "minItems": TAGS_PER_RECOMMENDATION,
                    "maxItems": TAGS_PER_RECOMMENDATION,
                    "description": "핵심 태그 3개"
                },
                "admissionUrl": { "type": "STRING", "description": "대학 입학처 홈페이지 URL (https:// 포함)" },
                "previousResult": { "type": "STRING", "description": "전년도 입시결과 요약" },
                "category": {
                    "type": "STRING",
                    "enum": tier_labels,
                    "description": "지원 가능성 분류"
                }
            },
            "required": REQUIRED_FIELDS
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_array_of_objects() {
        let schema = response_schema();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(schema["items"]["type"], "OBJECT");
    }

    #[test]
    fn test_every_required_field_has_a_property() {
        let schema = response_schema();
        let properties = schema["items"]["properties"].as_object().unwrap();
        assert_eq!(properties.len(), REQUIRED_FIELDS.len());
        for field in REQUIRED_FIELDS {
            assert!(properties.contains_key(field), "missing property {field}");
        }

        let required: Vec<&str> = schema["items"]["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, REQUIRED_FIELDS.to_vec());
    }

    #[test]
    fn test_field_types() {
        let schema = response_schema();
        let props = &schema["items"]["properties"];
        assert_eq!(props["matchScore"]["type"], "NUMBER");
        assert_eq!(props["universityName"]["type"], "STRING");
        assert_eq!(props["tags"]["type"], "ARRAY");
        assert_eq!(props["tags"]["items"]["type"], "STRING");
        assert_eq!(props["tags"]["minItems"], 3);
        assert_eq!(props["tags"]["maxItems"], 3);
    }

    #[test]
    fn test_category_is_constrained_to_four_tiers() {
        let schema = response_schema();
        let labels = schema["items"]["properties"]["category"]["enum"]
            .as_array()
            .unwrap()
            .clone();
        assert_eq!(labels, vec!["상향", "소신", "적정", "안정"]);
    }
}
