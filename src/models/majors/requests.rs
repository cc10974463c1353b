use super::entities::deserialize_emails;
use serde::Deserialize;
use ts_rs::TS;

// 专业创建请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/major.ts")]
pub struct CreateMajorRequest {
    pub name: String,
    pub slug: String,
    #[serde(default, deserialize_with = "deserialize_emails")]
    #[ts(optional)]
    pub emails: Option<Vec<String>>,
}

// 专业更新请求，未提供的字段保持原值
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/major.ts")]
pub struct UpdateMajorRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "deserialize_emails")]
    #[ts(optional)]
    pub emails: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emails_accept_list_or_string() {
        let from_list: CreateMajorRequest = serde_json::from_value(serde_json::json!({
            "name": "Informatics",
            "slug": "informatics",
            "emails": [" a@uni.edu", "b@uni.edu"]
        }))
        .unwrap();
        assert_eq!(
            from_list.emails,
            Some(vec!["a@uni.edu".to_string(), "b@uni.edu".to_string()])
        );

        let from_string: UpdateMajorRequest = serde_json::from_value(serde_json::json!({
            "emails": "a@uni.edu , b@uni.edu"
        }))
        .unwrap();
        assert_eq!(
            from_string.emails,
            Some(vec!["a@uni.edu".to_string(), "b@uni.edu".to_string()])
        );

        let missing: UpdateMajorRequest =
            serde_json::from_value(serde_json::json!({ "name": "Physics" })).unwrap();
        assert!(missing.emails.is_none());
    }
}
