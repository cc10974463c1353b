use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

// 专业实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/major.ts")]
pub struct Major {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub emails: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 将存储中的逗号分隔邮箱拆分为去空白的列表
pub fn split_emails(stored: Option<&str>) -> Vec<String> {
    stored
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|email| !email.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// 将邮箱列表合并为存储格式，空列表存为 NULL
pub fn join_emails(emails: &[String]) -> Option<String> {
    let cleaned: Vec<&str> = emails
        .iter()
        .map(|email| email.trim())
        .filter(|email| !email.is_empty())
        .collect();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.join(","))
    }
}

// 请求中的邮箱既可以是数组，也可以是逗号分隔的字符串
#[derive(Deserialize)]
#[serde(untagged)]
enum EmailsInput {
    List(Vec<String>),
    Joined(String),
}

pub(crate) fn deserialize_emails<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let input = Option::<EmailsInput>::deserialize(deserializer)?;
    Ok(input.map(|emails| match emails {
        EmailsInput::List(list) => list
            .into_iter()
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty())
            .collect(),
        EmailsInput::Joined(raw) => split_emails(Some(&raw)),
    }))
}
