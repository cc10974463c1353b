use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, de};
use ts_rs::TS;

use super::entities::AnswerInput;

/// 解析 `YYYY-MM-DD`，或以该日期开头的时间戳（时间部分忽略）
fn parse_date_prefix(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date = value.get(..10)?;
    let rest = &value[10..];
    if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date_prefix(&raw)
        .ok_or_else(|| de::Error::custom(format!("invalid date `{raw}`, expected YYYY-MM-DD")))
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_date_prefix(&raw).map(Some).ok_or_else(|| {
            de::Error::custom(format!("invalid date `{raw}`, expected YYYY-MM-DD"))
        }),
        None => Ok(None),
    }
}

// 评估创建请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct CreateEvaluationRequest {
    pub semester: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub end_date: NaiveDate,
    pub major_id: i64,
    pub setup_id: i64,
    #[serde(default)]
    #[ts(optional)]
    pub answers: Option<Vec<AnswerInput>>,
}

// 评估更新请求，未提供的字段保持原值；提供 answers 时整体替换
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct UpdateEvaluationRequest {
    pub semester: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub end_date: Option<NaiveDate>,
    pub major_id: Option<i64>,
    pub setup_id: Option<i64>,
    #[serde(default)]
    #[ts(optional)]
    pub answers: Option<Vec<AnswerInput>>,
}

// 评估查重请求
//
// majorIds 保留原始 JSON，由接口自行校验并返回统一的 400 信息
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct CheckEvaluationRequest {
    pub setup_id: i64,
    #[serde(default)]
    #[ts(type = "number[]")]
    pub major_ids: serde_json::Value,
    pub semester: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub end_date: NaiveDate,
}

impl CheckEvaluationRequest {
    /// 仅当 majorIds 为非空整数数组时返回
    pub fn major_ids(&self) -> Option<Vec<i64>> {
        let items = self.major_ids.as_array()?;
        if items.is_empty() {
            return None;
        }
        items.iter().map(serde_json::Value::as_i64).collect()
    }
}

// 按专业查询评估的参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationMajorQuery {
    pub major_id: Option<i64>,
}
