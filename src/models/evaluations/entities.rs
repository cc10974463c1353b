use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评估实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct Evaluation {
    pub id: i64,
    pub semester: String,
    pub end_date: NaiveDate,
    pub major_id: i64,
    pub setup_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 单题答案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct AnswerInput {
    pub question_id: i64,
    pub answer: Option<String>,
    pub score: Option<f64>,
}
