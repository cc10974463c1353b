use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评估概览（附带模板与专业名称）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationOverview {
    pub id: i64,
    pub semester: String,
    pub end_date: NaiveDate,
    pub major_id: i64,
    pub major_name: Option<String>,
    pub setup_id: i64,
    pub setup_name: Option<String>,
}

// 某专业下的评估
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct MajorEvaluation {
    pub evaluation_id: i64,
    pub setup_name: Option<String>,
    pub major_id: i64,
    pub major_name: String,
    pub emails: Vec<String>,
    pub semester: String,
    pub end_date: NaiveDate,
}

// 评估报告：题目按章节顺序、章节内按题号排列
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationReport {
    pub id: i64,
    pub semester: String,
    pub end_date: NaiveDate,
    pub major_id: i64,
    pub major_name: Option<String>,
    pub setup_id: i64,
    pub setup_name: Option<String>,
    pub sections: Vec<ReportSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct ReportSection {
    pub sequence: i32,
    pub name: String,
    pub questions: Vec<ReportQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct ReportQuestion {
    pub question_id: i64,
    pub position: i32,
    pub text: String,
    pub answer: Option<String>,
    pub score: Option<f64>,
}
