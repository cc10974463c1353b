use serde::Deserialize;
use ts_rs::TS;

// 用户更新请求，未提供的字段保持原值
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub major_id: Option<i64>,
    pub is_admin: Option<bool>,
    pub password: Option<String>,
}
