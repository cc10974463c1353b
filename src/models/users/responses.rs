use serde::Serialize;
use ts_rs::TS;

// 删除用户响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct DeletedUser {
    pub id: i64,
    pub email: String,
}
