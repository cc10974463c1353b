use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub major_id: Option<i64>,
    pub major_name: Option<String>,
    pub is_admin: bool,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: 1,
            email: "alice@uni.edu".to_string(),
            username: "alice".to_string(),
            major_id: Some(2),
            major_name: Some("Informatics".to_string()),
            is_admin: false,
            password_hash: "$argon2id$secret".to_string(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["major_name"], "Informatics");
    }
}
