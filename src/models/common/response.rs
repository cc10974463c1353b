use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 响应状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub enum ResponseStatus {
    Success,
    Error,
}

// 响应元信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ResponseMeta {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub details: Option<String>,
}

// 统一的API响应结构，data 始终序列化（缺省为 null）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub response: ResponseMeta,
    pub data: Option<T>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            response: ResponseMeta {
                status: ResponseStatus::Success,
                message: message.into(),
                details: None,
            },
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            response: ResponseMeta {
                status: ResponseStatus::Success,
                message: message.into(),
                details: None,
            },
            data: None,
        }
    }

    pub fn error_empty(message: impl Into<String>) -> Self {
        Self {
            response: ResponseMeta {
                status: ResponseStatus::Error,
                message: message.into(),
                details: None,
            },
            data: None,
        }
    }

    /// 500 响应，底层错误信息放入 details
    pub fn internal_error(details: impl std::fmt::Display) -> Self {
        Self {
            response: ResponseMeta {
                status: ResponseStatus::Error,
                message: "Internal server error".to_string(),
                details: Some(details.to_string()),
            },
            data: None,
        }
    }
}
