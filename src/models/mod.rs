pub mod common;
pub mod evaluations;
pub mod majors;
pub mod users;

pub use common::ApiResponse;

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
