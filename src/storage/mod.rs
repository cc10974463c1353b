use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::DatabaseConfig;
use crate::models::{
    evaluations::{
        entities::Evaluation,
        requests::{CreateEvaluationRequest, UpdateEvaluationRequest},
        responses::{EvaluationOverview, EvaluationReport, MajorEvaluation},
    },
    majors::{
        entities::Major,
        requests::{CreateMajorRequest, UpdateMajorRequest},
    },
    users::{entities::User, requests::UpdateUserRequest, responses::DeletedUser},
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 数据访问接口
///
/// 查询与更新统一返回 `Result<Option<T>>`：`Ok(Some)` 找到，`Ok(None)` 不存在，`Err` 为失败。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 专业管理方法
    // 列出全部专业
    async fn list_majors(&self) -> Result<Vec<Major>>;
    // 通过ID获取专业
    async fn get_major_by_id(&self, id: i64) -> Result<Option<Major>>;
    // 通过 slug 获取专业
    async fn get_major_by_slug(&self, slug: &str) -> Result<Option<Major>>;
    // 创建专业
    async fn create_major(&self, major: CreateMajorRequest) -> Result<Major>;
    // 更新专业
    async fn update_major(&self, id: i64, update: UpdateMajorRequest) -> Result<Option<Major>>;
    // 删除专业
    async fn delete_major(&self, id: i64) -> Result<bool>;

    /// 用户管理方法
    // 列出全部用户（附带专业名称）
    async fn list_users(&self) -> Result<Vec<User>>;
    // 通过ID获取用户
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 列出某专业下的用户
    async fn list_users_by_major(&self, major_id: i64) -> Result<Vec<User>>;
    // 更新用户
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户，返回被删除用户的 id 与邮箱
    async fn delete_user(&self, id: i64) -> Result<Option<DeletedUser>>;

    /// 评估管理方法
    // 列出全部评估
    async fn list_evaluations(&self) -> Result<Vec<Evaluation>>;
    // 通过ID获取评估
    async fn get_evaluation_by_id(&self, id: i64) -> Result<Option<Evaluation>>;
    // 创建评估
    async fn create_evaluation(&self, evaluation: CreateEvaluationRequest) -> Result<Evaluation>;
    // 更新评估
    async fn update_evaluation(
        &self,
        id: i64,
        update: UpdateEvaluationRequest,
    ) -> Result<Option<Evaluation>>;
    // 删除评估
    async fn delete_evaluation(&self, id: i64) -> Result<bool>;
    // 查重：同模板、同学期、同截止日期且专业在列表中
    async fn evaluation_exists(
        &self,
        setup_id: i64,
        major_ids: &[i64],
        semester: &str,
        end_date: NaiveDate,
    ) -> Result<bool>;
    // 列出评估概览（附带模板与专业名称）
    async fn list_evaluation_overviews(&self) -> Result<Vec<EvaluationOverview>>;
    // 列出某专业的评估
    async fn list_evaluations_by_major(&self, major_id: i64) -> Result<Vec<MajorEvaluation>>;
    // 组装评估报告
    async fn get_evaluation_report(&self, id: i64) -> Result<Option<EvaluationReport>>;

    // 关闭连接池
    async fn close(&self) -> Result<()>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
