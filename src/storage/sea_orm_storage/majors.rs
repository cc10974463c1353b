//! 专业存储操作

use super::SeaOrmStorage;
use crate::entity::majors::{ActiveModel, Column, Entity as Majors};
use crate::errors::{EvalSystemError, Result};
use crate::models::majors::{
    entities::{Major, join_emails},
    requests::{CreateMajorRequest, UpdateMajorRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 列出全部专业
    pub async fn list_majors_impl(&self) -> Result<Vec<Major>> {
        let majors = Majors::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询专业列表失败: {e}")))?;

        Ok(majors.into_iter().map(|m| m.into_major()).collect())
    }

    /// 通过 ID 获取专业
    pub async fn get_major_by_id_impl(&self, id: i64) -> Result<Option<Major>> {
        let result = Majors::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询专业失败: {e}")))?;

        Ok(result.map(|m| m.into_major()))
    }

    /// 通过 slug 获取专业
    pub async fn get_major_by_slug_impl(&self, slug: &str) -> Result<Option<Major>> {
        let result = Majors::find()
            .filter(Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询专业失败: {e}")))?;

        Ok(result.map(|m| m.into_major()))
    }

    /// 创建专业
    pub async fn create_major_impl(&self, req: CreateMajorRequest) -> Result<Major> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            slug: Set(req.slug),
            emails: Set(req.emails.as_deref().and_then(join_emails)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("创建专业失败: {e}")))?;

        Ok(result.into_major())
    }

    /// 更新专业，未提供的字段保持原值
    pub async fn update_major_impl(
        &self,
        id: i64,
        update: UpdateMajorRequest,
    ) -> Result<Option<Major>> {
        // 先检查专业是否存在
        let existing = self.get_major_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(slug) = update.slug {
            model.slug = Set(slug);
        }

        if let Some(emails) = update.emails {
            model.emails = Set(join_emails(&emails));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("更新专业失败: {e}")))?;

        self.get_major_by_id_impl(id).await
    }

    /// 删除专业
    pub async fn delete_major_impl(&self, id: i64) -> Result<bool> {
        let result = Majors::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("删除专业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
