use super::SeaOrmStorage;
use crate::entity::majors::Entity as Majors;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{EvalSystemError, Result};
use crate::models::users::{
    entities::User, requests::UpdateUserRequest, responses::DeletedUser,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 列出全部用户（附带专业名称）
    pub async fn list_users_impl(&self) -> Result<Vec<User>> {
        let users = Users::find()
            .find_also_related(Majors)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(users
            .into_iter()
            .map(|(user, major)| user.into_user(major))
            .collect())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .find_also_related(Majors)
            .one(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|(user, major)| user.into_user(major)))
    }

    /// 列出某专业下的用户
    pub async fn list_users_by_major_impl(&self, major_id: i64) -> Result<Vec<User>> {
        let users = Users::find()
            .filter(Column::MajorId.eq(major_id))
            .find_also_related(Majors)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询专业用户失败: {e}")))?;

        Ok(users
            .into_iter()
            .map(|(user, major)| user.into_user(major))
            .collect())
    }

    /// 更新用户信息，未提供的字段保持原值
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        // 先检查用户是否存在
        let existing = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询用户失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(email) = update.email {
            model.email = Set(email);
        }

        if let Some(username) = update.username {
            model.username = Set(username);
        }

        if let Some(major_id) = update.major_id {
            model.major_id = Set(Some(major_id));
        }

        if let Some(is_admin) = update.is_admin {
            model.is_admin = Set(is_admin);
        }

        // 调用方已完成哈希
        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("更新用户失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    /// 删除用户
    pub async fn delete_user_impl(&self, id: i64) -> Result<Option<DeletedUser>> {
        let existing = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询用户失败: {e}")))?;

        let Some(user) = existing else {
            return Ok(None);
        };

        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("删除用户失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        Ok(Some(DeletedUser {
            id: user.id,
            email: user.email,
        }))
    }
}
