//! 用户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub username: String,
    pub major_id: Option<i64>,
    pub is_admin: bool,
    pub password_hash: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::majors::Entity",
        from = "Column::MajorId",
        to = "super::majors::Column::Id"
    )]
    Major,
}

impl Related<super::majors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Major.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(
        self,
        major: Option<super::majors::Model>,
    ) -> crate::models::users::entities::User {
        use crate::models::users::entities::User;

        User {
            id: self.id,
            email: self.email,
            username: self.username,
            major_id: self.major_id,
            major_name: major.map(|m| m.name),
            is_admin: self.is_admin,
            password_hash: self.password_hash,
        }
    }
}
