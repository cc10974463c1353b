//! 评估实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub semester: String,
    pub end_date: Date,
    pub major_id: i64,
    pub setup_id: i64,
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
    #[sea_orm(
        belongs_to = "super::setups::Entity",
        from = "Column::SetupId",
        to = "super::setups::Column::Id"
    )]
    Setup,
    #[sea_orm(has_many = "super::answers::Entity")]
    Answers,
}

impl Related<super::majors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Major.def()
    }
}

impl Related<super::setups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Setup.def()
    }
}

impl Related<super::answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_evaluation(self) -> crate::models::evaluations::entities::Evaluation {
        use crate::models::evaluations::entities::Evaluation;
        use chrono::{DateTime, Utc};

        Evaluation {
            id: self.id,
            semester: self.semester,
            end_date: self.end_date,
            major_id: self.major_id,
            setup_id: self.setup_id,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
