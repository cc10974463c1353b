//! 模板章节实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub setup_id: i64,
    pub sequence: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::setups::Entity",
        from = "Column::SetupId",
        to = "super::setups::Column::Id"
    )]
    Setup,
    #[sea_orm(has_many = "super::questions::Entity")]
    Questions,
}

impl Related<super::setups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Setup.def()
    }
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Questions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
