use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建专业表
        manager
            .create_table(
                Table::create()
                    .table(Majors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Majors::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Majors::Name).string().not_null())
                    .col(
                        ColumnDef::new(Majors::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    // 逗号分隔的通知邮箱
                    .col(ColumnDef::new(Majors::Emails).text().null())
                    .col(ColumnDef::new(Majors::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Majors::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::MajorId).big_integer().null())
                    .col(
                        ColumnDef::new(Users::IsAdmin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Users::Table, Users::MajorId)
                            .to(Majors::Table, Majors::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评估模板表
        manager
            .create_table(
                Table::create()
                    .table(Setups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Setups::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Setups::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建模板章节表
        manager
            .create_table(
                Table::create()
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sections::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sections::SetupId).big_integer().not_null())
                    .col(ColumnDef::new(Sections::Sequence).integer().not_null())
                    .col(ColumnDef::new(Sections::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Sections::Table, Sections::SetupId)
                            .to(Setups::Table, Setups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建题目表
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Questions::SectionId).big_integer().not_null())
                    .col(ColumnDef::new(Questions::Position).integer().not_null())
                    .col(ColumnDef::new(Questions::Text).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Questions::Table, Questions::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评估表
        manager
            .create_table(
                Table::create()
                    .table(Evaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Evaluations::Semester).string().not_null())
                    .col(ColumnDef::new(Evaluations::EndDate).date().not_null())
                    .col(ColumnDef::new(Evaluations::MajorId).big_integer().not_null())
                    .col(ColumnDef::new(Evaluations::SetupId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Evaluations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::MajorId)
                            .to(Majors::Table, Majors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::SetupId)
                            .to(Setups::Table, Setups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评估答案表
        manager
            .create_table(
                Table::create()
                    .table(Answers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Answers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Answers::EvaluationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Answers::QuestionId).big_integer().not_null())
                    .col(ColumnDef::new(Answers::Answer).text().null())
                    .col(ColumnDef::new(Answers::Score).double().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Answers::Table, Answers::EvaluationId)
                            .to(Evaluations::Table, Evaluations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Answers::Table, Answers::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 用户表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_major_id")
                    .table(Users::Table)
                    .col(Users::MajorId)
                    .to_owned(),
            )
            .await?;

        // 章节与题目排序索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sections_setup_sequence")
                    .table(Sections::Table)
                    .col(Sections::SetupId)
                    .col(Sections::Sequence)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_questions_section_position")
                    .table(Questions::Table)
                    .col(Questions::SectionId)
                    .col(Questions::Position)
                    .to_owned(),
            )
            .await?;

        // 评估查重索引（不加唯一约束，查重由接口完成）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluations_lookup")
                    .table(Evaluations::Table)
                    .col(Evaluations::SetupId)
                    .col(Evaluations::MajorId)
                    .col(Evaluations::Semester)
                    .col(Evaluations::EndDate)
                    .to_owned(),
            )
            .await?;

        // 每个评估的每道题只有一个答案
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_answers_evaluation_question")
                    .table(Answers::Table)
                    .col(Answers::EvaluationId)
                    .col(Answers::QuestionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Answers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Evaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Setups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Majors::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Majors {
    #[sea_orm(iden = "majors")]
    Table,
    Id,
    Name,
    Slug,
    Emails,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Email,
    Username,
    MajorId,
    IsAdmin,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Setups {
    #[sea_orm(iden = "setups")]
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Sections {
    #[sea_orm(iden = "sections")]
    Table,
    Id,
    SetupId,
    Sequence,
    Name,
}

#[derive(DeriveIden)]
enum Questions {
    #[sea_orm(iden = "questions")]
    Table,
    Id,
    SectionId,
    Position,
    Text,
}

#[derive(DeriveIden)]
enum Evaluations {
    #[sea_orm(iden = "evaluations")]
    Table,
    Id,
    Semester,
    EndDate,
    MajorId,
    SetupId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Answers {
    #[sea_orm(iden = "answers")]
    Table,
    Id,
    EvaluationId,
    QuestionId,
    Answer,
    Score,
}
