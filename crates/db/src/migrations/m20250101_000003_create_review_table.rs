//! Create review table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Review::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Review::ProfessorId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Review::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Review::UserName).string_len(256).not_null())
                    .col(ColumnDef::new(Review::Course).string_len(256).not_null())
                    .col(
                        ColumnDef::new(Review::TeachingQuality)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Review::Clarity).small_integer().not_null())
                    .col(
                        ColumnDef::new(Review::Helpfulness)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Review::Fairness).small_integer().not_null())
                    .col(ColumnDef::new(Review::Workload).small_integer().not_null())
                    .col(ColumnDef::new(Review::AverageRating).double().not_null())
                    .col(ColumnDef::new(Review::Comment).text().not_null())
                    .col(
                        ColumnDef::new(Review::Upvotes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Review::Downvotes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Review::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_professor")
                            .from(Review::Table, Review::ProfessorId)
                            .to(Professor::Table, Professor::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_user")
                            .from(Review::Table, Review::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_id, professor_id) - one review per user per professor
        manager
            .create_index(
                Index::create()
                    .name("idx_review_user_professor")
                    .table(Review::Table)
                    .col(Review::UserId)
                    .col(Review::ProfessorId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: professor_id (for listing a professor's reviews)
        manager
            .create_index(
                Index::create()
                    .name("idx_review_professor_id")
                    .table(Review::Table)
                    .col(Review::ProfessorId)
                    .to_owned(),
            )
            .await?;

        // Index: created_at (for pagination)
        manager
            .create_index(
                Index::create()
                    .name("idx_review_created_at")
                    .table(Review::Table)
                    .col(Review::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Review::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Review {
    Table,
    Id,
    ProfessorId,
    UserId,
    UserName,
    Course,
    TeachingQuality,
    Clarity,
    Helpfulness,
    Fairness,
    Workload,
    AverageRating,
    Comment,
    Upvotes,
    Downvotes,
    CreatedAt,
}

#[derive(Iden)]
enum Professor {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
