//! Create professor table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Professor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Professor::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Professor::Name).string_len(256).not_null())
                    .col(
                        ColumnDef::new(Professor::Department)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Professor::Courses)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Professor::Email).string_len(320))
                    .col(
                        ColumnDef::new(Professor::AverageRating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Professor::ReviewCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Professor::CreatedBy).string_len(32))
                    .col(
                        ColumnDef::new(Professor::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Professor::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_professor_created_by")
                            .from(Professor::Table, Professor::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: department (for department listings)
        manager
            .create_index(
                Index::create()
                    .name("idx_professor_department")
                    .table(Professor::Table)
                    .col(Professor::Department)
                    .to_owned(),
            )
            .await?;

        // Index: name (for alphabetical listings)
        manager
            .create_index(
                Index::create()
                    .name("idx_professor_name")
                    .table(Professor::Table)
                    .col(Professor::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Professor::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Professor {
    Table,
    Id,
    Name,
    Department,
    Courses,
    Email,
    AverageRating,
    ReviewCount,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
