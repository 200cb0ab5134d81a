//! Create review vote table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReviewVote::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReviewVote::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ReviewVote::ReviewId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReviewVote::UserId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ReviewVote::Kind).string_len(8).not_null())
                    .col(
                        ColumnDef::new(ReviewVote::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_vote_review")
                            .from(ReviewVote::Table, ReviewVote::ReviewId)
                            .to(Review::Table, Review::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_vote_user")
                            .from(ReviewVote::Table, ReviewVote::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_id, review_id) - one vote per user per review
        manager
            .create_index(
                Index::create()
                    .name("idx_review_vote_user_review")
                    .table(ReviewVote::Table)
                    .col(ReviewVote::UserId)
                    .col(ReviewVote::ReviewId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: review_id (for counting votes on a review)
        manager
            .create_index(
                Index::create()
                    .name("idx_review_vote_review_id")
                    .table(ReviewVote::Table)
                    .col(ReviewVote::ReviewId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReviewVote::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ReviewVote {
    Table,
    Id,
    ReviewId,
    UserId,
    Kind,
    CreatedAt,
}

#[derive(Iden)]
enum Review {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
