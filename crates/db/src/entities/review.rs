//! Review entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The professor this review belongs to
    #[sea_orm(indexed)]
    pub professor_id: String,

    /// The authoring user
    #[sea_orm(indexed)]
    pub user_id: String,

    /// Author display name (denormalized)
    pub user_name: String,

    /// Course the reviewer took with this professor
    pub course: String,

    /// Category scores, each 1-5
    pub teaching_quality: i16,
    pub clarity: i16,
    pub helpfulness: i16,
    pub fairness: i16,
    pub workload: i16,

    /// Mean of the five category scores, stored unrounded
    pub average_rating: f64,

    /// Free-text comment (may be empty)
    #[sea_orm(column_type = "Text")]
    pub comment: String,

    /// Vote counters (denormalized)
    #[sea_orm(default_value = 0)]
    pub upvotes: i32,

    #[sea_orm(default_value = 0)]
    pub downvotes: i32,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::professor::Entity",
        from = "Column::ProfessorId",
        to = "super::professor::Column::Id",
        on_delete = "Cascade"
    )]
    Professor,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,

    #[sea_orm(has_many = "super::review_vote::Entity")]
    Votes,
}

impl Related<super::professor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professor.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::review_vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Votes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
