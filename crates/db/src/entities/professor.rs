//! Professor entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "professor")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    #[sea_orm(indexed)]
    pub department: String,

    /// Ordered list of course labels
    #[sea_orm(column_type = "JsonBinary")]
    pub courses: Json,

    /// Contact email
    #[sea_orm(nullable)]
    pub email: Option<String>,

    /// Mean of `average_rating` over all reviews of this professor (denormalized)
    #[sea_orm(default_value = 0.0)]
    pub average_rating: f64,

    /// Number of reviews of this professor (denormalized)
    #[sea_orm(default_value = 0)]
    pub review_count: i32,

    /// User who created this profile
    #[sea_orm(nullable)]
    pub created_by: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,

    #[sea_orm(has_many = "super::favorite::Entity")]
    Favorites,
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl Model {
    /// Course labels as strings, in stored order.
    #[must_use]
    pub fn course_list(&self) -> Vec<String> {
        self.courses
            .as_array()
            .map(|courses| {
                courses
                    .iter()
                    .filter_map(|c| c.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl ActiveModelBehavior for ActiveModel {}
