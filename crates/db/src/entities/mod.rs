//! Database entities.

pub mod favorite;
pub mod professor;
pub mod review;
pub mod review_vote;
pub mod user;

pub use favorite::Entity as Favorite;
pub use professor::Entity as Professor;
pub use review::Entity as Review;
pub use review_vote::Entity as ReviewVote;
pub use user::Entity as User;
