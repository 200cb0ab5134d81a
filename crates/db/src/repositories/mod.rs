//! Database repositories.

mod favorite;
mod professor;
mod review;
mod review_vote;
mod user;

pub use favorite::FavoriteRepository;
pub use professor::ProfessorRepository;
pub use review::ReviewRepository;
pub use review_vote::ReviewVoteRepository;
pub use user::UserRepository;
