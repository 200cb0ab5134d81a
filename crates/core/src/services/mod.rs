//! Business logic services.

#![allow(missing_docs)]

pub mod admin;
pub mod favorite;
pub mod professor;
pub mod review;
pub mod user;
pub mod vote;

pub use admin::{AdminOverview, AdminService};
pub use favorite::FavoriteService;
pub use professor::{
    CreateProfessorInput, DepartmentSummary, ProfessorService, ProfessorSort, UpdateProfessorInput,
};
pub use review::ReviewService;
pub use user::{CreateUserInput, UserService};
pub use vote::VoteService;
