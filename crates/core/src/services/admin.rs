//! Administration service.

use profrate_common::AppResult;
use profrate_db::{
    entities::review,
    repositories::{ProfessorRepository, ReviewRepository, ReviewVoteRepository, UserRepository},
};
use serde::Serialize;

/// Number of recent reviews shown on the admin dashboard.
const RECENT_REVIEWS: u64 = 20;

/// Counts and recent activity for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub professor_count: u64,
    pub review_count: u64,
    pub user_count: u64,
    pub vote_count: u64,
    pub recent_reviews: Vec<review::Model>,
}

/// Administration service aggregating moderation data.
#[derive(Clone)]
pub struct AdminService {
    professor_repo: ProfessorRepository,
    review_repo: ReviewRepository,
    user_repo: UserRepository,
    vote_repo: ReviewVoteRepository,
}

impl AdminService {
    /// Create a new admin service.
    #[must_use]
    pub const fn new(
        professor_repo: ProfessorRepository,
        review_repo: ReviewRepository,
        user_repo: UserRepository,
        vote_repo: ReviewVoteRepository,
    ) -> Self {
        Self {
            professor_repo,
            review_repo,
            user_repo,
            vote_repo,
        }
    }

    /// Collect dashboard counts and the most recent reviews.
    pub async fn overview(&self) -> AppResult<AdminOverview> {
        let professor_count = self.professor_repo.count().await?;
        let review_count = self.review_repo.count().await?;
        let user_count = self.user_repo.count().await?;
        let vote_count = self.vote_repo.count().await?;
        let recent_reviews = self.review_repo.find_recent(RECENT_REVIEWS).await?;

        Ok(AdminOverview {
            professor_count,
            review_count,
            user_count,
            vote_count,
            recent_reviews,
        })
    }
}
