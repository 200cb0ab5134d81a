//! Core business logic for profrate.

pub mod rating;
pub mod services;

pub use rating::{
    RatingSummary, ReviewScores, ReviewSubmission, SanitizedReview, VoteKind, aggregate_remaining,
    aggregate_with, apply_vote, can_submit_review, can_vote,
};
pub use services::*;
