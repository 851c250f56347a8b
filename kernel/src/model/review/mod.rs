use crate::model::{
    id::{KosId, ReviewId, UserId},
    user::ReviewAuthor,
};
use chrono::{DateTime, Utc};

pub mod event;

#[derive(Debug)]
pub struct Review {
    pub review_id: ReviewId,
    pub content: String,
    // 1〜5 の整数
    pub rating: i32,
    pub reply: Option<ReviewReply>,
    pub author: ReviewAuthor,
    pub kos_id: KosId,
    pub kos_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct ReviewReply {
    pub content: String,
    pub replied_at: DateTime<Utc>,
    pub replied_by: UserId,
}
