use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{KosId, ReviewId, UserId},
    review::Review,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[serde(rename = "kosId")]
    #[garde(skip)]
    pub kos_id: KosId,
    #[garde(length(min = 1))]
    pub content: String,
    // 評価は 1〜5 の整数
    #[garde(range(min = 1, max = 5))]
    pub rating: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReplyReviewRequest {
    #[garde(length(min = 1))]
    pub reply_content: String,
}

#[derive(Serialize)]
pub struct ReviewsResponse {
    pub items: Vec<ReviewResponse>,
}

impl From<Vec<Review>> for ReviewsResponse {
    fn from(value: Vec<Review>) -> Self {
        Self {
            items: value.into_iter().map(ReviewResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct ReviewResponse {
    pub id: ReviewId,
    pub content: String,
    pub rating: i32,
    pub reply_content: Option<String>,
    pub reply_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub user: ReviewAuthorResponse,
    pub kos: ReviewKosResponse,
}

impl From<Review> for ReviewResponse {
    fn from(value: Review) -> Self {
        let Review {
            review_id,
            content,
            rating,
            reply,
            author,
            kos_id,
            kos_name,
            created_at,
        } = value;
        let (reply_content, reply_at) = match reply {
            Some(reply) => (Some(reply.content), Some(reply.replied_at)),
            None => (None, None),
        };
        Self {
            id: review_id,
            content,
            rating,
            reply_content,
            reply_at,
            created_at,
            user: ReviewAuthorResponse {
                id: author.user_id,
                name: author.name,
                profile_picture: author.profile_picture,
            },
            kos: ReviewKosResponse {
                id: kos_id,
                name: kos_name,
            },
        }
    }
}

#[derive(Serialize)]
pub struct ReviewAuthorResponse {
    pub id: UserId,
    pub name: String,
    pub profile_picture: String,
}

#[derive(Serialize)]
pub struct ReviewKosResponse {
    pub id: KosId,
    pub name: String,
}
