use kernel::model::{
    id::{KosId, ReviewId, UserId},
    review::{Review, ReviewReply},
    user::ReviewAuthor,
};
use sqlx::types::chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct ReviewRow {
    pub review_id: ReviewId,
    pub content: String,
    pub rating: i32,
    pub reply_content: Option<String>,
    pub reply_at: Option<DateTime<Utc>>,
    pub replied_by: Option<UserId>,
    pub user_id: UserId,
    pub user_name: String,
    pub profile_picture: String,
    pub kos_id: KosId,
    pub kos_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(value: ReviewRow) -> Self {
        let ReviewRow {
            review_id,
            content,
            rating,
            reply_content,
            reply_at,
            replied_by,
            user_id,
            user_name,
            profile_picture,
            kos_id,
            kos_name,
            created_at,
        } = value;
        // 返信は 3 列すべて揃っているときのみ存在するとみなす
        let reply = match (reply_content, reply_at, replied_by) {
            (Some(content), Some(replied_at), Some(replied_by)) => Some(ReviewReply {
                content,
                replied_at,
                replied_by,
            }),
            _ => None,
        };
        Review {
            review_id,
            content,
            rating,
            reply,
            author: ReviewAuthor {
                user_id,
                name: user_name,
                profile_picture,
            },
            kos_id,
            kos_name,
            created_at,
        }
    }
}
