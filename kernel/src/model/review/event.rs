use crate::model::{
    access::AccessControl,
    id::{KosId, ReviewId, UserId},
};
use derive_new::new;

#[derive(new)]
pub struct CreateReview {
    pub kos_id: KosId,
    pub content: String,
    pub rating: i32,
    pub created_by: UserId,
}

#[derive(new)]
pub struct ReplyReview {
    pub review_id: ReviewId,
    pub reply_content: String,
    pub access: AccessControl,
}

#[derive(new)]
pub struct DeleteReview {
    pub review_id: ReviewId,
    pub access: AccessControl,
}
