use crate::model::{
    id::{KosId, ReviewId},
    review::{
        event::{CreateReview, DeleteReview, ReplyReview},
        Review,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    // 同じユーザーは同じコスに 1 件しかレビューできない
    async fn create(&self, event: CreateReview) -> AppResult<ReviewId>;
    async fn find_by_id(&self, review_id: ReviewId) -> AppResult<Option<Review>>;
    async fn find_by_kos_id(&self, kos_id: KosId) -> AppResult<Vec<Review>>;
    async fn reply(&self, event: ReplyReview) -> AppResult<()>;
    async fn delete(&self, event: DeleteReview) -> AppResult<()>;
}
