use crate::{
    extractor::AuthorizedUser,
    model::{
        review::{CreateReviewRequest, ReplyReviewRequest, ReviewResponse, ReviewsResponse},
        ApiResponse,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    id::{KosId, ReviewId},
    review::event::{CreateReview, DeleteReview, ReplyReview},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

// レビュー一覧はログインなしで見られる
pub async fn show_reviews_by_kos(
    Path(kos_id): Path<KosId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<ReviewsResponse>>> {
    let reviews = registry.review_repository().find_by_kos_id(kos_id).await?;

    Ok(Json(ApiResponse::ok(
        reviews.into(),
        "Reviews has been retrieved",
    )))
}

pub async fn create_review(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ReviewResponse>>)> {
    // レビューを書けるのは入居者ロールだけ
    if !user.is_society() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    let review_id = registry
        .review_repository()
        .create(CreateReview::new(
            req.kos_id,
            req.content,
            req.rating,
            user.id(),
        ))
        .await?;

    let review = registry
        .review_repository()
        .find_by_id(review_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Review not found".into()))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            review.into(),
            "Review created successfully",
        )),
    ))
}

pub async fn reply_review(
    user: AuthorizedUser,
    Path(review_id): Path<ReviewId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<ReplyReviewRequest>,
) -> AppResult<Json<ApiResponse<ReviewResponse>>> {
    req.validate(&())?;

    registry
        .review_repository()
        .reply(ReplyReview::new(
            review_id,
            req.reply_content,
            user.access(),
        ))
        .await?;

    let review = registry
        .review_repository()
        .find_by_id(review_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Review not found".into()))?;

    Ok(Json(ApiResponse::ok(
        review.into(),
        "Reply added successfully",
    )))
}

pub async fn delete_review(
    user: AuthorizedUser,
    Path(review_id): Path<ReviewId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<ReviewResponse>>> {
    let deleted = registry
        .review_repository()
        .find_by_id(review_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Review not found".into()))?;

    registry
        .review_repository()
        .delete(DeleteReview::new(review_id, user.access()))
        .await?;

    Ok(Json(ApiResponse::ok(
        deleted.into(),
        "Review deleted successfully",
    )))
}
