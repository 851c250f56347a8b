use crate::{
    extractor::AuthorizedUser,
    model::{
        user::{
            CreateUserRequest, UpdateUserRequest, UpdateUserRequestWithUserId, UserResponse,
            UsersResponse,
        },
        ApiResponse,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::UserId, user::event::DeleteUser};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_user(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    req.validate(&())?;

    let user = registry.user_repository().create(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            user.into(),
            "New user has been created successfully",
        )),
    ))
}

pub async fn show_current_user(user: AuthorizedUser) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::ok(
        user.user.into(),
        "User profile has been retrieved",
    ))
}

// ユーザー一覧はオーナーのみ
pub async fn show_user_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<UsersResponse>>> {
    if !user.is_owner() {
        return Err(AppError::ForbiddenOperation);
    }

    let users = registry.user_repository().find_all().await?;

    Ok(Json(ApiResponse::ok(
        users.into(),
        "User list has been retrieved",
    )))
}

pub async fn update_current_user(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    req.validate(&())?;

    let update = UpdateUserRequestWithUserId::new(user.id(), req);
    registry.user_repository().update(update.into()).await?;

    let updated = registry
        .user_repository()
        .find_current_user(user.id())
        .await?
        .ok_or_else(|| AppError::EntityNotFound("specified user not found".into()))?;

    Ok(Json(ApiResponse::ok(
        updated.into(),
        "User has been updated",
    )))
}

pub async fn delete_user(
    user: AuthorizedUser,
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    if !user.is_owner() {
        return Err(AppError::ForbiddenOperation);
    }

    let deleted = registry
        .user_repository()
        .find_current_user(user_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("specified user not found".into()))?;

    registry
        .user_repository()
        .delete(DeleteUser::new(user_id))
        .await?;

    Ok(Json(ApiResponse::ok(
        deleted.into(),
        "User has been deleted",
    )))
}
