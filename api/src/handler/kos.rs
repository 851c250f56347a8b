use crate::{
    extractor::AuthorizedUser,
    model::{
        kos::{
            CreateKosRequest, CreateKosRequestWithOwner, KosListQuery, KosListResponse,
            KosResponse, UpdateKosRequest, UpdateKosRequestWithIds,
        },
        ApiResponse,
    },
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use garde::Validate;
use kernel::model::{id::KosId, kos::event::DeleteKos};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn show_kos_list(
    _user: AuthorizedUser,
    Query(query): Query<KosListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<KosListResponse>>> {
    let kos_list = registry.kos_repository().find_all(query.into()).await?;

    Ok(Json(ApiResponse::ok(
        kos_list.into(),
        "Kos list has been retrieved",
    )))
}

pub async fn show_kos(
    _user: AuthorizedUser,
    Path(kos_id): Path<KosId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<KosResponse>>> {
    registry
        .kos_repository()
        .find_by_id(kos_id)
        .await
        .and_then(|kos| match kos {
            Some(kos) => Ok(Json(ApiResponse::ok(
                kos.into(),
                "Kos details has been retrieved",
            ))),
            None => Err(AppError::EntityNotFound("Kos not found".into())),
        })
}

pub async fn register_kos(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateKosRequest>,
) -> AppResult<Json<ApiResponse<KosResponse>>> {
    // コスを作れるのはオーナーロールだけ
    if !user.is_owner() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    let create = CreateKosRequestWithOwner::new(user.id(), req);
    let kos_id = registry.kos_repository().create(create.into()).await?;

    let kos = registry
        .kos_repository()
        .find_by_id(kos_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Kos not found".into()))?;

    Ok(Json(ApiResponse::ok(
        kos.into(),
        "New kos has been created",
    )))
}

pub async fn update_kos(
    user: AuthorizedUser,
    Path(kos_id): Path<KosId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateKosRequest>,
) -> AppResult<Json<ApiResponse<KosResponse>>> {
    req.validate(&())?;

    let update = UpdateKosRequestWithIds::new(kos_id, user.access(), req);
    registry.kos_repository().update(update.into()).await?;

    let kos = registry
        .kos_repository()
        .find_by_id(kos_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Kos not found".into()))?;

    Ok(Json(ApiResponse::ok(kos.into(), "Kos has been updated")))
}

pub async fn delete_kos(
    user: AuthorizedUser,
    Path(kos_id): Path<KosId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<KosResponse>>> {
    let deleted = registry
        .kos_repository()
        .find_by_id(kos_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Kos not found".into()))?;

    registry
        .kos_repository()
        .delete(DeleteKos::new(kos_id, user.access()))
        .await?;

    Ok(Json(ApiResponse::ok(
        deleted.into(),
        "Kos has been deleted",
    )))
}
