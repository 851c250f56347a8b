use crate::{
    extractor::AuthorizedUser,
    model::{
        facility::{
            CreateKosFacilityRequest, CreateKosFacilityRequestWithAccess,
            CreateRoomFacilityRequest, CreateRoomFacilityRequestWithAccess, FacilitiesResponse,
            FacilityResponse, UpdateFacilityRequest, UpdateFacilityRequestWithIds,
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
use kernel::model::{
    facility::event::DeleteFacility,
    id::{FacilityId, KosId, RoomId},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn show_kos_facilities(
    Path(kos_id): Path<KosId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<FacilitiesResponse>>> {
    let facilities = registry.facility_repository().find_by_kos_id(kos_id).await?;

    Ok(Json(ApiResponse::ok(
        facilities.into(),
        "Kos facilities has been retrieved",
    )))
}

pub async fn show_room_facilities(
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<FacilitiesResponse>>> {
    let facilities = registry
        .facility_repository()
        .find_by_room_id(room_id)
        .await?;

    Ok(Json(ApiResponse::ok(
        facilities.into(),
        "Room facilities has been retrieved",
    )))
}

pub async fn register_kos_facility(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateKosFacilityRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<FacilityResponse>>)> {
    req.validate(&())?;

    let create = CreateKosFacilityRequestWithAccess::new(user.access(), req);
    let facility_id = registry
        .facility_repository()
        .create_for_kos(create.into())
        .await?;

    let facility = registry
        .facility_repository()
        .find_by_id(facility_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Facility not found".into()))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            facility.into(),
            "Kos facility created successfully",
        )),
    ))
}

pub async fn register_room_facility(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateRoomFacilityRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<FacilityResponse>>)> {
    req.validate(&())?;

    let create = CreateRoomFacilityRequestWithAccess::new(user.access(), req);
    let facility_id = registry
        .facility_repository()
        .create_for_room(create.into())
        .await?;

    let facility = registry
        .facility_repository()
        .find_by_id(facility_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Facility not found".into()))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            facility.into(),
            "Room facility created successfully",
        )),
    ))
}

pub async fn update_facility(
    user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateFacilityRequest>,
) -> AppResult<Json<ApiResponse<FacilityResponse>>> {
    req.validate(&())?;

    let update = UpdateFacilityRequestWithIds::new(facility_id, user.access(), req);
    registry.facility_repository().update(update.into()).await?;

    let facility = registry
        .facility_repository()
        .find_by_id(facility_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Facility not found".into()))?;

    Ok(Json(ApiResponse::ok(
        facility.into(),
        "Facility has been updated",
    )))
}

pub async fn delete_facility(
    user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<FacilityResponse>>> {
    let deleted = registry
        .facility_repository()
        .find_by_id(facility_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Facility not found".into()))?;

    registry
        .facility_repository()
        .delete(DeleteFacility::new(facility_id, user.access()))
        .await?;

    Ok(Json(ApiResponse::ok(
        deleted.into(),
        "Facility has been deleted",
    )))
}
