use crate::{
    extractor::AuthorizedUser,
    model::{
        kos::KosCountersResponse,
        room::{
            AvailabilityQuery, AvailabilityResponse, CreateRoomRequest,
            CreateRoomRequestWithAccess, CreatedRoomResponse, DeletedRoomResponse, RoomListQuery,
            RoomResponse, RoomsResponse, UpdateRoomRequest, UpdateRoomRequestWithIds,
        },
        ApiResponse,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    booking::StayPeriod,
    id::{KosId, RoomId},
    room::event::DeleteRoom,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn show_rooms_by_kos(
    _user: AuthorizedUser,
    Path(kos_id): Path<KosId>,
    Query(query): Query<RoomListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<RoomsResponse>>> {
    let rooms = registry
        .room_repository()
        .find_by_kos_id(kos_id, query.status.map(Into::into))
        .await?;

    Ok(Json(ApiResponse::ok(
        rooms.into(),
        "Rooms has been retrieved",
    )))
}

pub async fn show_room(
    _user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<RoomResponse>>> {
    registry
        .room_repository()
        .find_by_id(room_id)
        .await
        .and_then(|room| match room {
            Some(room) => Ok(Json(ApiResponse::ok(
                room.into(),
                "Room details has been retrieved",
            ))),
            None => Err(AppError::EntityNotFound("Room not found".into())),
        })
}

// 読み取り専用の空室確認
pub async fn check_room_availability(
    _user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    Query(query): Query<AvailabilityQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<AvailabilityResponse>>> {
    let period = StayPeriod::new(query.start_date, query.end_date)?;
    let available = registry
        .booking_repository()
        .is_available(room_id, &period)
        .await?;

    Ok(Json(ApiResponse::ok(
        AvailabilityResponse { available },
        "Room availability has been checked",
    )))
}

pub async fn register_room(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateRoomRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreatedRoomResponse>>)> {
    req.validate(&())?;

    let create = CreateRoomRequestWithAccess::new(user.access(), req);
    let (room_id, counters) = registry.room_repository().create(create.into()).await?;

    let room = registry
        .room_repository()
        .find_by_id(room_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Room not found".into()))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            CreatedRoomResponse {
                room: room.into(),
                kos_updated: KosCountersResponse::from(counters),
            },
            "New room has been created and kos room count updated",
        )),
    ))
}

pub async fn update_room(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateRoomRequest>,
) -> AppResult<Json<ApiResponse<RoomResponse>>> {
    req.validate(&())?;

    let update = UpdateRoomRequestWithIds::new(room_id, user.access(), req);
    registry.room_repository().update(update.into()).await?;

    let room = registry
        .room_repository()
        .find_by_id(room_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Room not found".into()))?;

    Ok(Json(ApiResponse::ok(room.into(), "Room has been updated")))
}

pub async fn delete_room(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<DeletedRoomResponse>>> {
    let room = registry
        .room_repository()
        .find_by_id(room_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Room not found".into()))?;

    let counters = registry
        .room_repository()
        .delete(DeleteRoom::new(room_id, user.access()))
        .await?;

    Ok(Json(ApiResponse::ok(
        DeletedRoomResponse {
            deleted_room: room.into(),
            kos_updated: KosCountersResponse::from(counters),
        },
        "Room has been deleted and kos room count updated",
    )))
}
