use crate::model::kos::KosCountersResponse;
use chrono::NaiveDate;
use derive_new::new;
use garde::Validate;
use kernel::model::{
    access::AccessControl,
    id::{KosId, RoomId},
    room::{
        event::{CreateRoom, UpdateRoom},
        Room, RoomStatus,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatusName {
    Available,
    Occupied,
    Maintenance,
}

impl From<RoomStatus> for RoomStatusName {
    fn from(value: RoomStatus) -> Self {
        match value {
            RoomStatus::Available => Self::Available,
            RoomStatus::Occupied => Self::Occupied,
            RoomStatus::Maintenance => Self::Maintenance,
        }
    }
}

impl From<RoomStatusName> for RoomStatus {
    fn from(value: RoomStatusName) -> Self {
        match value {
            RoomStatusName::Available => Self::Available,
            RoomStatusName::Occupied => Self::Occupied,
            RoomStatusName::Maintenance => Self::Maintenance,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RoomListQuery {
    pub status: Option<RoomStatusName>,
}

// 読み取り専用の空室確認。end_date は排他的
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoomRequest {
    #[serde(rename = "kosId")]
    #[garde(skip)]
    pub kos_id: KosId,
    #[garde(length(min = 1))]
    pub room_number: String,
    #[garde(length(min = 1))]
    pub tipe: String,
    #[garde(range(min = 0))]
    pub harga: i64,
    #[garde(skip)]
    pub room_picture: Option<String>,
}

#[derive(new)]
pub struct CreateRoomRequestWithAccess(AccessControl, CreateRoomRequest);

impl From<CreateRoomRequestWithAccess> for CreateRoom {
    fn from(value: CreateRoomRequestWithAccess) -> Self {
        let CreateRoomRequestWithAccess(
            access,
            CreateRoomRequest {
                kos_id,
                room_number,
                tipe,
                harga,
                room_picture,
            },
        ) = value;
        CreateRoom {
            kos_id,
            room_number,
            tipe,
            harga,
            room_picture: room_picture.unwrap_or_default(),
            access,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRoomRequest {
    #[garde(inner(length(min = 1)))]
    pub room_number: Option<String>,
    #[garde(inner(length(min = 1)))]
    pub tipe: Option<String>,
    #[garde(inner(range(min = 0)))]
    pub harga: Option<i64>,
    #[garde(skip)]
    pub status: Option<RoomStatusName>,
    #[garde(skip)]
    pub room_picture: Option<String>,
}

#[derive(new)]
pub struct UpdateRoomRequestWithIds(RoomId, AccessControl, UpdateRoomRequest);

impl From<UpdateRoomRequestWithIds> for UpdateRoom {
    fn from(value: UpdateRoomRequestWithIds) -> Self {
        let UpdateRoomRequestWithIds(
            room_id,
            access,
            UpdateRoomRequest {
                room_number,
                tipe,
                harga,
                status,
                room_picture,
            },
        ) = value;
        UpdateRoom {
            room_id,
            room_number,
            tipe,
            harga,
            status: status.map(RoomStatus::from),
            room_picture,
            access,
        }
    }
}

#[derive(Serialize)]
pub struct RoomsResponse {
    pub items: Vec<RoomResponse>,
}

impl From<Vec<Room>> for RoomsResponse {
    fn from(value: Vec<Room>) -> Self {
        Self {
            items: value.into_iter().map(RoomResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct RoomResponse {
    pub id: RoomId,
    pub room_number: String,
    pub tipe: String,
    pub harga: i64,
    pub status: RoomStatusName,
    pub room_picture: String,
    pub kos: RoomKosResponse,
}

impl From<Room> for RoomResponse {
    fn from(value: Room) -> Self {
        let Room {
            room_id,
            room_number,
            tipe,
            harga,
            status,
            room_picture,
            kos,
        } = value;
        Self {
            id: room_id,
            room_number,
            tipe,
            harga,
            status: status.into(),
            room_picture,
            kos: RoomKosResponse {
                id: kos.kos_id,
                name: kos.name,
                alamat: kos.alamat,
            },
        }
    }
}

#[derive(Serialize)]
pub struct RoomKosResponse {
    pub id: KosId,
    pub name: String,
    pub alamat: String,
}

#[derive(Serialize)]
pub struct CreatedRoomResponse {
    pub room: RoomResponse,
    pub kos_updated: KosCountersResponse,
}

#[derive(Serialize)]
pub struct DeletedRoomResponse {
    pub deleted_room: RoomResponse,
    pub kos_updated: KosCountersResponse,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}
