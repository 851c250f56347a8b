use crate::model::id::{KosId, RoomId, UserId};
use strum::{AsRefStr, Display, EnumString};

pub mod event;

#[derive(Debug)]
pub struct Room {
    pub room_id: RoomId,
    pub room_number: String,
    pub tipe: String,
    pub harga: i64,
    pub status: RoomStatus,
    pub room_picture: String,
    pub kos: RoomKos,
}

// 部屋レスポンスに含める親コスの情報
#[derive(Debug)]
pub struct RoomKos {
    pub kos_id: KosId,
    pub name: String,
    pub alamat: String,
    pub owned_by: UserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
}

impl RoomStatus {
    pub fn is_available(self) -> bool {
        matches!(self, RoomStatus::Available)
    }
}
