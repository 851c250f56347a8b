use kernel::model::{
    id::{KosId, RoomId, UserId},
    room::{Room, RoomKos, RoomStatus},
};
use shared::error::AppError;
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub struct RoomRow {
    pub room_id: RoomId,
    pub room_number: String,
    pub tipe: String,
    pub harga: i64,
    pub status: String,
    pub room_picture: String,
    pub kos_id: KosId,
    pub kos_name: String,
    pub alamat: String,
    pub owned_by: UserId,
}

// 更新・削除時の事前チェックに使う最小限の列
#[derive(sqlx::FromRow)]
pub struct RoomStateRow {
    pub room_id: RoomId,
    pub room_number: String,
    pub status: String,
    pub kos_id: KosId,
    pub owned_by: UserId,
}

impl TryFrom<RoomRow> for Room {
    type Error = AppError;

    fn try_from(value: RoomRow) -> Result<Self, Self::Error> {
        let RoomRow {
            room_id,
            room_number,
            tipe,
            harga,
            status,
            room_picture,
            kos_id,
            kos_name,
            alamat,
            owned_by,
        } = value;
        let status = RoomStatus::from_str(&status)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        Ok(Room {
            room_id,
            room_number,
            tipe,
            harga,
            status,
            room_picture,
            kos: RoomKos {
                kos_id,
                name: kos_name,
                alamat,
                owned_by,
            },
        })
    }
}
