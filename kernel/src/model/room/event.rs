use crate::model::{
    access::AccessControl,
    id::{KosId, RoomId},
    room::RoomStatus,
};
use derive_new::new;

#[derive(new)]
pub struct CreateRoom {
    pub kos_id: KosId,
    pub room_number: String,
    pub tipe: String,
    pub harga: i64,
    pub room_picture: String,
    pub access: AccessControl,
}

pub struct UpdateRoom {
    pub room_id: RoomId,
    pub room_number: Option<String>,
    pub tipe: Option<String>,
    pub harga: Option<i64>,
    pub status: Option<RoomStatus>,
    pub room_picture: Option<String>,
    pub access: AccessControl,
}

#[derive(new)]
pub struct DeleteRoom {
    pub room_id: RoomId,
    pub access: AccessControl,
}
