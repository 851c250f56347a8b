use crate::model::{
    access::AccessControl,
    id::{FacilityId, KosId, RoomId},
};
use derive_new::new;

#[derive(new)]
pub struct CreateKosFacility {
    pub kos_id: KosId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub access: AccessControl,
}

#[derive(new)]
pub struct CreateRoomFacility {
    pub room_id: RoomId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub access: AccessControl,
}

pub struct UpdateFacility {
    pub facility_id: FacilityId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub access: AccessControl,
}

#[derive(new)]
pub struct DeleteFacility {
    pub facility_id: FacilityId,
    pub access: AccessControl,
}
