use crate::model::id::{FacilityId, KosId, RoomId};
use strum::{AsRefStr, Display, EnumString};

pub mod event;

#[derive(Debug)]
pub struct Facility {
    pub facility_id: FacilityId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub parent: FacilityParent,
}

// 設備はコスか部屋のどちらか一方にだけ属する
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacilityParent {
    Kos(KosId),
    Room(RoomId),
}

impl FacilityParent {
    pub fn facility_type(&self) -> FacilityType {
        match self {
            FacilityParent::Kos(_) => FacilityType::KosFacility,
            FacilityParent::Room(_) => FacilityType::RoomFacility,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FacilityType {
    KosFacility,
    RoomFacility,
}
