use kernel::model::{
    facility::{Facility, FacilityParent},
    id::{FacilityId, KosId, RoomId},
};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct FacilityRow {
    pub facility_id: FacilityId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub facility_type: String,
    pub kos_id: Option<KosId>,
    pub room_id: Option<RoomId>,
}

impl TryFrom<FacilityRow> for Facility {
    type Error = AppError;

    fn try_from(value: FacilityRow) -> Result<Self, Self::Error> {
        let FacilityRow {
            facility_id,
            name,
            description,
            icon,
            facility_type,
            kos_id,
            room_id,
        } = value;
        // 親はどちらか一方だけ。DB の CHECK 制約と対になっている
        let parent = match (facility_type.as_str(), kos_id, room_id) {
            ("KOS_FACILITY", Some(kos_id), None) => FacilityParent::Kos(kos_id),
            ("ROOM_FACILITY", None, Some(room_id)) => FacilityParent::Room(room_id),
            _ => {
                return Err(AppError::ConversionEntityError(format!(
                    "facility {facility_id} has an inconsistent parent"
                )))
            }
        };
        Ok(Facility {
            facility_id,
            name,
            description,
            icon,
            parent,
        })
    }
}
