use kernel::model::{
    id::{KosId, UserId},
    kos::{GenderType, Kos, KosCounters},
    user::KosOwner,
};
use shared::error::AppError;
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub struct KosRow {
    pub kos_id: KosId,
    pub name: String,
    pub alamat: String,
    pub description: String,
    pub peraturan_kos: String,
    pub gender_type: String,
    pub total_rooms: i32,
    pub available_rooms: i32,
    pub kos_picture: String,
    pub owned_by: UserId,
    pub owner_name: String,
    pub owner_phone_number: String,
}

impl TryFrom<KosRow> for Kos {
    type Error = AppError;

    fn try_from(value: KosRow) -> Result<Self, Self::Error> {
        let KosRow {
            kos_id,
            name,
            alamat,
            description,
            peraturan_kos,
            gender_type,
            total_rooms,
            available_rooms,
            kos_picture,
            owned_by,
            owner_name,
            owner_phone_number,
        } = value;
        let gender_type = GenderType::from_str(&gender_type)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        Ok(Kos {
            kos_id,
            name,
            alamat,
            description,
            peraturan_kos,
            gender_type,
            total_rooms,
            available_rooms,
            kos_picture,
            owner: KosOwner {
                owner_id: owned_by,
                owner_name,
                phone_number: owner_phone_number,
            },
        })
    }
}

// カウンター更新後のスナップショット取得に使う型
#[derive(sqlx::FromRow)]
pub struct KosCountersRow {
    pub kos_id: KosId,
    pub name: String,
    pub total_rooms: i32,
    pub available_rooms: i32,
}

impl From<KosCountersRow> for KosCounters {
    fn from(value: KosCountersRow) -> Self {
        let KosCountersRow {
            kos_id,
            name,
            total_rooms,
            available_rooms,
        } = value;
        KosCounters {
            kos_id,
            name,
            total_rooms,
            available_rooms,
        }
    }
}
