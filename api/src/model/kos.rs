use derive_new::new;
use garde::Validate;
use kernel::model::{
    access::AccessControl,
    id::{KosId, UserId},
    kos::{
        event::{CreateKos, UpdateKos},
        GenderType, Kos, KosCounters, KosSearch,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenderTypeName {
    MaleOnly,
    FemaleOnly,
    Mixed,
}

impl From<GenderType> for GenderTypeName {
    fn from(value: GenderType) -> Self {
        match value {
            GenderType::MaleOnly => Self::MaleOnly,
            GenderType::FemaleOnly => Self::FemaleOnly,
            GenderType::Mixed => Self::Mixed,
        }
    }
}

impl From<GenderTypeName> for GenderType {
    fn from(value: GenderTypeName) -> Self {
        match value {
            GenderTypeName::MaleOnly => Self::MaleOnly,
            GenderTypeName::FemaleOnly => Self::FemaleOnly,
            GenderTypeName::Mixed => Self::Mixed,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct KosListQuery {
    pub search: Option<String>,
    pub gender_type: Option<GenderTypeName>,
}

impl From<KosListQuery> for KosSearch {
    fn from(value: KosListQuery) -> Self {
        let KosListQuery {
            search,
            gender_type,
        } = value;
        KosSearch {
            keyword: search,
            gender_type: gender_type.map(GenderType::from),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateKosRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(length(min = 1))]
    pub alamat: String,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(skip)]
    pub peraturan_kos: Option<String>,
    #[garde(skip)]
    pub gender_type: GenderTypeName,
    #[garde(skip)]
    pub kos_picture: Option<String>,
}

#[derive(new)]
pub struct CreateKosRequestWithOwner(UserId, CreateKosRequest);

impl From<CreateKosRequestWithOwner> for CreateKos {
    fn from(value: CreateKosRequestWithOwner) -> Self {
        let CreateKosRequestWithOwner(
            owned_by,
            CreateKosRequest {
                name,
                alamat,
                description,
                peraturan_kos,
                gender_type,
                kos_picture,
            },
        ) = value;
        CreateKos {
            name,
            alamat,
            description: description.unwrap_or_default(),
            peraturan_kos: peraturan_kos.unwrap_or_default(),
            gender_type: gender_type.into(),
            kos_picture: kos_picture.unwrap_or_default(),
            owned_by,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateKosRequest {
    #[garde(inner(length(min = 1)))]
    pub name: Option<String>,
    #[garde(inner(length(min = 1)))]
    pub alamat: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(skip)]
    pub peraturan_kos: Option<String>,
    #[garde(skip)]
    pub gender_type: Option<GenderTypeName>,
    #[garde(skip)]
    pub kos_picture: Option<String>,
}

#[derive(new)]
pub struct UpdateKosRequestWithIds(KosId, AccessControl, UpdateKosRequest);

impl From<UpdateKosRequestWithIds> for UpdateKos {
    fn from(value: UpdateKosRequestWithIds) -> Self {
        let UpdateKosRequestWithIds(
            kos_id,
            access,
            UpdateKosRequest {
                name,
                alamat,
                description,
                peraturan_kos,
                gender_type,
                kos_picture,
            },
        ) = value;
        UpdateKos {
            kos_id,
            name,
            alamat,
            description,
            peraturan_kos,
            gender_type: gender_type.map(GenderType::from),
            kos_picture,
            access,
        }
    }
}

#[derive(Serialize)]
pub struct KosListResponse {
    pub items: Vec<KosResponse>,
}

impl From<Vec<Kos>> for KosListResponse {
    fn from(value: Vec<Kos>) -> Self {
        Self {
            items: value.into_iter().map(KosResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct KosResponse {
    pub id: KosId,
    pub name: String,
    pub alamat: String,
    pub description: String,
    pub peraturan_kos: String,
    pub gender_type: GenderTypeName,
    pub total_rooms: i32,
    pub available_rooms: i32,
    pub kos_picture: String,
    pub owner: KosOwnerResponse,
}

impl From<Kos> for KosResponse {
    fn from(value: Kos) -> Self {
        let Kos {
            kos_id,
            name,
            alamat,
            description,
            peraturan_kos,
            gender_type,
            total_rooms,
            available_rooms,
            kos_picture,
            owner,
        } = value;
        Self {
            id: kos_id,
            name,
            alamat,
            description,
            peraturan_kos,
            gender_type: gender_type.into(),
            total_rooms,
            available_rooms,
            kos_picture,
            owner: KosOwnerResponse {
                id: owner.owner_id,
                name: owner.owner_name,
                phone_number: owner.phone_number,
            },
        }
    }
}

#[derive(Serialize)]
pub struct KosOwnerResponse {
    pub id: UserId,
    pub name: String,
    pub phone_number: String,
}

// 部屋の増減系レスポンスに含める kos_updated の形
#[derive(Serialize)]
pub struct KosCountersResponse {
    pub id: KosId,
    pub name: String,
    pub total_rooms: i32,
    pub available_rooms: i32,
}

impl From<KosCounters> for KosCountersResponse {
    fn from(value: KosCounters) -> Self {
        let KosCounters {
            kos_id,
            name,
            total_rooms,
            available_rooms,
        } = value;
        Self {
            id: kos_id,
            name,
            total_rooms,
            available_rooms,
        }
    }
}
