use derive_new::new;
use garde::Validate;
use kernel::model::{
    access::AccessControl,
    facility::{
        event::{CreateKosFacility, CreateRoomFacility, UpdateFacility},
        Facility, FacilityType,
    },
    id::{FacilityId, KosId, RoomId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FacilityTypeName {
    KosFacility,
    RoomFacility,
}

impl From<FacilityType> for FacilityTypeName {
    fn from(value: FacilityType) -> Self {
        match value {
            FacilityType::KosFacility => Self::KosFacility,
            FacilityType::RoomFacility => Self::RoomFacility,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateKosFacilityRequest {
    #[serde(rename = "kosId")]
    #[garde(skip)]
    pub kos_id: KosId,
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(skip)]
    pub icon: Option<String>,
}

#[derive(new)]
pub struct CreateKosFacilityRequestWithAccess(AccessControl, CreateKosFacilityRequest);

impl From<CreateKosFacilityRequestWithAccess> for CreateKosFacility {
    fn from(value: CreateKosFacilityRequestWithAccess) -> Self {
        let CreateKosFacilityRequestWithAccess(
            access,
            CreateKosFacilityRequest {
                kos_id,
                name,
                description,
                icon,
            },
        ) = value;
        CreateKosFacility {
            kos_id,
            name,
            description: description.unwrap_or_default(),
            icon: icon.unwrap_or_default(),
            access,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoomFacilityRequest {
    #[serde(rename = "roomId")]
    #[garde(skip)]
    pub room_id: RoomId,
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(skip)]
    pub icon: Option<String>,
}

#[derive(new)]
pub struct CreateRoomFacilityRequestWithAccess(AccessControl, CreateRoomFacilityRequest);

impl From<CreateRoomFacilityRequestWithAccess> for CreateRoomFacility {
    fn from(value: CreateRoomFacilityRequestWithAccess) -> Self {
        let CreateRoomFacilityRequestWithAccess(
            access,
            CreateRoomFacilityRequest {
                room_id,
                name,
                description,
                icon,
            },
        ) = value;
        CreateRoomFacility {
            room_id,
            name,
            description: description.unwrap_or_default(),
            icon: icon.unwrap_or_default(),
            access,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFacilityRequest {
    #[garde(inner(length(min = 1)))]
    pub name: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(skip)]
    pub icon: Option<String>,
}

#[derive(new)]
pub struct UpdateFacilityRequestWithIds(FacilityId, AccessControl, UpdateFacilityRequest);

impl From<UpdateFacilityRequestWithIds> for UpdateFacility {
    fn from(value: UpdateFacilityRequestWithIds) -> Self {
        let UpdateFacilityRequestWithIds(
            facility_id,
            access,
            UpdateFacilityRequest {
                name,
                description,
                icon,
            },
        ) = value;
        UpdateFacility {
            facility_id,
            name,
            description,
            icon,
            access,
        }
    }
}

#[derive(Serialize)]
pub struct FacilitiesResponse {
    pub items: Vec<FacilityResponse>,
}

impl From<Vec<Facility>> for FacilitiesResponse {
    fn from(value: Vec<Facility>) -> Self {
        Self {
            items: value.into_iter().map(FacilityResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct FacilityResponse {
    pub id: FacilityId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub facility_type: FacilityTypeName,
}

impl From<Facility> for FacilityResponse {
    fn from(value: Facility) -> Self {
        let Facility {
            facility_id,
            name,
            description,
            icon,
            parent,
        } = value;
        Self {
            id: facility_id,
            name,
            description,
            icon,
            facility_type: parent.facility_type().into(),
        }
    }
}
