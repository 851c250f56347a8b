use crate::model::{
    facility::{
        event::{CreateKosFacility, CreateRoomFacility, DeleteFacility, UpdateFacility},
        Facility,
    },
    id::{FacilityId, KosId, RoomId},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait FacilityRepository: Send + Sync {
    async fn create_for_kos(&self, event: CreateKosFacility) -> AppResult<FacilityId>;
    async fn create_for_room(&self, event: CreateRoomFacility) -> AppResult<FacilityId>;
    async fn find_by_id(&self, facility_id: FacilityId) -> AppResult<Option<Facility>>;
    async fn find_by_kos_id(&self, kos_id: KosId) -> AppResult<Vec<Facility>>;
    async fn find_by_room_id(&self, room_id: RoomId) -> AppResult<Vec<Facility>>;
    async fn update(&self, event: UpdateFacility) -> AppResult<()>;
    async fn delete(&self, event: DeleteFacility) -> AppResult<()>;
}
