use crate::model::{
    id::{KosId, RoomId},
    kos::KosCounters,
    room::{
        event::{CreateRoom, DeleteRoom, UpdateRoom},
        Room, RoomStatus,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    // 部屋を作成し、更新後のコスのカウンターを返す
    async fn create(&self, event: CreateRoom) -> AppResult<(RoomId, KosCounters)>;
    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>>;
    async fn find_by_kos_id(
        &self,
        kos_id: KosId,
        status: Option<RoomStatus>,
    ) -> AppResult<Vec<Room>>;
    async fn update(&self, event: UpdateRoom) -> AppResult<()>;
    // 部屋を削除し、更新後のコスのカウンターを返す。
    // アクティブな予約が残っている部屋は削除できない
    async fn delete(&self, event: DeleteRoom) -> AppResult<KosCounters>;
}
