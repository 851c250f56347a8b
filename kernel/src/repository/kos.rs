use crate::model::{
    id::KosId,
    kos::{
        event::{CreateKos, DeleteKos, UpdateKos},
        Kos, KosSearch,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait KosRepository: Send + Sync {
    async fn create(&self, event: CreateKos) -> AppResult<KosId>;
    async fn find_all(&self, search: KosSearch) -> AppResult<Vec<Kos>>;
    async fn find_by_id(&self, kos_id: KosId) -> AppResult<Option<Kos>>;
    async fn update(&self, event: UpdateKos) -> AppResult<()>;
    async fn delete(&self, event: DeleteKos) -> AppResult<()>;
}
