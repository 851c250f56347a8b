use crate::model::{
    id::UserId,
    user::{
        event::{CreateUser, DeleteUser, UpdateUser},
        User,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, event: CreateUser) -> AppResult<User>;
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>>;
    async fn find_all(&self) -> AppResult<Vec<User>>;
    async fn update(&self, event: UpdateUser) -> AppResult<()>;
    async fn delete(&self, event: DeleteUser) -> AppResult<()>;
}
