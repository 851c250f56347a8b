use crate::model::{id::UserId, role::Role};
use derive_new::new;

#[derive(new)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub phone_number: String,
    pub profile_picture: String,
}

pub struct UpdateUser {
    pub user_id: UserId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone_number: Option<String>,
    pub profile_picture: Option<String>,
}

#[derive(new)]
pub struct DeleteUser {
    pub user_id: UserId,
}
