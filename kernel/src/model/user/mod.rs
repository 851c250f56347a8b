use crate::model::{id::UserId, role::Role};

pub mod event;

#[derive(Debug, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone_number: String,
    pub profile_picture: String,
}

#[derive(Debug)]
pub struct KosOwner {
    pub owner_id: UserId,
    pub owner_name: String,
    pub phone_number: String,
}

#[derive(Debug)]
pub struct ReviewAuthor {
    pub user_id: UserId,
    pub name: String,
    pub profile_picture: String,
}
