use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::UserId,
    role::Role,
    user::{
        event::{CreateUser, UpdateUser},
        User,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleName {
    Owner,
    Society,
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::Owner => Self::Owner,
            Role::Society => Self::Society,
        }
    }
}

impl From<RoleName> for Role {
    fn from(value: RoleName) -> Self {
        match value {
            RoleName::Owner => Self::Owner,
            RoleName::Society => Self::Society,
        }
    }
}

#[derive(Serialize)]
pub struct UsersResponse {
    pub items: Vec<UserResponse>,
}

impl From<Vec<User>> for UsersResponse {
    fn from(value: Vec<User>) -> Self {
        Self {
            items: value.into_iter().map(UserResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: RoleName,
    pub phone_number: String,
    pub profile_picture: String,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            user_id,
            name,
            email,
            role,
            phone_number,
            profile_picture,
        } = value;
        Self {
            id: user_id,
            name,
            email,
            role: RoleName::from(role),
            phone_number,
            profile_picture,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 6))]
    pub password: String,
    #[garde(skip)]
    pub role: RoleName,
    #[garde(length(min = 8))]
    pub phone_number: String,
    #[garde(skip)]
    pub profile_picture: Option<String>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(value: CreateUserRequest) -> Self {
        let CreateUserRequest {
            name,
            email,
            password,
            role,
            phone_number,
            profile_picture,
        } = value;
        CreateUser {
            name,
            email,
            password,
            role: role.into(),
            phone_number,
            profile_picture: profile_picture.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[garde(inner(length(min = 1)))]
    pub name: Option<String>,
    #[garde(inner(email))]
    pub email: Option<String>,
    #[garde(inner(length(min = 6)))]
    pub password: Option<String>,
    #[garde(inner(length(min = 8)))]
    pub phone_number: Option<String>,
    #[garde(skip)]
    pub profile_picture: Option<String>,
}

#[derive(new)]
pub struct UpdateUserRequestWithUserId(UserId, UpdateUserRequest);

impl From<UpdateUserRequestWithUserId> for UpdateUser {
    fn from(value: UpdateUserRequestWithUserId) -> Self {
        let UpdateUserRequestWithUserId(
            user_id,
            UpdateUserRequest {
                name,
                email,
                password,
                phone_number,
                profile_picture,
            },
        ) = value;
        UpdateUser {
            user_id,
            name,
            email,
            password,
            phone_number,
            profile_picture,
        }
    }
}
