use kernel::model::{auth::AccessToken, id::UserId};
use shared::error::AppResult;
use std::str::FromStr;

pub trait RedisKey {
    type Value: RedisValue;
    fn inner(&self) -> String;
}

pub trait RedisValue: Sized {
    fn inner(&self) -> String;
    fn try_from_str(s: String) -> AppResult<Self>;
}

// アクセストークンをキーに、ユーザー ID を値として保存する
pub struct AuthorizationKey(String);

pub struct AuthorizedUserId(UserId);

impl AuthorizedUserId {
    pub fn new(user_id: UserId) -> Self {
        Self(user_id)
    }

    pub fn into_inner(self) -> UserId {
        self.0
    }
}

impl From<&AccessToken> for AuthorizationKey {
    fn from(token: &AccessToken) -> Self {
        Self(format!("auth:{}", token.0))
    }
}

impl RedisKey for AuthorizationKey {
    type Value = AuthorizedUserId;

    fn inner(&self) -> String {
        self.0.clone()
    }
}

impl RedisValue for AuthorizedUserId {
    fn inner(&self) -> String {
        self.0.to_string()
    }

    fn try_from_str(s: String) -> AppResult<Self> {
        Ok(Self(UserId::from_str(&s)?))
    }
}
