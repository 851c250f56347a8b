use serde::Serialize;

pub mod auth;
pub mod booking;
pub mod facility;
pub mod kos;
pub mod review;
pub mod room;
pub mod user;

// 成功・失敗の両方で使う共通エンベロープ。
// 失敗側は shared::error の IntoResponse が同じ形を組み立てる
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            status: true,
            data: Some(data),
            message: message.into(),
        }
    }
}
