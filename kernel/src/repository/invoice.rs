use crate::model::booking::{Booking, DocumentRef};
use async_trait::async_trait;
use shared::error::AppResult;

// 請求書ドキュメントの描画は外部コラボレーターに委譲する
#[async_trait]
pub trait InvoiceRenderer: Send + Sync {
    async fn render(&self, booking: &Booking, invoice_number: &str) -> AppResult<DocumentRef>;
}
