use crate::model::{
    access::AccessControl,
    booking::{
        event::{CreateBooking, DeleteBooking, IssueInvoice, UpdateBookingStatus},
        Booking, StayPeriod,
    },
    id::{BookingId, RoomId},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    // 空室確認と挿入を単一の SERIALIZABLE トランザクションで行う
    async fn create(&self, event: CreateBooking) -> AppResult<BookingId>;
    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>>;
    // SOCIETY は自分の予約、OWNER は自分のコスへの予約の一覧
    async fn find_all_for(&self, access: AccessControl) -> AppResult<Vec<Booking>>;
    // 遷移表に従って状態を更新し、部屋の状態とコスのカウンターを追従させる
    async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<()>;
    async fn delete(&self, event: DeleteBooking) -> AppResult<()>;
    // 読み取り専用の空室確認。期間が重なるアクティブな予約がなければ true
    async fn is_available(&self, room_id: RoomId, period: &StayPeriod) -> AppResult<bool>;
    // 請求書番号を割り当てる（割当済みならそのまま返す）
    async fn issue_invoice_number(&self, event: IssueInvoice) -> AppResult<Booking>;
    // 生成済みドキュメントへの参照を記録する
    async fn record_invoice_document(
        &self,
        booking_id: BookingId,
        document: &str,
    ) -> AppResult<()>;
}
