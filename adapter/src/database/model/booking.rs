use kernel::model::{
    booking::{Booking, BookingRoom, BookingStatus, StayPeriod},
    id::{BookingId, KosId, RoomId, UserId},
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, NaiveDate, Utc};
use std::str::FromStr;

// 予約一覧・詳細の取得に使う型。
// rooms・kos・users と JOIN した結果を受ける
#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub booked_by: UserId,
    pub user_name: String,
    pub email: String,
    pub phone_number: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: i64,
    pub status: String,
    pub notes: String,
    pub invoice_number: Option<String>,
    pub invoice_pdf: Option<String>,
    pub created_at: DateTime<Utc>,
    pub room_id: RoomId,
    pub room_number: String,
    pub tipe: String,
    pub harga: i64,
    pub kos_id: KosId,
    pub kos_name: String,
    pub alamat: String,
    pub owned_by: UserId,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(value: BookingRow) -> Result<Self, Self::Error> {
        let BookingRow {
            booking_id,
            booked_by,
            user_name,
            email,
            phone_number,
            start_date,
            end_date,
            total_price,
            status,
            notes,
            invoice_number,
            invoice_pdf,
            created_at,
            room_id,
            room_number,
            tipe,
            harga,
            kos_id,
            kos_name,
            alamat,
            owned_by,
        } = value;
        let status = BookingStatus::from_str(&status)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        Ok(Booking {
            booking_id,
            booked_by,
            user_name,
            email,
            phone_number,
            period: StayPeriod::new(start_date, end_date)?,
            total_price,
            status,
            notes,
            invoice_number,
            invoice_pdf,
            created_at,
            room: BookingRoom {
                room_id,
                room_number,
                tipe,
                harga,
                kos_id,
                kos_name,
                alamat,
                owned_by,
            },
        })
    }
}

// 状態遷移・削除時の事前チェックに必要な最小限の列
#[derive(sqlx::FromRow)]
pub struct BookingStateRow {
    pub booking_id: BookingId,
    pub booked_by: UserId,
    pub status: String,
    pub room_id: RoomId,
    pub room_status: String,
    pub kos_id: KosId,
    pub owned_by: UserId,
}
