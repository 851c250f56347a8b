use chrono::NaiveDate;
use garde::Validate;
use kernel::model::{
    booking::{Booking, BookingStatus},
    id::{BookingId, KosId, RoomId, UserId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatusName {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl From<BookingStatus> for BookingStatusName {
    fn from(value: BookingStatus) -> Self {
        match value {
            BookingStatus::Pending => Self::Pending,
            BookingStatus::Confirmed => Self::Confirmed,
            BookingStatus::Cancelled => Self::Cancelled,
            BookingStatus::Completed => Self::Completed,
        }
    }
}

impl From<BookingStatusName> for BookingStatus {
    fn from(value: BookingStatusName) -> Self {
        match value {
            BookingStatusName::Pending => Self::Pending,
            BookingStatusName::Confirmed => Self::Confirmed,
            BookingStatusName::Cancelled => Self::Cancelled,
            BookingStatusName::Completed => Self::Completed,
        }
    }
}

// 期間の正当性（start < end）は StayPeriod の構築時に検証される
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[serde(rename = "roomId")]
    #[garde(skip)]
    pub room_id: RoomId,
    #[garde(skip)]
    pub start_date: NaiveDate,
    #[garde(skip)]
    pub end_date: NaiveDate,
    #[garde(skip)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBookingStatusRequest {
    #[garde(skip)]
    pub status: BookingStatusName,
}

#[derive(Serialize)]
pub struct BookingsResponse {
    pub items: Vec<BookingResponse>,
}

impl From<Vec<Booking>> for BookingsResponse {
    fn from(value: Vec<Booking>) -> Self {
        Self {
            items: value.into_iter().map(BookingResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct BookingResponse {
    pub id: BookingId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: i64,
    pub status: BookingStatusName,
    pub notes: String,
    pub invoice_number: Option<String>,
    pub user: BookingUserResponse,
    pub room: BookingRoomResponse,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            booking_id,
            booked_by,
            user_name,
            email,
            phone_number,
            period,
            total_price,
            status,
            notes,
            invoice_number,
            invoice_pdf: _,
            created_at: _,
            room,
        } = value;
        Self {
            id: booking_id,
            start_date: period.start_date(),
            end_date: period.end_date(),
            total_price,
            status: status.into(),
            notes,
            invoice_number,
            user: BookingUserResponse {
                id: booked_by,
                name: user_name,
                email,
                phone_number,
            },
            room: BookingRoomResponse {
                id: room.room_id,
                room_number: room.room_number,
                tipe: room.tipe,
                harga: room.harga,
                kos: BookingKosResponse {
                    id: room.kos_id,
                    name: room.kos_name,
                    alamat: room.alamat,
                },
            },
        }
    }
}

#[derive(Serialize)]
pub struct BookingUserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

#[derive(Serialize)]
pub struct BookingRoomResponse {
    pub id: RoomId,
    pub room_number: String,
    pub tipe: String,
    pub harga: i64,
    pub kos: BookingKosResponse,
}

#[derive(Serialize)]
pub struct BookingKosResponse {
    pub id: KosId,
    pub name: String,
    pub alamat: String,
}

#[derive(Serialize)]
pub struct InvoiceResponse {
    pub invoice_number: String,
    pub download_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    // 外部キーだけ roomId の形で受けるのがワイヤー上の約束
    #[test]
    fn create_booking_request_uses_room_id_in_camel_case() {
        let req: CreateBookingRequest = serde_json::from_str(
            r#"{
                "roomId": "0190a3a1-9e2b-7c30-bd1a-0242ac120002",
                "start_date": "2024-01-01",
                "end_date": "2024-01-31",
                "notes": "Booking untuk 1 bulan"
            }"#,
        )
        .unwrap();

        assert_eq!(
            req.start_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(req.end_date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(req.notes.as_deref(), Some("Booking untuk 1 bulan"));
    }

    #[test]
    fn booking_status_names_match_the_stored_values() {
        let confirmed: BookingStatusName = serde_json::from_str(r#""CONFIRMED""#).unwrap();
        assert!(matches!(confirmed, BookingStatusName::Confirmed));
        assert_eq!(
            serde_json::to_string(&BookingStatusName::Pending).unwrap(),
            r#""PENDING""#
        );
    }
}
