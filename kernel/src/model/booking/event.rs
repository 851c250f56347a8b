use crate::model::{
    access::AccessControl,
    booking::{BookingStatus, StayPeriod},
    id::{BookingId, RoomId, UserId},
};
use chrono::NaiveDate;
use derive_new::new;

#[derive(new)]
pub struct CreateBooking {
    pub room_id: RoomId,
    pub booked_by: UserId,
    pub period: StayPeriod,
    pub notes: String,
}

#[derive(new)]
pub struct UpdateBookingStatus {
    pub booking_id: BookingId,
    pub new_status: BookingStatus,
    pub access: AccessControl,
}

#[derive(new)]
pub struct DeleteBooking {
    pub booking_id: BookingId,
    pub access: AccessControl,
}

#[derive(new)]
pub struct IssueInvoice {
    pub booking_id: BookingId,
    pub access: AccessControl,
    pub issued_on: NaiveDate,
}
