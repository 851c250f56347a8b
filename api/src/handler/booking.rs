use crate::{
    extractor::AuthorizedUser,
    model::{
        booking::{
            BookingResponse, BookingsResponse, CreateBookingRequest, InvoiceResponse,
            UpdateBookingStatusRequest,
        },
        ApiResponse,
    },
};
use axum::{
    extract::{Path, State},
    Json,
};
use garde::Validate;
use kernel::model::{
    booking::{
        event::{CreateBooking, DeleteBooking, IssueInvoice, UpdateBookingStatus},
        StayPeriod,
    },
    id::BookingId,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn show_booking_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<BookingsResponse>>> {
    let bookings = registry
        .booking_repository()
        .find_all_for(user.access())
        .await?;

    Ok(Json(ApiResponse::ok(
        bookings.into(),
        "Booking list has been retrieved",
    )))
}

pub async fn show_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<BookingResponse>>> {
    let booking = registry
        .booking_repository()
        .find_by_id(booking_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Booking not found".into()))?;

    // 予約の当事者以外には見せない
    if !user
        .access()
        .is_booking_party(booking.booked_by, booking.room.owned_by)
    {
        return Err(AppError::ForbiddenOperation);
    }

    Ok(Json(ApiResponse::ok(
        booking.into(),
        "Booking has been retrieved",
    )))
}

pub async fn create_booking(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<Json<ApiResponse<BookingResponse>>> {
    // 予約できるのは入居者ロールだけ
    if !user.is_society() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    let period = StayPeriod::new(req.start_date, req.end_date)?;
    let create = CreateBooking::new(
        req.room_id,
        user.id(),
        period,
        req.notes.unwrap_or_default(),
    );
    let booking_id = registry.booking_repository().create(create).await?;

    let booking = registry
        .booking_repository()
        .find_by_id(booking_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Booking not found".into()))?;

    Ok(Json(ApiResponse::ok(
        booking.into(),
        "New booking has been created",
    )))
}

pub async fn update_booking_status(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateBookingStatusRequest>,
) -> AppResult<Json<ApiResponse<BookingResponse>>> {
    req.validate(&())?;

    let update = UpdateBookingStatus::new(booking_id, req.status.into(), user.access());
    registry.booking_repository().update_status(update).await?;

    let booking = registry
        .booking_repository()
        .find_by_id(booking_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Booking not found".into()))?;

    Ok(Json(ApiResponse::ok(
        booking.into(),
        "Booking status has been updated",
    )))
}

pub async fn delete_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<BookingResponse>>> {
    let booking = registry
        .booking_repository()
        .find_by_id(booking_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Booking not found".into()))?;

    registry
        .booking_repository()
        .delete(DeleteBooking::new(booking_id, user.access()))
        .await?;

    Ok(Json(ApiResponse::ok(
        booking.into(),
        "Booking has been deleted",
    )))
}

// 請求書番号の採番（冪等）とドキュメント生成をまとめて行う
pub async fn booking_invoice(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiResponse<InvoiceResponse>>> {
    let issued_on = chrono::Local::now().date_naive();
    let booking = registry
        .booking_repository()
        .issue_invoice_number(IssueInvoice::new(booking_id, user.access(), issued_on))
        .await?;

    let invoice_number = booking
        .invoice_number
        .clone()
        .ok_or_else(|| AppError::InvoiceRenderError("invoice number is missing".into()))?;

    let document = registry
        .invoice_renderer()
        .render(&booking, &invoice_number)
        .await?;
    registry
        .booking_repository()
        .record_invoice_document(booking_id, &document.0)
        .await?;

    Ok(Json(ApiResponse::ok(
        InvoiceResponse {
            invoice_number,
            download_url: format!("/uploads/invoices/{}", document.0),
        },
        "Invoice generated successfully",
    )))
}
