use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{
    booking_invoice, create_booking, delete_booking, show_booking, show_booking_list,
    update_booking_status,
};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let bookings_routers = Router::new()
        .route("/", post(create_booking))
        .route("/", get(show_booking_list))
        .route("/:booking_id", get(show_booking))
        .route("/:booking_id/status", put(update_booking_status))
        .route("/:booking_id", delete(delete_booking))
        .route("/:booking_id/invoice", get(booking_invoice));

    Router::new().nest("/bookings", bookings_routers)
}
