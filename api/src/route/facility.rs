use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::facility::{
    delete_facility, register_kos_facility, register_room_facility, show_kos_facilities,
    show_room_facilities, update_facility,
};

pub fn build_facility_routers() -> Router<AppRegistry> {
    let facilities_routers = Router::new()
        .route("/kos/:kos_id", get(show_kos_facilities))
        .route("/room/:room_id", get(show_room_facilities))
        .route("/kos", post(register_kos_facility))
        .route("/room", post(register_room_facility))
        .route("/:facility_id", put(update_facility))
        .route("/:facility_id", delete(delete_facility));

    Router::new().nest("/facilities", facilities_routers)
}
