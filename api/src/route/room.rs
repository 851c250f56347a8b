use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::room::{
    check_room_availability, delete_room, register_room, show_room, show_rooms_by_kos,
    update_room,
};

pub fn build_room_routers() -> Router<AppRegistry> {
    let rooms_routers = Router::new()
        .route("/", post(register_room))
        .route("/kos/:kos_id", get(show_rooms_by_kos))
        .route("/:room_id", get(show_room))
        .route("/:room_id/availability", get(check_room_availability))
        .route("/:room_id", put(update_room))
        .route("/:room_id", delete(delete_room));

    Router::new().nest("/rooms", rooms_routers)
}
