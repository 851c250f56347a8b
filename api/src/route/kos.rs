use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::kos::{delete_kos, register_kos, show_kos, show_kos_list, update_kos};

pub fn build_kos_routers() -> Router<AppRegistry> {
    let kos_routers = Router::new()
        .route("/", post(register_kos))
        .route("/", get(show_kos_list))
        .route("/:kos_id", get(show_kos))
        .route("/:kos_id", put(update_kos))
        .route("/:kos_id", delete(delete_kos));

    Router::new().nest("/kos", kos_routers)
}
