use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::user::{
    delete_user, register_user, show_current_user, show_user_list, update_current_user,
};

pub fn build_user_routers() -> Router<AppRegistry> {
    let users_routers = Router::new()
        .route("/", post(register_user))
        .route("/", get(show_user_list))
        .route("/me", get(show_current_user))
        .route("/me", put(update_current_user))
        .route("/:user_id", delete(delete_user));

    Router::new().nest("/users", users_routers)
}
