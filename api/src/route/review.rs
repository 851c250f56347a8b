use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::review::{create_review, delete_review, reply_review, show_reviews_by_kos};

pub fn build_review_routers() -> Router<AppRegistry> {
    let reviews_routers = Router::new()
        .route("/kos/:kos_id", get(show_reviews_by_kos))
        .route("/", post(create_review))
        .route("/:review_id/reply", put(reply_review))
        .route("/:review_id", delete(delete_review));

    Router::new().nest("/reviews", reviews_routers)
}
