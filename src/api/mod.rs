mod posts;
mod threads;

use axum::{routing::{get, post}, Router};

use crate::AppState;

/// Build the API router
pub fn router() -> Router<AppState> {
    Router::new()
        // Thread creation (forums themselves are managed elsewhere)
        .route("/forum/{forum}/create", post(threads::create_thread))
        // Thread routes ({slug_or_id} is a numeric id or a slug)
        .route("/thread/{slug_or_id}/create", post(posts::create_posts))
        .route(
            "/thread/{slug_or_id}/details",
            get(threads::get_thread).post(threads::update_thread),
        )
        .route("/thread/{slug_or_id}/posts", get(threads::get_thread_posts))
        // Post routes
        .route(
            "/post/{id}/details",
            get(posts::get_post).post(posts::update_post),
        )
}
