use axum::Router;
use axum::routing::{get, post};

use crate::http::AppState;
use crate::http::handlers;

/// The full CRUD route table. The WebSocket feed is not mounted here; it
/// lives on its own listener (see `transport`).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/authors", get(handlers::list_authors))
        .route("/author", post(handlers::create_author))
        .route(
            "/author/{id}",
            get(handlers::get_author)
                .put(handlers::update_author)
                .delete(handlers::delete_author),
        )
        .route("/{author_id}/articles", get(handlers::list_articles))
        .route("/article", post(handlers::create_article))
        .route(
            "/article/{id}",
            get(handlers::get_article)
                .put(handlers::update_article)
                .delete(handlers::delete_article),
        )
        .with_state(state)
}
