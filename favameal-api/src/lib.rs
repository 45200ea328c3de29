pub mod extractors;
pub mod handlers;

use axum::routing::{delete, get, post};
use axum::Router;
use favameal_app::AppContext;
use handlers::{meals, restaurants, users};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/register", post(users::register))
        .route("/meals", get(meals::list).post(meals::create))
        .route("/meals/{id}", get(meals::retrieve).delete(meals::destroy))
        .route(
            "/meals/{id}/rate",
            post(meals::rate)
                .put(meals::update_rating)
                .delete(meals::delete_rating),
        )
        .route("/meals/{id}/favorite", post(meals::favorite))
        .route("/meals/{id}/unfavorite", delete(meals::unfavorite))
        .route("/restaurants", get(restaurants::list).post(restaurants::create))
        .route(
            "/restaurants/{id}",
            get(restaurants::retrieve).delete(restaurants::destroy),
        )
        .route("/restaurants/{id}/favorite", post(restaurants::favorite))
        .route("/restaurants/{id}/unfavorite", delete(restaurants::unfavorite))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(ctx)
}
