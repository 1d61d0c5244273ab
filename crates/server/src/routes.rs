use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub mod albums;
pub mod counter;

/// Liveness probe; never touches the database.
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// `/health`, `GET /count`, `POST /insert`.
pub fn build_counter_router(state: AppState) -> Router {
    let app = Router::new()
        .route("/health", get(health))
        .route("/count", get(counter::count))
        .route("/insert", post(counter::insert))
        .with_state(state);
    with_default_layers(app)
}

/// `/health`, `POST /albums`, `GET /albums/:albumID`.
pub fn build_album_router(state: AppState) -> Router {
    let limit = state.max_upload_bytes;
    let app = Router::new()
        .route("/health", get(health))
        .route("/albums", post(albums::create))
        .route("/albums/:album_id", get(albums::get))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state);
    with_default_layers(app)
}

/// Request logging and panic recovery, shared by both services.
fn with_default_layers(app: Router) -> Router {
    app.layer(CatchPanicLayer::new()).layer(
        TraceLayer::new_for_http()
            .make_span_with(
                DefaultMakeSpan::new()
                    .level(Level::INFO)
                    .include_headers(false),
            )
            .on_request(
                DefaultOnRequest::new()
                    .level(Level::INFO),
            )
            // status code and latency
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .include_headers(false),
            )
            .on_failure(
                DefaultOnFailure::new()
                    .level(Level::ERROR),
            ),
    )
}
