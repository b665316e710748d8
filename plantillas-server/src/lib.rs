//! # Plantillas Server
//!
//! HTTP surface of the image catalog:
//!
//! - `GET /images`: newest images first, paginated
//! - `GET /images/hashtag`: same listing filtered by any of the `tag` values
//! - `POST /images/pdf`: PDF sheet with three images per A4 page
//!
//! Built on Axum over a PostgreSQL pool; the router is constructed
//! explicitly by [`create_app`] and handed to the server at startup.

pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::infra::cors::cors_layer;

/// Assemble the router with tracing and CORS around every route.
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config().allowed_origins());

    routes::create_router()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
