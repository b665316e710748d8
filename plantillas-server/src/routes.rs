use axum::{
    Router,
    routing::{get, post},
};

use crate::{AppState, handlers};

pub const IMAGES: &str = "/images";
pub const IMAGES_BY_HASHTAG: &str = "/images/hashtag";
pub const IMAGES_PDF: &str = "/images/pdf";

/// Create all API routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route(IMAGES, get(handlers::list_images_handler))
        .route(IMAGES_BY_HASHTAG, get(handlers::list_images_by_hashtag_handler))
        .route(IMAGES_PDF, post(handlers::create_sheet_handler))
}
