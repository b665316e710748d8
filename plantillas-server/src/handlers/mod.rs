//! HTTP request handlers organized by functionality

pub mod images;
pub mod sheets;

pub use images::{list_images_by_hashtag_handler, list_images_handler};
pub use sheets::create_sheet_handler;
