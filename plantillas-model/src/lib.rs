//! Core data model definitions shared across Plantillas crates.
#![allow(missing_docs)]

pub mod image;
pub mod pagination;
pub mod sheet;

pub use image::{ImagePage, ImageRecord};
pub use pagination::{
    DEFAULT_LIMIT, DEFAULT_PAGE, PageParams, Pagination, total_pages,
};
pub use sheet::SheetRequest;
