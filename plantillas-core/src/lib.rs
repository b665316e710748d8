//! # Plantillas Core
//!
//! Query and composition logic behind the Plantillas image catalog service.
//!
//! - [`database`]: the `imagenes` repository port, its PostgreSQL adapter and
//!   the array-literal parser used by the row mapper
//! - [`catalog`]: paginated listings with optional hashtag filtering
//! - [`sheet`]: PDF sheets built from remote images, three per A4 page

/// Paginated listings.
pub mod catalog;
pub mod database;
/// Error type shared by the core services.
pub mod error;
pub mod sheet;

pub use catalog::{ImageCatalogService, ImageFilter};
pub use database::{
    ImageRepository, PostgresImageRepository, pg_array::parse_pg_array,
};
pub use error::{CatalogError, Result};
pub use sheet::{
    HttpImageFetcher, ImageFetcher, SheetComposer, SheetComposerConfig,
};

/// Schema migrations for the `imagenes` table.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
