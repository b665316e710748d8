//! Persistence for the `imagenes` table.

pub mod pg_array;
/// Repository trait and listing filter.
pub mod ports;
/// PostgreSQL adapter and pool setup.
pub mod postgres;

pub use ports::{ImageFilter, ImageRepository};
pub use postgres::{PoolSettings, PostgresImageRepository, connect_pool};
