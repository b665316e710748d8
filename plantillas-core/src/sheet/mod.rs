//! PDF sheets: remote images laid out three per A4 page.

/// Resolution of identifiers into a sheet.
pub mod composer;
/// Remote image downloads.
pub mod fetch;
pub mod layout;
/// PDF serialization.
pub mod render;

pub use composer::{SheetComposer, SheetComposerConfig};
pub use fetch::{HttpImageFetcher, ImageFetcher};
pub use layout::{SheetImage, SheetPage, SheetPlan};
pub use render::render_sheet;
