use async_trait::async_trait;
use plantillas_model::{ImageRecord, Pagination};

use crate::Result;

/// Which rows of `imagenes` a listing covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageFilter {
    /// Every row.
    #[default]
    All,
    /// Rows whose `hashtags` share at least one element with the set.
    AnyHashtag(Vec<String>),
}

impl ImageFilter {
    /// An empty tag list means "no filter", not "match nothing".
    pub fn from_tags(tags: Vec<String>) -> Self {
        if tags.is_empty() {
            Self::All
        } else {
            Self::AnyHashtag(tags)
        }
    }
}

/// Read-only access to the image catalog table.
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Number of rows matching `filter`.
    async fn count_images(&self, filter: &ImageFilter) -> Result<i64>;

    /// Rows newest first, bounded by the pagination window.
    async fn list_images(
        &self,
        filter: &ImageFilter,
        pagination: &Pagination,
    ) -> Result<Vec<ImageRecord>>;

    /// Full-size image URL for one record, `None` when the id is unknown.
    async fn find_image_url(&self, id: &str) -> Result<Option<String>>;
}
