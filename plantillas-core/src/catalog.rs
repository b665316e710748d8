use plantillas_model::{ImagePage, Pagination};
use std::{fmt, sync::Arc};
use tracing::error;

pub use crate::database::ImageFilter;
use crate::{Result, database::ImageRepository};

/// Paginated listings over the image catalog.
#[derive(Clone)]
pub struct ImageCatalogService {
    images: Arc<dyn ImageRepository>,
}

impl fmt::Debug for ImageCatalogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageCatalogService")
            .field("images", &"dyn ImageRepository")
            .finish()
    }
}

impl ImageCatalogService {
    /// Serve listings from `images`.
    pub fn new(images: Arc<dyn ImageRepository>) -> Self {
        Self { images }
    }

    /// Repository the service reads from.
    pub fn repository(&self) -> Arc<dyn ImageRepository> {
        Arc::clone(&self.images)
    }

    /// Count then fetch one page of rows matching `filter`, newest first.
    ///
    /// Fails as a whole when either query fails; partial pages are never
    /// returned.
    pub async fn list(
        &self,
        filter: &ImageFilter,
        pagination: Pagination,
    ) -> Result<ImagePage> {
        let total = self.images.count_images(filter).await.inspect_err(|err| {
            error!(error = %err, ?filter, "failed to count images");
        })?;

        let results = self
            .images
            .list_images(filter, &pagination)
            .await
            .inspect_err(|err| {
                error!(error = %err, ?filter, "failed to list images");
            })?;

        Ok(ImagePage::new(results, pagination, total))
    }

    /// Listing restricted to rows sharing at least one of `tags`. With no
    /// tags this is exactly [`Self::list`] over the whole table.
    pub async fn list_by_hashtags(
        &self,
        tags: Vec<String>,
        pagination: Pagination,
    ) -> Result<ImagePage> {
        self.list(&ImageFilter::from_tags(tags), pagination).await
    }
}
