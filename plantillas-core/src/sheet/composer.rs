use futures::{StreamExt, stream};
use std::{fmt, sync::Arc};
use tracing::{info, warn};

use crate::{
    CatalogError, Result,
    database::ImageRepository,
    sheet::{
        fetch::ImageFetcher,
        layout::{SheetImage, SheetPlan},
        render::render_sheet,
    },
};

/// Tuning for [`SheetComposer`].
#[derive(Debug, Clone, Copy)]
pub struct SheetComposerConfig {
    /// Entries resolved at the same time. Results are still placed by
    /// request order.
    pub fetch_concurrency: usize,
}

impl Default for SheetComposerConfig {
    fn default() -> Self {
        Self {
            fetch_concurrency: 4,
        }
    }
}

/// Builds a PDF sheet from an ordered list of catalog ids.
pub struct SheetComposer {
    images: Arc<dyn ImageRepository>,
    fetcher: Arc<dyn ImageFetcher>,
    config: SheetComposerConfig,
}

impl fmt::Debug for SheetComposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetComposer")
            .field("images", &"dyn ImageRepository")
            .field("fetcher", &"dyn ImageFetcher")
            .field("config", &self.config)
            .finish()
    }
}

impl SheetComposer {
    /// Compose over the given catalog and downloader.
    pub fn new(
        images: Arc<dyn ImageRepository>,
        fetcher: Arc<dyn ImageFetcher>,
        config: SheetComposerConfig,
    ) -> Self {
        Self {
            images,
            fetcher,
            config,
        }
    }

    /// Resolve every id and render the resulting sheet.
    ///
    /// Unknown ids and failed downloads are logged and leave their slot
    /// blank; only an empty request or a rendering failure is an error.
    pub async fn compose(&self, ids: &[String]) -> Result<Vec<u8>> {
        if ids.is_empty() {
            return Err(CatalogError::InvalidInput(
                "no identifiers supplied".into(),
            ));
        }

        let plan = self.plan(ids).await;
        info!(
            requested = ids.len(),
            placed = plan.placed(),
            pages = plan.pages().len(),
            "composing image sheet"
        );

        tokio::task::spawn_blocking(move || render_sheet(plan))
            .await
            .map_err(|e| {
                CatalogError::Internal(format!("PDF render task failed: {}", e))
            })?
    }

    /// Resolve every id into its slot without rendering.
    pub async fn plan(&self, ids: &[String]) -> SheetPlan {
        let concurrency = self.config.fetch_concurrency.max(1);

        // `buffered` yields in input order regardless of completion order.
        let entries = stream::iter(ids.iter().cloned().enumerate())
            .map(|(index, id)| async move { self.resolve(index, &id).await })
            .buffered(concurrency)
            .collect::<Vec<_>>()
            .await;

        SheetPlan::from_entries(entries)
    }

    async fn resolve(&self, index: usize, id: &str) -> Option<SheetImage> {
        let url = match self.images.find_image_url(id).await {
            Ok(Some(url)) => url,
            Ok(None) => {
                warn!(index, id, "image id not found, leaving slot empty");
                return None;
            }
            Err(err) => {
                warn!(index, id, error = %err, "image lookup failed, leaving slot empty");
                return None;
            }
        };

        match self.fetcher.fetch(&url).await {
            Ok(bytes) => Some(SheetImage {
                id: id.to_string(),
                bytes,
            }),
            Err(err) => {
                warn!(index, id, %url, error = %err, "image download failed, leaving slot empty");
                None
            }
        }
    }
}
