use std::{fmt, sync::Arc};

use plantillas_core::{
    HttpImageFetcher, ImageCatalogService, ImageFetcher, ImageRepository,
    PostgresImageRepository, SheetComposer,
};
use sqlx::PgPool;

use crate::infra::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ImageCatalogService>,
    pub sheets: Arc<SheetComposer>,
    pub config: Arc<ServerConfig>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire services over an arbitrary repository and fetcher.
    pub fn new(
        images: Arc<dyn ImageRepository>,
        fetcher: Arc<dyn ImageFetcher>,
        config: ServerConfig,
    ) -> Self {
        let sheets = SheetComposer::new(
            Arc::clone(&images),
            fetcher,
            config.composer_config(),
        );

        Self {
            catalog: Arc::new(ImageCatalogService::new(images)),
            sheets: Arc::new(sheets),
            config: Arc::new(config),
        }
    }

    /// Production wiring: PostgreSQL-backed catalog and HTTP image downloads.
    pub fn from_pool(pool: PgPool, config: ServerConfig) -> anyhow::Result<Self> {
        let fetcher =
            HttpImageFetcher::new(config.fetch_timeout, config.max_image_bytes)?;
        Ok(Self::new(
            Arc::new(PostgresImageRepository::new(pool)),
            Arc::new(fetcher),
            config,
        ))
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
