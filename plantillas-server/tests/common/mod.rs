#![allow(dead_code)]

use std::{
    io::Cursor,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use axum_test::TestServer;
use plantillas_core::{
    CatalogError, ImageFetcher, ImageFilter, ImageRepository, Result,
};
use plantillas_model::{ImageRecord, Pagination};
use plantillas_server::{AppState, create_app, infra::config::ServerConfig};

pub const TEST_ORIGIN: &str = "http://localhost:5173";

pub fn record(id: &str, hashtags: &[&str], created_at: &str) -> ImageRecord {
    ImageRecord {
        id: id.to_string(),
        image_url: format!("https://cdn.test/{id}.png"),
        thumbnail_url: format!("https://cdn.test/{id}_thumb.png"),
        hashtags: hashtags.iter().map(|t| t.to_string()).collect(),
        created_at: created_at.to_string(),
        size_kb: 10,
    }
}

/// Five rows, one per day, mirroring the SQL fixture.
pub fn sample_records() -> Vec<ImageRecord> {
    vec![
        record("rec_a", &["mar", "playa"], "2025-03-01T10:00:00Z"),
        record("rec_b", &["montaña"], "2025-03-02T10:00:00Z"),
        record("rec_c", &["mar azul", "playa"], "2025-03-03T10:00:00Z"),
        record("rec_d", &[], "2025-03-04T10:00:00Z"),
        record("rec_e", &["ciudad", "noche"], "2025-03-05T10:00:00Z"),
    ]
}

/// In-memory catalog with the same ordering and overlap semantics as the
/// PostgreSQL adapter.
#[derive(Default)]
pub struct MemoryRepo {
    pub records: Vec<ImageRecord>,
    pub fail: AtomicBool,
    pub lookups: AtomicUsize,
}

impl MemoryRepo {
    pub fn with(records: Vec<ImageRecord>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    fn matching(&self, filter: &ImageFilter) -> Result<Vec<ImageRecord>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CatalogError::Database(sqlx::Error::PoolTimedOut));
        }
        let mut rows: Vec<_> = self
            .records
            .iter()
            .filter(|r| match filter {
                ImageFilter::All => true,
                ImageFilter::AnyHashtag(tags) => {
                    r.hashtags.iter().any(|h| tags.contains(h))
                }
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

#[async_trait]
impl ImageRepository for MemoryRepo {
    async fn count_images(&self, filter: &ImageFilter) -> Result<i64> {
        Ok(self.matching(filter)?.len() as i64)
    }

    async fn list_images(
        &self,
        filter: &ImageFilter,
        pagination: &Pagination,
    ) -> Result<Vec<ImageRecord>> {
        Ok(self
            .matching(filter)?
            .into_iter()
            .skip(pagination.offset as usize)
            .take(pagination.limit as usize)
            .collect())
    }

    async fn find_image_url(&self, id: &str) -> Result<Option<String>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .records
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.image_url.clone()))
    }
}

/// Answers every URL with the same small PNG.
#[derive(Default)]
pub struct PngFetcher {
    pub calls: AtomicUsize,
}

#[async_trait]
impl ImageFetcher for PngFetcher {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(png())
    }
}

pub fn png() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([0, 90, 180]));
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

pub struct TestApp {
    pub server: TestServer,
    pub repo: Arc<MemoryRepo>,
    pub fetcher: Arc<PngFetcher>,
}

pub fn build_test_app(repo: MemoryRepo) -> TestApp {
    let repo = Arc::new(repo);
    let fetcher = Arc::new(PngFetcher::default());
    let config = ServerConfig {
        allowed_origin: TEST_ORIGIN.to_string(),
        ..Default::default()
    };

    let state = AppState::new(repo.clone(), fetcher.clone(), config);
    let server = TestServer::new(create_app(state)).unwrap();

    TestApp {
        server,
        repo,
        fetcher,
    }
}
