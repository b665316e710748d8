use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use plantillas_model::{ImageRecord, Pagination};
use sqlx::{
    PgPool, Row,
    postgres::{PgPoolOptions, PgRow},
};
use std::{fmt, time::Duration};
use tracing::{debug, info};

use crate::{
    Result,
    database::{
        pg_array::parse_pg_array,
        ports::{ImageFilter, ImageRepository},
    },
};

// Hashtags are read through their text form so the row mapper owns parsing.
const SELECT_COLUMNS: &str = r#"
    SELECT uuid::text AS uuid,
           url_image,
           url_thumbnail,
           COALESCE(hashtags::text, '{}') AS hashtags,
           xata_createdat,
           size_kb::bigint AS size_kb
    FROM imagenes
"#;

/// Connection pool knobs taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    /// Upper bound on open connections.
    pub max_connections: u32,
    /// How long a caller waits for a free connection.
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Open the shared pool and make sure the database answers.
pub async fn connect_pool(
    database_url: &str,
    settings: PoolSettings,
) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(database_url)
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;

    info!(
        max_connections = settings.max_connections,
        acquire_timeout = ?settings.acquire_timeout,
        "database pool initialized"
    );
    Ok(pool)
}

/// [`ImageRepository`] over a shared `PgPool`.
#[derive(Clone)]
pub struct PostgresImageRepository {
    pool: PgPool,
}

impl fmt::Debug for PostgresImageRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresImageRepository")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .finish()
    }
}

impl PostgresImageRepository {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Map one positional row (id, image url, thumbnail url, hashtag
    /// literal, created-at, size) into a record. Any undecodable column
    /// fails the whole row.
    fn map_image_row(row: &PgRow) -> Result<ImageRecord> {
        let hashtags_raw: String = row.try_get(3)?;
        let created_at: DateTime<Utc> = row.try_get(4)?;

        Ok(ImageRecord {
            id: row.try_get(0)?,
            image_url: row.try_get(1)?,
            thumbnail_url: row.try_get(2)?,
            hashtags: parse_pg_array(&hashtags_raw),
            created_at: created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            size_kb: row.try_get(5)?,
        })
    }
}

#[async_trait]
impl ImageRepository for PostgresImageRepository {
    async fn count_images(&self, filter: &ImageFilter) -> Result<i64> {
        let total = match filter {
            ImageFilter::All => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM imagenes")
                    .fetch_one(&self.pool)
                    .await?
            }
            ImageFilter::AnyHashtag(tags) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM imagenes WHERE hashtags && $1::text[]",
                )
                .bind(tags)
                .fetch_one(&self.pool)
                .await?
            }
        };
        Ok(total)
    }

    async fn list_images(
        &self,
        filter: &ImageFilter,
        pagination: &Pagination,
    ) -> Result<Vec<ImageRecord>> {
        let rows = match filter {
            ImageFilter::All => {
                let sql = format!(
                    "{SELECT_COLUMNS} ORDER BY xata_createdat DESC LIMIT $1 OFFSET $2"
                );
                sqlx::query(&sql)
                    .bind(pagination.limit)
                    .bind(pagination.offset)
                    .fetch_all(&self.pool)
                    .await?
            }
            ImageFilter::AnyHashtag(tags) => {
                let sql = format!(
                    "{SELECT_COLUMNS} WHERE hashtags && $1::text[] \
                     ORDER BY xata_createdat DESC LIMIT $2 OFFSET $3"
                );
                sqlx::query(&sql)
                    .bind(tags)
                    .bind(pagination.limit)
                    .bind(pagination.offset)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        debug!(rows = rows.len(), ?filter, "fetched image rows");

        rows.iter().map(Self::map_image_row).collect()
    }

    async fn find_image_url(&self, id: &str) -> Result<Option<String>> {
        let url = sqlx::query_scalar::<_, String>(
            "SELECT url_image FROM imagenes WHERE uuid = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(url)
    }
}
