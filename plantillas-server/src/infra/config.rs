use anyhow::{Context, anyhow};
use clap::Args;
use plantillas_core::{SheetComposerConfig, database::PoolSettings};
use std::{net::SocketAddr, time::Duration};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_DB_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;
pub const DEFAULT_FETCH_CONCURRENCY: usize = 4;
pub const DEFAULT_MAX_PAGE_LIMIT: i64 = 100;

/// Legacy variable still set by older deployments.
const XATA_DATABASE_URL_ENV: &str = "XATA_DATABASE_URL";

/// Runtime settings. Every flag can also come from the environment (and so
/// from a `.env` file).
#[derive(Args, Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// PostgreSQL connection string (falls back to XATA_DATABASE_URL)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Comma-separated list of origins allowed by CORS
    #[arg(long, env = "ALLOWED_ORIGIN", default_value = DEFAULT_ALLOWED_ORIGIN)]
    pub allowed_origin: String,

    /// Maximum pooled database connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = DEFAULT_DB_MAX_CONNECTIONS)]
    pub db_max_connections: u32,

    /// How long a request waits for a pooled connection (e.g. "5s")
    #[arg(long, env = "DB_ACQUIRE_TIMEOUT", default_value = "5s", value_parser = humantime::parse_duration)]
    pub db_acquire_timeout: Duration,

    /// Timeout for each remote image download (e.g. "15s")
    #[arg(long, env = "IMAGE_FETCH_TIMEOUT", default_value = "15s", value_parser = humantime::parse_duration)]
    pub fetch_timeout: Duration,

    /// Largest remote image accepted, in bytes
    #[arg(long, env = "IMAGE_MAX_BYTES", default_value_t = DEFAULT_MAX_IMAGE_BYTES)]
    pub max_image_bytes: usize,

    /// Remote images downloaded in parallel per sheet
    #[arg(long, env = "IMAGE_FETCH_CONCURRENCY", default_value_t = DEFAULT_FETCH_CONCURRENCY)]
    pub fetch_concurrency: usize,

    /// Upper bound applied to the `limit` query parameter
    #[arg(long, env = "MAX_PAGE_LIMIT", default_value_t = DEFAULT_MAX_PAGE_LIMIT)]
    pub max_page_limit: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: None,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            db_acquire_timeout: DEFAULT_DB_ACQUIRE_TIMEOUT,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            max_page_limit: DEFAULT_MAX_PAGE_LIMIT,
        }
    }
}

impl ServerConfig {
    pub fn allowed_origins(&self) -> Vec<String> {
        parse_origins(&self.allowed_origin)
    }

    /// Connection string from `--database-url`/`DATABASE_URL`, then
    /// `XATA_DATABASE_URL`.
    pub fn resolve_database_url(&self) -> anyhow::Result<String> {
        let fallback = std::env::var(XATA_DATABASE_URL_ENV).ok();
        pick_database_url(self.database_url.as_deref(), fallback.as_deref())
            .ok_or_else(|| {
                anyhow!(
                    "no database configured: set DATABASE_URL or {XATA_DATABASE_URL_ENV}"
                )
            })
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| {
                format!("invalid listen address {}:{}", self.host, self.port)
            })
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections.max(1),
            acquire_timeout: self.db_acquire_timeout,
        }
    }

    pub fn composer_config(&self) -> SheetComposerConfig {
        SheetComposerConfig {
            fetch_concurrency: self.fetch_concurrency.max(1),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn pick_database_url(
    primary: Option<&str>,
    fallback: Option<&str>,
) -> Option<String> {
    [primary, fallback]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        config: ServerConfig,
    }

    fn parse(args: &[&str]) -> ServerConfig {
        let mut argv = vec!["plantillas-server"];
        argv.extend_from_slice(args);
        TestCli::try_parse_from(argv).unwrap().config
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        let config = ServerConfig {
            allowed_origin: "https://a.example, https://b.example ,,".into(),
            ..Default::default()
        };
        assert_eq!(
            config.allowed_origins(),
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn flags_override_defaults() {
        let config = parse(&[
            "--port",
            "9090",
            "--fetch-timeout",
            "2s",
            "--max-page-limit",
            "50",
            "--database-url",
            "postgres://u:p@db/imagenes",
        ]);
        assert_eq!(config.port, 9090);
        assert_eq!(config.fetch_timeout, Duration::from_secs(2));
        assert_eq!(config.max_page_limit, 50);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://u:p@db/imagenes")
        );
    }

    #[test]
    fn invalid_duration_is_rejected() {
        let result = TestCli::try_parse_from([
            "plantillas-server",
            "--db-acquire-timeout",
            "soon",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn database_url_prefers_primary_then_fallback() {
        assert_eq!(
            pick_database_url(Some("postgres://a"), Some("postgres://b")),
            Some("postgres://a".to_string())
        );
        assert_eq!(
            pick_database_url(Some("  "), Some("postgres://b")),
            Some("postgres://b".to_string())
        );
        assert_eq!(pick_database_url(None, None), None);
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 3001,
            ..Default::default()
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:3001");
    }

    #[test]
    fn zero_concurrency_is_raised_to_one() {
        let config = ServerConfig {
            fetch_concurrency: 0,
            ..Default::default()
        };
        assert_eq!(config.composer_config().fetch_concurrency, 1);
    }
}
