use std::fmt::Display;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:8000,http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) database_url: String,
    pub(crate) database_max_connections: u32,
    pub(crate) http_addr: String,
    pub(crate) cors_origins: Vec<String>,
    pub(crate) log_level: String,
    pub(crate) http_request_body_limit_bytes: usize,
    pub(crate) http_concurrency_limit: usize,
    pub(crate) http_request_timeout_secs: u64,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        let database_url = get_required("DATABASE_URL").context("DATABASE_URL is required")?;
        let database_max_connections = positive_env("DATABASE_MAX_CONNECTIONS", 10u32)?;

        let http_addr = std::env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let cors_origins = parse_cors_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
        );
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());

        let http_request_body_limit_bytes =
            positive_env("HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024usize)?;
        let http_concurrency_limit = positive_env("HTTP_CONCURRENCY_LIMIT", 256usize)?;
        let http_request_timeout_secs = positive_env("HTTP_REQUEST_TIMEOUT_SECS", 10u64)?;

        Ok(Self {
            database_url,
            database_max_connections,
            http_addr,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
        })
    }
}

fn get_required(key: &str) -> Result<String> {
    let value = std::env::var(key)?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_cors_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn positive_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr + Display + PartialEq + Default,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_positive(key, std::env::var(key).ok().as_deref(), default)
}

fn parse_positive<T>(key: &str, raw: Option<&str>, default: T) -> Result<T>
where
    T: FromStr + Display + PartialEq + Default,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = match raw {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?,
        None => default,
    };

    if value == T::default() {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{parse_cors_origins, parse_positive};

    #[test]
    fn cors_origins_are_trimmed_and_blank_entries_dropped() {
        let origins = parse_cors_origins(" http://a.test , ,http://b.test,");
        assert_eq!(origins, ["http://a.test", "http://b.test"]);
    }

    #[test]
    fn parse_positive_falls_back_to_default() {
        let value = parse_positive("HTTP_CONCURRENCY_LIMIT", None, 256usize).expect("default");
        assert_eq!(value, 256);
    }

    #[test]
    fn parse_positive_reads_raw_value() {
        let value = parse_positive("HTTP_REQUEST_TIMEOUT_SECS", Some(" 30 "), 10u64)
            .expect("must parse");
        assert_eq!(value, 30);
    }

    #[test]
    fn parse_positive_rejects_zero_and_garbage() {
        assert!(parse_positive("DATABASE_MAX_CONNECTIONS", Some("0"), 10u32).is_err());
        assert!(parse_positive("DATABASE_MAX_CONNECTIONS", Some("many"), 10u32).is_err());
        assert!(parse_positive("DATABASE_MAX_CONNECTIONS", Some("-1"), 10u32).is_err());
    }
}
