use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use dotenvy::dotenv;
use rspotify::model::{enums::Country, Market};
use std::str::FromStr;

use crate::recommend::RecommendSettings;

#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub access_token: Option<String>,
    /// Expiry of `access_token`, when known.
    pub access_token_expires_at: Option<DateTime<Utc>>,
    pub redis_url: String,
    pub recommend: RecommendSettings,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenv().ok(); // Try loading .env file, ignore if it doesn't exist (e.g. env vars set manually)

        let defaults = RecommendSettings::default();
        let market = std::env::var("SPOTIFY_MARKET").unwrap_or_else(|_| "from_token".to_string());

        Ok(Config {
            client_id: std::env::var("SPOTIFY_CLIENT_ID")
                .context("SPOTIFY_CLIENT_ID is missing from .env or environment")?,
            client_secret: std::env::var("SPOTIFY_CLIENT_SECRET")
                .context("SPOTIFY_CLIENT_SECRET is missing from .env or environment")?,
            redirect_uri: std::env::var("SPOTIFY_REDIRECT_URI")
                .unwrap_or_else(|_| "http://127.0.0.1:8989/login".to_string()),
            access_token: std::env::var("SPOTIFY_ACCESS_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            access_token_expires_at: std::env::var("SPOTIFY_TOKEN_EXPIRES_AT")
                .ok()
                .map(|raw| parse_expiry(&raw))
                .transpose()?,
            redis_url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            recommend: RecommendSettings {
                market: parse_market(&market)?,
                page_size: env_or("SPOT_PAGE_SIZE", defaults.page_size)?,
                top_artist_limit: env_or("SPOT_TOP_ARTIST_LIMIT", defaults.top_artist_limit)?,
                from_year: env_or("SPOT_FROM_YEAR", defaults.from_year)?,
                min_track_count: env_or("SPOT_MIN_TRACK_COUNT", defaults.min_track_count)?,
                album_concurrency: env_or("SPOT_ALBUM_CONCURRENCY", defaults.album_concurrency)?,
            },
        })
    }
}

fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("Invalid value {raw:?} for {name}: {e}")),
        Err(_) => Ok(default),
    }
}

/// Parses an ISO 3166-1 alpha-2 code (`SE`, `us`, ...) or `from_token`.
pub fn parse_market(code: &str) -> Result<Market> {
    let code = code.trim();
    if code.eq_ignore_ascii_case("from_token") {
        return Ok(Market::FromToken);
    }
    // Country only knows its codes through its serde renames
    let country: Country =
        serde_json::from_value(serde_json::Value::String(code.to_ascii_uppercase()))
            .with_context(|| format!("Unknown market code {code:?}"))?;
    Ok(Market::Country(country))
}

/// Parses an RFC 3339 timestamp such as `2026-10-17T12:00:00Z`.
pub fn parse_expiry(raw: &str) -> Result<DateTime<Utc>> {
    let at = DateTime::parse_from_rfc3339(raw.trim())
        .with_context(|| format!("Invalid SPOTIFY_TOKEN_EXPIRES_AT {raw:?}"))?;
    Ok(at.with_timezone(&Utc))
}
