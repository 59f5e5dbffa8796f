mod cache;
mod config;
mod error;
mod models;
mod recommend;
mod spotify;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    cache::TokenCache,
    config::Config,
    recommend::Recommender,
    spotify::build_spotify_client,
};

#[tokio::main]
async fn main() -> Result<()> {
    // ── Logging setup ────────────────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("spotrec=info"));
    // stdout carries the recommendations, logs go to stderr
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // anyhow reports the full cause chain on exit
    run().await
}

async fn run() -> Result<()> {
    // ── Load config ──────────────────────────────────────────────────────────
    let config = Config::load()?;

    // ── Token cache (optional — works with SPOTIFY_ACCESS_TOKEN alone) ───────
    let cache = TokenCache::new(&config.redis_url)?;
    if cache.ping().await {
        info!("Redis connected at {}", config.redis_url);
    } else {
        warn!("Redis not reachable — token cache disabled");
    }

    // ── Spotify client ───────────────────────────────────────────────────────
    let client = build_spotify_client(&config, &cache).await?;

    // ── Recommend ────────────────────────────────────────────────────────────
    let recommender = Recommender::new(client, config.recommend.clone());
    let tracks = recommender
        .recommend()
        .await
        .context("Failed to build recommendations")?;

    println!("{}", serde_json::to_string_pretty(&tracks)?);
    Ok(())
}
