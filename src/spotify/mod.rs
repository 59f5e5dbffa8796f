use anyhow::{anyhow, bail, Result};
use rspotify::{
    clients::BaseClient, scopes, AuthCodePkceSpotify, Config as SpotifyConfig, Credentials, OAuth,
    Token,
};
use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::cache::TokenCache;
use crate::config::Config;

pub mod client;

pub use self::client::SpotifyClient;

/// Builds an authorized client from a configured access token or the cached
/// one. Obtaining a fresh authorization is left to other tooling.
pub async fn build_spotify_client(config: &Config, cache: &TokenCache) -> Result<SpotifyClient> {
    let creds = Credentials::new(&config.client_id, &config.client_secret);

    let oauth = OAuth {
        redirect_uri: config.redirect_uri.clone(),
        scopes: scopes!("user-top-read"),
        ..Default::default()
    };

    let sp_config = SpotifyConfig {
        token_refreshing: true,
        ..Default::default()
    };

    let spotify = AuthCodePkceSpotify::with_config(creds, oauth, sp_config);

    let token = match &config.access_token {
        Some(access_token) => {
            info!("Using access token from environment");
            env_token(access_token, config.access_token_expires_at, Utc::now())
        }
        None => match cache.load().await {
            Some(token) => {
                info!("Loaded cached token from Redis");
                token
            }
            None => bail!(
                "No Spotify token available: set SPOTIFY_ACCESS_TOKEN or cache a token in Redis"
            ),
        },
    };

    let needs_refresh = token.is_expired() && token.refresh_token.is_some();
    set_token(&spotify, Some(token)).await?;

    if needs_refresh {
        match spotify.refetch_token().await {
            Ok(Some(fresh)) => {
                info!("Refreshed expired Spotify token");
                cache.store(&fresh).await.ok();
                set_token(&spotify, Some(fresh)).await?;
            }
            Ok(None) => warn!("Token refresh returned nothing, keeping the cached token"),
            Err(e) => {
                warn!("Failed to refresh cached token ({e}), clearing cache");
                set_token(&spotify, None).await?;
                cache.clear().await;
                return Err(anyhow!("Spotify token refresh failed: {e}"));
            }
        }
    }

    Ok(SpotifyClient::new(spotify))
}

/// Wraps a token handed in through the environment.
///
/// Without `expires_at` the real expiry is unknown; the token is assumed to
/// be fresh, i.e. valid for the standard hour from `now`.
pub fn env_token(access_token: &str, expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Token {
    let expires_at = expires_at.unwrap_or(now + Duration::hours(1));
    Token {
        access_token: access_token.to_string(),
        expires_in: (expires_at - now).max(Duration::zero()),
        expires_at: Some(expires_at),
        ..Default::default()
    }
}

async fn set_token(spotify: &AuthCodePkceSpotify, token: Option<Token>) -> Result<()> {
    let mut guard = spotify
        .token
        .lock()
        .await
        .map_err(|_| anyhow!("Spotify token lock is poisoned"))?;
    *guard = token;
    Ok(())
}
