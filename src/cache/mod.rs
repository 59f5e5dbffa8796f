use anyhow::Result;
use redis::AsyncCommands;
use rspotify::Token;
use tracing::{debug, warn};

const TOKEN_KEY: &str = "spotrec:spotify_token";
const TOKEN_TTL_SECS: u64 = 3600 * 24 * 30;

/// Redis-backed store for the Spotify user token.
///
/// Redis is optional: an unreachable server reads as an empty cache and
/// writes are dropped.
pub struct TokenCache {
    client: redis::Client,
}

impl TokenCache {
    pub fn new(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        Ok(TokenCache { client })
    }

    pub async fn load(&self) -> Option<Token> {
        let mut conn = self.client.get_multiplexed_async_connection().await.ok()?;
        let raw: Option<String> = conn.get(TOKEN_KEY).await.unwrap_or(None);
        match serde_json::from_str::<Token>(&raw?) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!("Cached token is unreadable ({e}), ignoring it");
                None
            }
        }
    }

    pub async fn store(&self, token: &Token) -> Result<()> {
        let json = serde_json::to_string(token)?;
        if let Ok(mut conn) = self.client.get_multiplexed_async_connection().await {
            let stored: redis::RedisResult<()> = conn.set_ex(TOKEN_KEY, json, TOKEN_TTL_SECS).await;
            if let Err(e) = stored {
                debug!("Token not cached: {e}");
            }
        }
        Ok(())
    }

    pub async fn clear(&self) {
        if let Ok(mut conn) = self.client.get_multiplexed_async_connection().await {
            let _: redis::RedisResult<()> = conn.del(TOKEN_KEY).await;
        }
    }

    pub async fn ping(&self) -> bool {
        match self.client.get_multiplexed_async_connection().await {
            Ok(mut conn) => {
                let result: redis::RedisResult<String> =
                    redis::cmd("PING").query_async(&mut conn).await;
                result.is_ok()
            }
            Err(_) => false,
        }
    }
}
