pub mod bias;
pub mod client;
pub mod fetcher;
pub mod profile;
pub mod stats;

use rspotify::model::Market;
use tracing::info;

use crate::{
    error::{RecommendError, RecommendResult},
    models::{FullTrack, RecommendationParameters, Seeds},
};

use self::{client::MusicClient, fetcher::fetch_recommendations, profile::summarize_profile};

pub const DEFAULT_FROM_YEAR: i32 = 2016;
pub const DEFAULT_MIN_TRACK_COUNT: usize = 100;
pub const DEFAULT_TOP_ARTIST_LIMIT: u32 = 5;
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Knobs of a recommendation session.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendSettings {
    /// Market every recommendation request is scoped to.
    pub market: Market,
    pub page_size: u32,
    pub top_artist_limit: u32,
    pub from_year: i32,
    pub min_track_count: usize,
    /// Album lookups in flight per fetch. `1` resolves them one by one.
    pub album_concurrency: usize,
}

impl Default for RecommendSettings {
    fn default() -> Self {
        RecommendSettings {
            market: Market::FromToken,
            page_size: DEFAULT_PAGE_SIZE,
            top_artist_limit: DEFAULT_TOP_ARTIST_LIMIT,
            from_year: DEFAULT_FROM_YEAR,
            min_track_count: DEFAULT_MIN_TRACK_COUNT,
            album_concurrency: 1,
        }
    }
}

pub struct Recommender<C> {
    client: C,
    settings: RecommendSettings,
}

impl<C: MusicClient> Recommender<C> {
    pub fn new(client: C, settings: RecommendSettings) -> Self {
        Recommender { client, settings }
    }

    #[cfg(test)]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Recommends tracks seeded by each of the user's top artists in turn,
    /// all constrained by one attribute window derived from their top tracks.
    ///
    /// Fails on the first error; no partial results are returned.
    pub async fn recommend(&self) -> RecommendResult<Vec<FullTrack>> {
        let top_artists = self
            .client
            .get_top_artists(self.settings.top_artist_limit)
            .await
            .map_err(|source| RecommendError::TopArtistsFetch { source })?;

        let top_tracks = self
            .client
            .get_top_tracks()
            .await
            .map_err(|source| RecommendError::TopTracksFetch { source })?;

        let target = summarize_profile(&self.client, &top_tracks).await?;

        let mut tracks = Vec::new();
        for artist in &top_artists {
            info!("Fetching recommendations seeded by artist {}", artist.name);

            let params = RecommendationParameters {
                seeds: Seeds::artist(artist.id.clone()),
                target,
                from_year: self.settings.from_year,
                min_track_count: self.settings.min_track_count,
            };

            let page = fetch_recommendations(&self.client, &self.settings, &params)
                .await
                .map_err(|e| RecommendError::ForArtist {
                    artist: artist.name.clone(),
                    source: Box::new(e),
                })?;

            info!("Fetched {} recommendations seeded by artist {}", page.len(), artist.name);
            tracks.extend(page.into_iter().map(|c| c.track));
        }

        info!(
            artists = top_artists.len(),
            tracks = tracks.len(),
            "Recommendation session complete"
        );
        Ok(tracks)
    }
}
