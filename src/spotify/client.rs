use async_trait::async_trait;
use rspotify::{
    model::{AlbumId, ArtistId, RecommendationsAttribute, TrackId},
    prelude::*,
    AuthCodePkceSpotify,
};
use tracing::debug;

use crate::{
    error::ClientError,
    models::{Album, Artist, AttributeTarget, AudioFeatureSample, FullTrack, PageOptions, Seeds, TrackSummary},
    recommend::client::MusicClient,
};

// Per-request ID limits of the Web API
const FEATURES_BATCH: usize = 100;
const TRACKS_BATCH: usize = 50;

/// `MusicClient` over the Spotify Web API.
#[derive(Clone)]
pub struct SpotifyClient {
    spotify: AuthCodePkceSpotify,
}

impl SpotifyClient {
    pub fn new(spotify: AuthCodePkceSpotify) -> Self {
        SpotifyClient { spotify }
    }
}

fn track_ids(ids: &[String]) -> Result<Vec<TrackId<'_>>, ClientError> {
    Ok(ids
        .iter()
        .map(|id| TrackId::from_id(id.as_str()))
        .collect::<Result<_, _>>()?)
}

pub(crate) fn attributes(target: &AttributeTarget) -> Vec<RecommendationsAttribute> {
    vec![
        RecommendationsAttribute::MinAcousticness(target.min_acousticness as f32),
        RecommendationsAttribute::MaxAcousticness(target.max_acousticness as f32),
        RecommendationsAttribute::MinEnergy(target.min_energy as f32),
        RecommendationsAttribute::MaxEnergy(target.max_energy as f32),
        RecommendationsAttribute::MinInstrumentalness(target.min_instrumentalness as f32),
        RecommendationsAttribute::MaxInstrumentalness(target.max_instrumentalness as f32),
        RecommendationsAttribute::MinLiveness(target.min_liveness as f32),
        RecommendationsAttribute::MaxLiveness(target.max_liveness as f32),
        RecommendationsAttribute::MinValence(target.min_valence as f32),
        RecommendationsAttribute::MaxValence(target.max_valence as f32),
    ]
}

pub(crate) fn full_track(track: rspotify::model::FullTrack) -> Option<FullTrack> {
    let id = track.id.as_ref()?;
    let album_id = track.album.id.as_ref()?;
    Some(FullTrack {
        id: id.id().to_string(),
        name: track.name.clone(),
        artists: track.artists.iter().map(|a| a.name.clone()).collect(),
        album_id: album_id.id().to_string(),
        album_name: track.album.name.clone(),
        uri: id.uri(),
        duration_ms: track.duration.num_milliseconds() as u32,
        popularity: track.popularity,
    })
}

#[async_trait]
impl MusicClient for SpotifyClient {
    async fn get_top_artists(&self, limit: u32) -> Result<Vec<Artist>, ClientError> {
        let page = self
            .spotify
            .current_user_top_artists_manual(None, Some(limit), None)
            .await?;
        Ok(page
            .items
            .into_iter()
            .map(|a| Artist {
                id: a.id.id().to_string(),
                name: a.name,
            })
            .collect())
    }

    async fn get_top_tracks(&self) -> Result<Vec<TrackSummary>, ClientError> {
        let page = self
            .spotify
            .current_user_top_tracks_manual(None, None, None)
            .await?;
        Ok(page
            .items
            .into_iter()
            .filter_map(|t| {
                let id = t.id?;
                Some(TrackSummary {
                    id: id.id().to_string(),
                    name: t.name,
                })
            })
            .collect())
    }

    async fn get_audio_features(
        &self,
        track_ids_in: &[String],
    ) -> Result<Vec<AudioFeatureSample>, ClientError> {
        let ids = track_ids(track_ids_in)?;
        let mut samples = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(FEATURES_BATCH) {
            let features = self.spotify.tracks_features(chunk.iter().cloned()).await?;
            samples.extend(features.unwrap_or_default().into_iter().map(|f| {
                AudioFeatureSample {
                    acousticness: f64::from(f.acousticness),
                    instrumentalness: f64::from(f.instrumentalness),
                    liveness: f64::from(f.liveness),
                    energy: f64::from(f.energy),
                    valence: f64::from(f.valence),
                }
            }));
        }
        Ok(samples)
    }

    async fn get_recommendations(
        &self,
        seeds: &Seeds,
        target: &AttributeTarget,
        options: &PageOptions,
    ) -> Result<Vec<TrackSummary>, ClientError> {
        let seed_artists = seeds
            .artists
            .iter()
            .map(|id| ArtistId::from_id(id.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        let seed_tracks = track_ids(&seeds.tracks)?;
        let seed_genres: Vec<&str> = seeds.genres.iter().map(String::as_str).collect();

        // The endpoint has no offset parameter, only first pages are requested
        debug!(limit = options.limit, offset = options.offset, seeds = %seeds.describe(), "Requesting recommendations");
        let recommendations = self
            .spotify
            .recommendations(
                attributes(target),
                (!seed_artists.is_empty()).then_some(seed_artists),
                (!seed_genres.is_empty()).then_some(seed_genres),
                (!seed_tracks.is_empty()).then_some(seed_tracks),
                Some(options.market),
                Some(options.limit),
            )
            .await?;

        Ok(recommendations
            .tracks
            .into_iter()
            .filter_map(|t| {
                let id = t.id?;
                Some(TrackSummary {
                    id: id.id().to_string(),
                    name: t.name,
                })
            })
            .collect())
    }

    async fn get_full_tracks(&self, ids_in: &[String]) -> Result<Vec<FullTrack>, ClientError> {
        let ids = track_ids(ids_in)?;
        let mut tracks = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(TRACKS_BATCH) {
            let page = self.spotify.tracks(chunk.iter().cloned(), None).await?;
            for track in page {
                let name = track.name.clone();
                match full_track(track) {
                    Some(t) => tracks.push(t),
                    None => debug!("Skipping track {name} without track or album ID"),
                }
            }
        }
        Ok(tracks)
    }

    async fn get_full_album(&self, album_id: &str) -> Result<Album, ClientError> {
        let album = self.spotify.album(AlbumId::from_id(album_id)?, None).await?;
        Ok(Album {
            id: album.id.id().to_string(),
            name: album.name,
            release_date: album.release_date,
        })
    }
}
