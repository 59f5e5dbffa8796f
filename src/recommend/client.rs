use async_trait::async_trait;

use crate::{
    error::ClientError,
    models::{Album, Artist, AttributeTarget, AudioFeatureSample, FullTrack, PageOptions, Seeds, TrackSummary},
};

/// The music-service operations the recommendation pipeline is built on.
///
/// Implementations own transport, authentication and any timeouts. The
/// pipeline never retries a failed call.
#[async_trait]
pub trait MusicClient: Send + Sync {
    /// The current user's top artists, most listened first.
    async fn get_top_artists(&self, limit: u32) -> Result<Vec<Artist>, ClientError>;

    /// The current user's top tracks, service default page.
    async fn get_top_tracks(&self) -> Result<Vec<TrackSummary>, ClientError>;

    /// Audio features for `track_ids`, in request order.
    async fn get_audio_features(
        &self,
        track_ids: &[String],
    ) -> Result<Vec<AudioFeatureSample>, ClientError>;

    /// One page of recommendations anchored on `seeds` and constrained by `target`.
    async fn get_recommendations(
        &self,
        seeds: &Seeds,
        target: &AttributeTarget,
        options: &PageOptions,
    ) -> Result<Vec<TrackSummary>, ClientError>;

    /// Full track objects for `track_ids`, in request order.
    async fn get_full_tracks(&self, track_ids: &[String]) -> Result<Vec<FullTrack>, ClientError>;

    async fn get_full_album(&self, album_id: &str) -> Result<Album, ClientError>;
}
