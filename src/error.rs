/// Failure of a single call to the music service.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("Spotify API request failed")]
    Spotify(#[from] rspotify::ClientError),

    #[error("Invalid Spotify ID")]
    InvalidId(#[from] rspotify::model::IdError),

    #[allow(dead_code)]
    #[error("{0}")]
    Other(String),
}

/// Errors of the recommendation pipeline. None of them are retried.
#[derive(thiserror::Error, Debug)]
pub enum RecommendError {
    #[error("Failed to get user's top artists")]
    TopArtistsFetch { source: ClientError },

    #[error("Failed to get user's top tracks")]
    TopTracksFetch { source: ClientError },

    #[error("Failed to get audio features of {track_count} track(s)")]
    FeatureFetch {
        track_count: usize,
        source: ClientError,
    },

    #[error("Failed to get recommendations seeded by {seed}")]
    RecommendationRequest { seed: String, source: ClientError },

    #[error("Failed to resolve {track_count} recommended track(s)")]
    TrackResolution {
        track_count: usize,
        source: ClientError,
    },

    #[error("Failed to resolve album {album_id} of track {track_id}")]
    AlbumResolution {
        album_id: String,
        track_id: String,
        source: ClientError,
    },

    #[error("Recommendations seeded by artist {artist} failed")]
    ForArtist {
        artist: String,
        source: Box<RecommendError>,
    },
}

pub type RecommendResult<T> = Result<T, RecommendError>;
