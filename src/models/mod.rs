use rspotify::model::Market;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

/// A track as listed by top-tracks and recommendation pages: enough to look
/// it up again.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub struct TrackSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album_id: String,
    pub album_name: String,
    pub uri: String,
    pub duration_ms: u32,
    pub popularity: u32,
}

#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub struct Album {
    pub id: String,
    pub name: String,
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`, depending on the release's precision.
    pub release_date: String,
}

impl Album {
    pub fn release_year(&self) -> Option<i32> {
        let year = self.release_date.get(..4)?;
        if !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        year.parse().ok()
    }
}

/// Per-track audio features, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AudioFeatureSample {
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub energy: f64,
    pub valence: f64,
}

/// Min/max window per audio feature sent along with a recommendation request.
///
/// `min <= max` holds for everything built by the profile summarizer but is
/// not checked here.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttributeTarget {
    pub min_acousticness: f64,
    pub max_acousticness: f64,
    pub min_energy: f64,
    pub max_energy: f64,
    pub min_instrumentalness: f64,
    pub max_instrumentalness: f64,
    pub min_liveness: f64,
    pub max_liveness: f64,
    pub min_valence: f64,
    pub max_valence: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Seeds {
    pub artists: Vec<String>,
    pub tracks: Vec<String>,
    pub genres: Vec<String>,
}

impl Seeds {
    pub fn artist(id: impl Into<String>) -> Self {
        Seeds {
            artists: vec![id.into()],
            ..Default::default()
        }
    }

    pub fn describe(&self) -> String {
        self.artists
            .iter()
            .map(|a| format!("artist:{a}"))
            .chain(self.tracks.iter().map(|t| format!("track:{t}")))
            .chain(self.genres.iter().map(|g| format!("genre:{g}")))
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageOptions {
    pub limit: u32,
    pub offset: u32,
    pub market: Market,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationParameters {
    pub seeds: Seeds,
    pub target: AttributeTarget,
    pub from_year: i32,
    /// Carried for reporting only; a fetch never pages past the first page.
    pub min_track_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub struct CandidateTrack {
    pub track: FullTrack,
    pub release_year: i32,
}
