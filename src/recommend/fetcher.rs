use futures::{stream, StreamExt, TryStreamExt};
use tracing::debug;

use crate::{
    error::{RecommendError, RecommendResult},
    models::{CandidateTrack, FullTrack, PageOptions, RecommendationParameters},
};

use super::{client::MusicClient, RecommendSettings};

/// Requests one page of recommendations for `params`, resolves the tracks and
/// their albums, and keeps the ones released in or after `params.from_year`.
///
/// The first failing lookup aborts the whole fetch. Album lookups run up to
/// `settings.album_concurrency` at a time; the output keeps recommendation order.
pub async fn fetch_recommendations<C>(
    client: &C,
    settings: &RecommendSettings,
    params: &RecommendationParameters,
) -> RecommendResult<Vec<CandidateTrack>>
where
    C: MusicClient + ?Sized,
{
    let options = PageOptions {
        limit: settings.page_size,
        offset: 0,
        market: settings.market,
    };

    let page = client
        .get_recommendations(&params.seeds, &params.target, &options)
        .await
        .map_err(|source| RecommendError::RecommendationRequest {
            seed: params.seeds.describe(),
            source,
        })?;

    if page.is_empty() {
        debug!(seeds = %params.seeds.describe(), "Recommendation page is empty");
        return Ok(Vec::new());
    }

    let ids: Vec<String> = page.into_iter().map(|t| t.id).collect();
    let full_tracks = client
        .get_full_tracks(&ids)
        .await
        .map_err(|source| RecommendError::TrackResolution {
            track_count: ids.len(),
            source,
        })?;

    let resolved: Vec<(FullTrack, Option<i32>)> = stream::iter(full_tracks)
        .map(|track| release_year_of(client, track))
        .buffered(settings.album_concurrency.max(1))
        .try_collect()
        .await?;

    let total = resolved.len();
    let tracks: Vec<CandidateTrack> = resolved
        .into_iter()
        .filter_map(|(track, year)| match year {
            Some(release_year) if release_year >= params.from_year => {
                Some(CandidateTrack { track, release_year })
            }
            _ => None,
        })
        .collect();

    debug!(
        kept = tracks.len(),
        discarded = total - tracks.len(),
        from_year = params.from_year,
        "Filtered recommendations by release year"
    );
    if tracks.len() < params.min_track_count {
        debug!(
            "Kept {} track(s), below the desired {}",
            tracks.len(),
            params.min_track_count
        );
    }

    Ok(tracks)
}

async fn release_year_of<C>(client: &C, track: FullTrack) -> RecommendResult<(FullTrack, Option<i32>)>
where
    C: MusicClient + ?Sized,
{
    let album = client
        .get_full_album(&track.album_id)
        .await
        .map_err(|source| RecommendError::AlbumResolution {
            album_id: track.album_id.clone(),
            track_id: track.id.clone(),
            source,
        })?;

    let year = album.release_year();
    if year.is_none() {
        debug!(album = %album.id, date = %album.release_date, "Unparseable album release date");
    }
    Ok((track, year))
}
