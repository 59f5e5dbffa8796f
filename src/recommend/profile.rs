use tracing::debug;

use crate::{
    error::{RecommendError, RecommendResult},
    models::{AttributeTarget, AudioFeatureSample, TrackSummary},
};

use super::{
    bias::{attribute_bias, BoundKind},
    client::MusicClient,
    stats::average,
};

/// Builds the attribute window for a listener from their tracks' audio features.
pub async fn summarize_profile<C>(client: &C, tracks: &[TrackSummary]) -> RecommendResult<AttributeTarget>
where
    C: MusicClient + ?Sized,
{
    let features = if tracks.is_empty() {
        debug!("No tracks in profile, skipping audio feature request");
        Vec::new()
    } else {
        let ids: Vec<String> = tracks.iter().map(|t| t.id.clone()).collect();
        client
            .get_audio_features(&ids)
            .await
            .map_err(|source| RecommendError::FeatureFetch {
                track_count: tracks.len(),
                source,
            })?
    };

    let target = target_from_features(&features);
    debug!(samples = features.len(), ?target, "Derived attribute target");
    Ok(target)
}

pub fn target_from_features(features: &[AudioFeatureSample]) -> AttributeTarget {
    let mean = |pick: fn(&AudioFeatureSample) -> f64| {
        average(&features.iter().map(pick).collect::<Vec<_>>())
    };

    let acousticness = mean(|f| f.acousticness);
    let instrumentalness = mean(|f| f.instrumentalness);
    let liveness = mean(|f| f.liveness);
    let energy = mean(|f| f.energy);
    let valence = mean(|f| f.valence);

    AttributeTarget {
        min_acousticness: attribute_bias(&BoundKind::Min, acousticness),
        max_acousticness: attribute_bias(&BoundKind::Max, acousticness),
        min_energy: attribute_bias(&BoundKind::Min, energy),
        max_energy: attribute_bias(&BoundKind::Max, energy),
        min_instrumentalness: attribute_bias(&BoundKind::Min, instrumentalness),
        max_instrumentalness: attribute_bias(&BoundKind::Max, instrumentalness),
        min_liveness: attribute_bias(&BoundKind::Min, liveness),
        max_liveness: attribute_bias(&BoundKind::Max, liveness),
        min_valence: attribute_bias(&BoundKind::Min, valence),
        max_valence: attribute_bias(&BoundKind::Max, valence),
    }
}
