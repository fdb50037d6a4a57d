//! Local feed: proximity-ranked items with a regional fallback.

use super::{sort_and_dedup, FeedAggregator};
use crate::models::{
    CandidateItem, FeedType, InteractionSets, RecommendationReason, ScoredCandidate, Viewer,
    ViewerProfile,
};
use crate::services::feed::{FeedStore, RegionFilter};
use crate::services::scoring::haversine_distance;
use crate::services::scoring::skill::shared_skill_count;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::HashSet;
use tracing::info;
use uuid::Uuid;

/// Scaled way down so the jitter only separates exact numeric ties and
/// never reorders distinct radius tiers.
const LOCAL_TIE_JITTER: f64 = 1e-6;

/// Estimated distances when only city/state/country match, not coordinates.
const SAME_CITY_KM: f64 = 10.0;
const SAME_STATE_KM: f64 = 50.0;
const SAME_COUNTRY_KM: f64 = 150.0;

fn fields_match(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a.eq_ignore_ascii_case(b))
}

/// Rough distance for a regional-fallback item, by the most specific
/// matching location field.
fn estimated_distance(profile: &ViewerProfile, item: &CandidateItem) -> f64 {
    if fields_match(&profile.city, &item.author_city) {
        SAME_CITY_KM
    } else if fields_match(&profile.state, &item.author_state) {
        SAME_STATE_KM
    } else {
        SAME_COUNTRY_KM
    }
}

/// Distance- or skill-based label for a local feed item.
fn local_reason(distance_km: Option<f64>, shared_skills: usize) -> RecommendationReason {
    let reason = |text: String, subtext: Option<String>, icon: &str| RecommendationReason {
        text,
        subtext,
        icon: icon.to_string(),
    };

    let Some(d) = distance_km else {
        return reason(
            "Nearby developer".to_string(),
            Some("In your region".to_string()),
            "fa-map-marker",
        );
    };

    let near_subtext = Some(format!("{d:.1} km away"));
    let far_subtext = Some(format!("{d:.0} km away"));

    if d <= 5.0 {
        reason("Very close".to_string(), near_subtext, "fa-map-marker")
    } else if d <= 20.0 {
        reason("Near you".to_string(), near_subtext, "fa-map-marker")
    } else if d <= 50.0 {
        if shared_skills > 0 {
            reason(format!("{shared_skills} shared skills"), near_subtext, "fa-code")
        } else {
            reason("In your area".to_string(), near_subtext, "fa-map-marker")
        }
    } else if d <= 100.0 {
        if shared_skills > 0 {
            reason(format!("{shared_skills} shared skills"), far_subtext, "fa-code")
        } else {
            reason("Same region".to_string(), far_subtext, "fa-globe")
        }
    } else if shared_skills > 0 {
        reason(format!("{shared_skills} shared skills"), far_subtext, "fa-code")
    } else {
        reason("Suggested developer".to_string(), far_subtext, "fa-globe")
    }
}

impl<S: FeedStore> FeedAggregator<S> {
    /// Assemble the local feed in two phases: haversine-ranked items when
    /// the viewer has coordinates, then a regional fallback over matching
    /// city/state/country for everyone else.
    pub async fn local_feed(
        &self,
        viewer: &Viewer,
        sets: &InteractionSets,
        per_page: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<ScoredCandidate>> {
        let mut rng = rand::thread_rng();
        let mut scored: Vec<ScoredCandidate> = Vec::new();

        let mut nearby_count = 0;
        if let Some(origin) = viewer.profile.coordinate {
            let nearby = self
                .store
                .located_items(viewer.id, per_page * self.config.fetch.nearby_overfetch)
                .await?;
            nearby_count = nearby.len();

            for item in nearby {
                let distance_km = item
                    .author_coordinate
                    .map(|author| haversine_distance(origin, author));
                scored.push(self.score_local_candidate(
                    item,
                    distance_km,
                    viewer,
                    sets,
                    now,
                    &mut rng,
                ));
            }
        }

        let filter = RegionFilter::from_profile(&viewer.profile);
        let mut regional_count = 0;
        if !filter.is_empty() {
            let already_scored: HashSet<Uuid> = scored.iter().map(|c| c.item.id).collect();
            let regional = self
                .store
                .regional_items(
                    &filter,
                    viewer.id,
                    &already_scored,
                    per_page * self.config.fetch.regional_overfetch,
                )
                .await?;
            regional_count = regional.len();

            for item in regional {
                let distance_km = Some(estimated_distance(&viewer.profile, &item));
                scored.push(self.score_local_candidate(
                    item,
                    distance_km,
                    viewer,
                    sets,
                    now,
                    &mut rng,
                ));
            }
        }

        let ranked = sort_and_dedup(scored);

        info!(
            viewer = %viewer.id,
            nearby_count,
            regional_count,
            ranked_count = ranked.len(),
            "local feed assembled"
        );

        Ok(ranked)
    }

    fn score_local_candidate(
        &self,
        item: CandidateItem,
        distance_km: Option<f64>,
        viewer: &Viewer,
        sets: &InteractionSets,
        now: DateTime<Utc>,
        rng: &mut impl Rng,
    ) -> ScoredCandidate {
        let (score, interaction) =
            self.scorer
                .score_local(&item, &viewer.profile.skills, distance_km, sets, now);
        let shared = shared_skill_count(&viewer.profile.skills, &item.author_skills);
        let recommendation_reason = Some(local_reason(distance_km, shared));

        ScoredCandidate {
            item,
            score,
            feed_type: FeedType::Local,
            is_secondary_network: false,
            tie_break: rng.gen::<f64>() * LOCAL_TIE_JITTER,
            interaction,
            recommendation_reason,
            distance_km,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_for_unknown_distance() {
        let r = local_reason(None, 3);
        assert_eq!(r.text, "Nearby developer");
        assert_eq!(r.subtext.as_deref(), Some("In your region"));
        assert_eq!(r.icon, "fa-map-marker");
    }

    #[test]
    fn reason_tiers_by_distance() {
        assert_eq!(local_reason(Some(3.2), 0).text, "Very close");
        assert_eq!(local_reason(Some(12.0), 0).text, "Near you");
        assert_eq!(local_reason(Some(35.0), 0).text, "In your area");
        assert_eq!(local_reason(Some(80.0), 0).text, "Same region");
        assert_eq!(local_reason(Some(300.0), 0).text, "Suggested developer");
    }

    #[test]
    fn shared_skills_override_far_tiers_only() {
        assert_eq!(local_reason(Some(12.0), 4).text, "Near you");
        assert_eq!(local_reason(Some(35.0), 4).text, "4 shared skills");
        assert_eq!(local_reason(Some(80.0), 4).text, "4 shared skills");
        assert_eq!(local_reason(Some(300.0), 4).text, "4 shared skills");
        assert_eq!(local_reason(Some(300.0), 4).icon, "fa-code");
    }

    #[test]
    fn subtext_precision_switches_at_fifty_km() {
        assert_eq!(local_reason(Some(3.25), 0).subtext.as_deref(), Some("3.2 km away"));
        assert_eq!(local_reason(Some(80.6), 0).subtext.as_deref(), Some("81 km away"));
    }

    #[test]
    fn estimated_distance_prefers_most_specific_match() {
        let profile = ViewerProfile {
            city: Some("Porto".to_string()),
            state: Some("Norte".to_string()),
            country: Some("Portugal".to_string()),
            ..Default::default()
        };
        let mut item = super::super::test_support::item(Uuid::new_v4(), 5);

        item.author_city = Some("PORTO".to_string());
        item.author_state = Some("Norte".to_string());
        assert_eq!(estimated_distance(&profile, &item), SAME_CITY_KM);

        item.author_city = Some("Lisbon".to_string());
        assert_eq!(estimated_distance(&profile, &item), SAME_STATE_KM);

        item.author_state = None;
        assert_eq!(estimated_distance(&profile, &item), SAME_COUNTRY_KM);
    }
}
