//! Global feed: the whole corpus minus the viewer's own items.

use super::{sort_and_dedup, FeedAggregator};
use crate::models::{FeedType, InteractionSets, ScoredCandidate, Viewer};
use crate::services::feed::FeedStore;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::info;

impl<S: FeedStore> FeedAggregator<S> {
    /// Assemble the global feed. The store bounds the candidate set by
    /// recency before scoring; no recommendation labels here.
    pub async fn global_feed(
        &self,
        viewer: &Viewer,
        sets: &InteractionSets,
        per_page: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<ScoredCandidate>> {
        let items = self
            .store
            .recent_items(viewer.id, per_page * self.config.fetch.global_overfetch)
            .await?;
        let fetched_count = items.len();

        let mut rng = rand::thread_rng();
        let mut scored = Vec::with_capacity(fetched_count);
        for item in items {
            let (score, interaction) = self.scorer.score_network(&item, sets, false, now);
            scored.push(ScoredCandidate {
                item,
                score,
                feed_type: FeedType::Global,
                is_secondary_network: false,
                tie_break: rng.gen(),
                interaction,
                recommendation_reason: None,
                distance_km: None,
            });
        }

        let ranked = sort_and_dedup(scored);

        info!(
            viewer = %viewer.id,
            fetched_count,
            ranked_count = ranked.len(),
            "global feed assembled"
        );

        Ok(ranked)
    }
}
