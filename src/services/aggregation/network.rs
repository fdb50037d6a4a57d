//! Network feed: direct follows plus friend-of-friend suggestions.

use super::{sort_and_dedup, FeedAggregator};
use crate::models::{
    FeedType, InteractionSets, RecommendationReason, ScoredCandidate, Viewer,
};
use crate::services::feed::FeedStore;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::HashSet;
use tracing::info;
use uuid::Uuid;

fn reason(text: impl Into<String>, subtext: Option<&str>, icon: &str) -> RecommendationReason {
    RecommendationReason {
        text: text.into(),
        subtext: subtext.map(str::to_string),
        icon: icon.to_string(),
    }
}

impl<S: FeedStore> FeedAggregator<S> {
    /// Assemble the network feed: primary-network items ranked as-is,
    /// secondary-network items dampened and labeled with why they were
    /// suggested.
    pub async fn network_feed(
        &self,
        viewer: &Viewer,
        sets: &InteractionSets,
        per_page: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<ScoredCandidate>> {
        let primary_items = self
            .store
            .items_by_authors(
                &viewer.primary_network,
                per_page * self.config.fetch.primary_overfetch,
            )
            .await?;
        let secondary_items = self
            .store
            .items_by_authors(
                &viewer.secondary_network,
                per_page * self.config.fetch.secondary_overfetch,
            )
            .await?;

        let primary_count = primary_items.len();
        let secondary_count = secondary_items.len();

        let mut rng = rand::thread_rng();
        let mut scored = Vec::with_capacity(primary_count + secondary_count);

        for item in primary_items {
            let (score, interaction) = self.scorer.score_network(&item, sets, false, now);
            scored.push(ScoredCandidate {
                item,
                score,
                feed_type: FeedType::Network,
                is_secondary_network: false,
                tie_break: rng.gen(),
                interaction,
                recommendation_reason: None,
                distance_km: None,
            });
        }

        for item in secondary_items {
            let (score, interaction) = self.scorer.score_network(&item, sets, true, now);
            let recommendation_reason = Some(
                self.secondary_reason(item.author_id, &viewer.primary_network)
                    .await?,
            );
            scored.push(ScoredCandidate {
                item,
                score,
                feed_type: FeedType::Network,
                is_secondary_network: true,
                tie_break: rng.gen(),
                interaction,
                recommendation_reason,
                distance_km: None,
            });
        }

        let ranked = sort_and_dedup(scored);

        info!(
            viewer = %viewer.id,
            primary_count,
            secondary_count,
            ranked_count = ranked.len(),
            "network feed assembled"
        );

        Ok(ranked)
    }

    /// "Followed by" style label for a suggested author, built from the
    /// viewer's primary network.
    async fn secondary_reason(
        &self,
        author_id: Uuid,
        primary_network: &HashSet<Uuid>,
    ) -> Result<RecommendationReason> {
        if primary_network.is_empty() {
            return Ok(reason("Suggested for you", None, "fa-user-plus"));
        }

        let names = self
            .store
            .mutual_followers(
                author_id,
                primary_network,
                self.config.fetch.mutual_follow_limit,
            )
            .await?;

        match names.as_slice() {
            [] => Ok(reason(
                "Suggested for you",
                Some("Based on your network"),
                "fa-lightbulb-o",
            )),
            [single] => Ok(reason(format!("@{single} follows"), None, "fa-user-check")),
            [first, second] => Ok(reason(
                format!("@{first} and @{second} follow"),
                None,
                "fa-users",
            )),
            [first, ..] => {
                let total = self
                    .store
                    .mutual_follower_count(author_id, primary_network)
                    .await?;
                let others = total.saturating_sub(1);
                Ok(reason(
                    format!("@{first} and {others} others follow"),
                    None,
                    "fa-users",
                ))
            }
        }
    }
}
