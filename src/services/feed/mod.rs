//! Feed orchestration: resolve the viewer, dispatch to an aggregator,
//! paginate.

pub mod store;

pub use store::{FeedStore, RegionFilter};

use crate::config::Config;
use crate::error::FeedError;
use crate::models::{FeedPage, FeedType, Viewer};
use crate::services::aggregation::FeedAggregator;
use crate::utils::paginate;
use anyhow::Result;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Entry point for one ranking pass.
///
/// Stateless across requests: every call re-resolves the viewer's graph
/// and interaction history from the store, ranks a fresh candidate set and
/// discards the working data with the response.
pub struct FeedService<S> {
    store: Arc<S>,
    aggregator: FeedAggregator<S>,
    config: Config,
}

impl<S: FeedStore> FeedService<S> {
    pub fn new(store: Arc<S>, config: Config) -> Self {
        let aggregator = FeedAggregator::new(Arc::clone(&store), config.clone());
        Self {
            store,
            aggregator,
            config,
        }
    }

    /// Rank and paginate one feed for one viewer.
    ///
    /// `page` is 1-based; out-of-range requests return the last valid
    /// page. `per_page` falls back to the configured default.
    pub async fn feed(
        &self,
        viewer_id: Uuid,
        feed_type: FeedType,
        page: usize,
        per_page: Option<usize>,
    ) -> Result<FeedPage, FeedError> {
        let per_page = per_page.unwrap_or(self.config.fetch.default_per_page);

        let profile = self
            .store
            .viewer_profile(viewer_id)
            .await?
            .ok_or(FeedError::ViewerNotFound(viewer_id))?;
        let sets = self.store.interaction_sets(viewer_id).await?;
        let primary_network = self.store.following(viewer_id).await?;
        // Only the network feed consumes the derived secondary network;
        // skip the extra follow lookups on global/local passes.
        let secondary_network = match feed_type {
            FeedType::Network => self.secondary_network(viewer_id, &primary_network).await?,
            FeedType::Global | FeedType::Local => HashSet::new(),
        };

        debug!(
            viewer = %viewer_id,
            feed_type = feed_type.as_str(),
            primary = primary_network.len(),
            secondary = secondary_network.len(),
            "viewer resolved"
        );

        let viewer = Viewer {
            id: viewer_id,
            profile,
            primary_network,
            secondary_network,
        };

        let now = Utc::now();
        let ranked = match feed_type {
            FeedType::Network => {
                self.aggregator
                    .network_feed(&viewer, &sets, per_page, now)
                    .await?
            }
            FeedType::Global => {
                self.aggregator
                    .global_feed(&viewer, &sets, per_page, now)
                    .await?
            }
            FeedType::Local => {
                self.aggregator
                    .local_feed(&viewer, &sets, per_page, now)
                    .await?
            }
        };

        Ok(paginate(ranked, page, per_page))
    }

    /// Friends-of-friends, excluding the viewer and the primary network.
    async fn secondary_network(
        &self,
        viewer_id: Uuid,
        primary_network: &HashSet<Uuid>,
    ) -> Result<HashSet<Uuid>> {
        if primary_network.is_empty() {
            return Ok(HashSet::new());
        }
        let mut secondary = self.store.followed_by_users(primary_network).await?;
        secondary.remove(&viewer_id);
        for id in primary_network {
            secondary.remove(id);
        }
        Ok(secondary)
    }
}
