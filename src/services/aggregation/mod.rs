//! Per-feed candidate assembly: fetch, score, sort, deduplicate.

pub mod global;
pub mod local;
pub mod network;

use crate::config::Config;
use crate::models::ScoredCandidate;
use crate::services::feed::FeedStore;
use crate::services::scoring::FeedScorer;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

/// Assembles the ranked candidate list for one feed type.
///
/// Everything it touches is request-local: candidates are fetched, scored
/// and ordered within a single pass, then dropped with the response.
pub struct FeedAggregator<S> {
    pub(crate) store: Arc<S>,
    pub(crate) scorer: FeedScorer,
    pub(crate) config: Config,
}

impl<S: FeedStore> FeedAggregator<S> {
    pub fn new(store: Arc<S>, config: Config) -> Self {
        let scorer = FeedScorer::new(config.scoring.clone());
        Self {
            store,
            scorer,
            config,
        }
    }
}

/// Total order over scored candidates: score descending, then the
/// per-candidate random tie-break ascending. Duplicate ids (the same item
/// fetched via more than one path) keep their first, highest-scoring
/// occurrence.
pub(crate) fn sort_and_dedup(mut scored: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(
                a.tie_break
                    .partial_cmp(&b.tie_break)
                    .unwrap_or(Ordering::Equal),
            )
    });

    let mut seen: HashSet<uuid::Uuid> = HashSet::with_capacity(scored.len());
    scored.retain(|candidate| seen.insert(candidate.item.id));
    scored
}
