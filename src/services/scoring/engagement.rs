//! Capped engagement score from an item's aggregate counters.

use crate::config::ScoringConfig;
use crate::models::CandidateItem;

/// Weighted engagement, hard-capped so old viral items cannot permanently
/// out-rank fresh or nearby content.
pub fn engagement_score(item: &CandidateItem, config: &ScoringConfig) -> f64 {
    let raw = item.reaction_count as f64 * config.reaction_weight
        + item.comment_count as f64 * config.comment_weight
        + item.view_count as f64 * config.view_weight;
    raw.min(config.engagement_cap)
}
