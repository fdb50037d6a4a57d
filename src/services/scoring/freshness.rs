//! Freshness penalties for items the viewer has already interacted with.

use crate::config::ScoringConfig;
use crate::models::{InteractionKind, InteractionSets};
use uuid::Uuid;

/// Resolve the deepest interaction the viewer has had with an item and the
/// penalty it carries.
///
/// Priority is commented > reacted > viewed: a deeper interaction always
/// wins even when the item appears in several sets. No interaction means a
/// neutral 1.0 multiplier.
pub fn interaction_status(
    item_id: Uuid,
    sets: &InteractionSets,
    config: &ScoringConfig,
) -> (f64, Option<InteractionKind>) {
    if sets.commented.contains(&item_id) {
        (config.penalty_commented, Some(InteractionKind::Commented))
    } else if sets.reacted.contains(&item_id) {
        (config.penalty_reacted, Some(InteractionKind::Reacted))
    } else if sets.viewed.contains(&item_id) {
        (config.penalty_viewed, Some(InteractionKind::Viewed))
    } else {
        (1.0, None)
    }
}
