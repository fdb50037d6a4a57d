//! Skill-overlap affinity between viewer and item author.

use crate::config::ScoringConfig;
use std::collections::HashSet;
use uuid::Uuid;

pub fn shared_skill_count(a: &HashSet<Uuid>, b: &HashSet<Uuid>) -> usize {
    a.intersection(b).count()
}

/// Multiplicative skill bonus: 1.0 + 0.2 per shared skill, capped at 2.0.
/// Either side having no skills listed is neutral, not a penalty.
pub fn skill_match_multiplier(
    viewer_skills: &HashSet<Uuid>,
    author_skills: &HashSet<Uuid>,
    config: &ScoringConfig,
) -> f64 {
    if viewer_skills.is_empty() || author_skills.is_empty() {
        return 1.0;
    }
    let shared = shared_skill_count(viewer_skills, author_skills);
    let bonus = 1.0 + shared as f64 * config.skill_bonus_per_shared;
    bonus.min(config.skill_bonus_cap)
}

/// Additive form used by the local feed, range [0, 0.5]. Derived from the
/// multiplicative form so both stay consistent under the same cap.
pub fn skill_match_additive(
    viewer_skills: &HashSet<Uuid>,
    author_skills: &HashSet<Uuid>,
    config: &ScoringConfig,
) -> f64 {
    let additive = (skill_match_multiplier(viewer_skills, author_skills, config) - 1.0) * 0.5;
    additive.min(config.local_additive_cap)
}
