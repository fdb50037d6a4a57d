pub mod decay;
pub mod engagement;
pub mod freshness;
pub mod geo;
pub mod skill;

use crate::config::ScoringConfig;
use crate::models::{CandidateItem, InteractionKind, InteractionSets};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

pub use decay::DecayTable;
pub use geo::haversine_distance;

/// Scoring functions for all three feeds.
///
/// Holds the immutable decay tables and constants for one deployment;
/// scoring never mutates the candidate it is handed. `now` is captured once
/// per ranking pass so every candidate in a pass ages consistently.
pub struct FeedScorer {
    config: ScoringConfig,
    recency: DecayTable,
    radius: DecayTable,
}

impl FeedScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            recency: DecayTable::recency(),
            radius: DecayTable::radius(),
        }
    }

    fn age_seconds(item: &CandidateItem, now: DateTime<Utc>) -> f64 {
        (now - item.created_at).num_seconds().max(0) as f64
    }

    /// Recency-first formula for the network and global feeds.
    ///
    /// Recency dominates (0-100 range) so fresh unseen items always rank
    /// above old popular ones; capped engagement (0-10) only reorders items
    /// of similar age. Items the viewer already interacted with are
    /// penalized on both terms, which drops them out of the top of the feed.
    pub fn score_network(
        &self,
        item: &CandidateItem,
        sets: &InteractionSets,
        is_secondary: bool,
        now: DateTime<Utc>,
    ) -> (f64, Option<InteractionKind>) {
        let recency = self.recency.multiplier_for(Self::age_seconds(item, now));
        let (penalty, interaction) = freshness::interaction_status(item.id, sets, &self.config);

        let mut recency_score = recency * self.config.recency_weight;
        if interaction.is_some() {
            recency_score *= penalty;
        }

        let engagement_bonus = engagement::engagement_score(item, &self.config) * penalty;

        let mut score = recency_score + engagement_bonus;
        if is_secondary {
            score *= self.config.secondary_network_dampener;
        }

        debug!(
            item_id = %item.id,
            author = %item.author_id,
            score,
            is_secondary,
            "network score computed"
        );

        (score, interaction)
    }

    /// Radius-first formula for the local feed.
    ///
    /// The radius multiplier (100x down to 1x) creates hard distance tiers;
    /// dampened recency, skill overlap and engagement only perturb ordering
    /// within a tier. An unknown distance falls below every known tier.
    pub fn score_local(
        &self,
        item: &CandidateItem,
        viewer_skills: &HashSet<Uuid>,
        distance_km: Option<f64>,
        sets: &InteractionSets,
        now: DateTime<Utc>,
    ) -> (f64, Option<InteractionKind>) {
        let radius = match distance_km {
            Some(d) => self.radius.multiplier_for(d),
            None => self.config.unknown_distance_multiplier,
        };

        let mut dampened_recency = self.recency.multiplier_for(Self::age_seconds(item, now))
            * self.config.local_recency_dampener;
        if matches!(distance_km, Some(d) if d <= self.config.nearby_boost_km) {
            dampened_recency *= self.config.nearby_boost;
        }

        let skill_additive =
            skill::skill_match_additive(viewer_skills, &item.author_skills, &self.config);
        let engagement_additive = (engagement::engagement_score(item, &self.config)
            / self.config.local_engagement_divisor)
            .min(self.config.local_additive_cap);

        let secondary_factors = 1.0 + dampened_recency + skill_additive + engagement_additive;

        let (penalty, interaction) = freshness::interaction_status(item.id, sets, &self.config);
        let score = radius * secondary_factors * penalty;

        debug!(
            item_id = %item.id,
            author = %item.author_id,
            score,
            distance_km = ?distance_km,
            "local score computed"
        );

        (score, interaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn item_aged(minutes: i64, reactions: u64, comments: u64, views: u64) -> CandidateItem {
        CandidateItem {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            author_username: "dev".to_string(),
            created_at: Utc::now() - Duration::minutes(minutes),
            reaction_count: reactions,
            comment_count: comments,
            view_count: views,
            author_coordinate: None,
            author_city: None,
            author_state: None,
            author_country: None,
            author_skills: HashSet::new(),
        }
    }

    fn scorer() -> FeedScorer {
        FeedScorer::new(ScoringConfig::default())
    }

    #[test]
    fn fresh_untouched_item_scores_one_hundred() {
        let scorer = scorer();
        let item = item_aged(30, 0, 0, 0);
        let (score, interaction) =
            scorer.score_network(&item, &InteractionSets::default(), false, Utc::now());
        assert!((score - 100.0).abs() < 1e-9);
        assert_eq!(interaction, None);
    }

    #[test]
    fn commented_item_is_double_penalized() {
        let scorer = scorer();
        let item = item_aged(30, 0, 0, 0);
        let mut sets = InteractionSets::default();
        sets.commented.insert(item.id);

        let (score, interaction) = scorer.score_network(&item, &sets, false, Utc::now());
        assert!((score - 2.0).abs() < 1e-9);
        assert_eq!(interaction, Some(InteractionKind::Commented));
    }

    #[test]
    fn secondary_network_dampens_final_score() {
        let scorer = scorer();
        let item = item_aged(30, 0, 0, 0);
        let (score, _) =
            scorer.score_network(&item, &InteractionSets::default(), true, Utc::now());
        assert!((score - 70.0).abs() < 1e-9);
    }

    #[test]
    fn engagement_breaks_ties_between_similar_age_items() {
        let scorer = scorer();
        let now = Utc::now();
        let quiet = item_aged(30, 0, 0, 0);
        let busy = item_aged(30, 4, 2, 0);

        let (quiet_score, _) = scorer.score_network(&quiet, &InteractionSets::default(), false, now);
        let (busy_score, _) = scorer.score_network(&busy, &InteractionSets::default(), false, now);
        assert!(busy_score > quiet_score);
        // 100 + (4*1.5 + 2*2.0) = 110
        assert!((busy_score - 110.0).abs() < 1e-9);
    }

    #[test]
    fn fresh_unseen_beats_old_viral() {
        let scorer = scorer();
        let now = Utc::now();
        let fresh = item_aged(30, 0, 0, 0);
        let viral = item_aged(60 * 24 * 10, 5000, 900, 100_000);

        let (fresh_score, _) = scorer.score_network(&fresh, &InteractionSets::default(), false, now);
        let (viral_score, _) = scorer.score_network(&viral, &InteractionSets::default(), false, now);
        assert!(fresh_score > viral_score);
    }

    #[test]
    fn local_nearby_fresh_item_scores_seven_hundred() {
        let scorer = scorer();
        let item = item_aged(30, 0, 0, 0);
        let (score, _) = scorer.score_local(
            &item,
            &HashSet::new(),
            Some(3.0),
            &InteractionSets::default(),
            Utc::now(),
        );
        // radius 100, dampened recency 10*0.3*2 = 6, factors 7, penalty 1
        assert!((score - 700.0).abs() < 1e-9);
    }

    #[test]
    fn local_unknown_distance_uses_half_multiplier() {
        let scorer = scorer();
        let item = item_aged(30, 0, 0, 0);
        let (score, _) = scorer.score_local(
            &item,
            &HashSet::new(),
            None,
            &InteractionSets::default(),
            Utc::now(),
        );
        // radius 0.5, dampened recency 3.0 (no nearby boost), factors 4.0
        assert!((score - 2.0).abs() < 1e-9);
    }

    #[test]
    fn local_close_tier_dominates_far_tier() {
        let scorer = scorer();
        let now = Utc::now();
        let sets = InteractionSets::default();
        // Old quiet item 4 km away vs fresh viral item 60 km away.
        let close_old = item_aged(60 * 24 * 5, 0, 0, 0);
        let far_fresh = item_aged(10, 1000, 1000, 1000);

        let (close_score, _) =
            scorer.score_local(&close_old, &HashSet::new(), Some(4.0), &sets, now);
        let (far_score, _) =
            scorer.score_local(&far_fresh, &HashSet::new(), Some(60.0), &sets, now);
        assert!(close_score > far_score);
    }

    #[test]
    fn local_scoring_is_idempotent() {
        let scorer = scorer();
        let now = Utc::now();
        let item = item_aged(90, 3, 1, 40);
        let skills: HashSet<Uuid> = item.author_skills.clone();
        let mut sets = InteractionSets::default();
        sets.viewed.insert(item.id);

        let (first, _) = scorer.score_local(&item, &skills, Some(17.5), &sets, now);
        let (second, _) = scorer.score_local(&item, &skills, Some(17.5), &sets, now);
        assert_eq!(first, second);
    }

    #[test]
    fn scores_are_non_negative() {
        let scorer = scorer();
        let now = Utc::now();
        let mut sets = InteractionSets::default();
        let item = item_aged(60 * 24 * 30, 0, 0, 0);
        sets.commented.insert(item.id);

        let (network, _) = scorer.score_network(&item, &sets, true, now);
        let (local, _) = scorer.score_local(&item, &HashSet::new(), None, &sets, now);
        assert!(network >= 0.0);
        assert!(local >= 0.0);
    }
}
