use serde::Deserialize;
use std::env;

/// Top-level configuration for the ranking engine.
///
/// Everything is immutable after construction; a single instance is built at
/// startup and shared by reference across ranking passes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub fetch: FetchConfig,
    pub scoring: ScoringConfig,
}

/// Candidate fetch limits, expressed as over-fetch multiples of the page
/// size so scoring has room to reorder without scanning the whole corpus.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    pub default_per_page: usize,
    pub primary_overfetch: usize,
    pub secondary_overfetch: usize,
    pub global_overfetch: usize,
    pub nearby_overfetch: usize,
    pub regional_overfetch: usize,
    /// How many mutual-follow usernames to pull for recommendation labels.
    pub mutual_follow_limit: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            default_per_page: 7,
            primary_overfetch: 3,
            secondary_overfetch: 2,
            global_overfetch: 5,
            nearby_overfetch: 5,
            regional_overfetch: 3,
            mutual_follow_limit: 3,
        }
    }
}

/// Scoring constants.
///
/// The freshness penalties are deliberately aggressive: they push content
/// the viewer already engaged with below fresh content regardless of how
/// popular it is.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Viewer commented (or replied) on the item.
    pub penalty_commented: f64,
    /// Viewer reacted to the item.
    pub penalty_reacted: f64,
    /// Viewer has seen the item.
    pub penalty_viewed: f64,

    pub reaction_weight: f64,
    pub comment_weight: f64,
    pub view_weight: f64,
    /// Hard cap on the engagement contribution, so stale popular items
    /// cannot out-rank fresh ones.
    pub engagement_cap: f64,

    /// Scales the recency multiplier into the dominant network-feed term.
    pub recency_weight: f64,
    /// Applied to friend-of-friend items after everything else.
    pub secondary_network_dampener: f64,

    /// Recency is a secondary signal on the local feed.
    pub local_recency_dampener: f64,
    pub nearby_boost_km: f64,
    pub nearby_boost: f64,
    /// Radius multiplier when neither party has usable coordinates.
    pub unknown_distance_multiplier: f64,

    pub skill_bonus_per_shared: f64,
    pub skill_bonus_cap: f64,
    /// Additive skill/engagement terms on the local feed top out here.
    pub local_additive_cap: f64,
    pub local_engagement_divisor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            penalty_commented: 0.02,
            penalty_reacted: 0.05,
            penalty_viewed: 0.15,
            reaction_weight: 1.5,
            comment_weight: 2.0,
            view_weight: 0.1,
            engagement_cap: 10.0,
            recency_weight: 10.0,
            secondary_network_dampener: 0.7,
            local_recency_dampener: 0.3,
            nearby_boost_km: 25.0,
            nearby_boost: 2.0,
            unknown_distance_multiplier: 0.5,
            skill_bonus_per_shared: 0.2,
            skill_bonus_cap: 2.0,
            local_additive_cap: 0.5,
            local_engagement_divisor: 20.0,
        }
    }
}

impl Config {
    /// Build configuration from the environment, falling back to defaults.
    ///
    /// Only the operational fetch knobs are overridable; the scoring
    /// constants are product decisions and change with a deploy, not an
    /// env edit.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = FetchConfig::default();
        Config {
            fetch: FetchConfig {
                default_per_page: env::var("FEED_PAGE_SIZE")
                    .unwrap_or_else(|_| defaults.default_per_page.to_string())
                    .parse()
                    .expect("FEED_PAGE_SIZE must be a valid usize"),
                primary_overfetch: env::var("FEED_PRIMARY_OVERFETCH")
                    .unwrap_or_else(|_| defaults.primary_overfetch.to_string())
                    .parse()
                    .expect("FEED_PRIMARY_OVERFETCH must be a valid usize"),
                secondary_overfetch: env::var("FEED_SECONDARY_OVERFETCH")
                    .unwrap_or_else(|_| defaults.secondary_overfetch.to_string())
                    .parse()
                    .expect("FEED_SECONDARY_OVERFETCH must be a valid usize"),
                global_overfetch: env::var("FEED_GLOBAL_OVERFETCH")
                    .unwrap_or_else(|_| defaults.global_overfetch.to_string())
                    .parse()
                    .expect("FEED_GLOBAL_OVERFETCH must be a valid usize"),
                nearby_overfetch: env::var("FEED_NEARBY_OVERFETCH")
                    .unwrap_or_else(|_| defaults.nearby_overfetch.to_string())
                    .parse()
                    .expect("FEED_NEARBY_OVERFETCH must be a valid usize"),
                regional_overfetch: env::var("FEED_REGIONAL_OVERFETCH")
                    .unwrap_or_else(|_| defaults.regional_overfetch.to_string())
                    .parse()
                    .expect("FEED_REGIONAL_OVERFETCH must be a valid usize"),
                mutual_follow_limit: defaults.mutual_follow_limit,
            },
            scoring: ScoringConfig::default(),
        }
    }
}
