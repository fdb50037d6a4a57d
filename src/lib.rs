//! Personalized feed ranking engine.
//!
//! Ranks user-authored logs for a viewer across three feeds: network
//! (direct follows plus friend-of-friend suggestions), global, and local
//! (proximity-tiered). A deterministic, explainable heuristic scorer blends
//! recency decay, capped engagement, social-graph distance, geographic
//! distance, skill affinity and per-viewer freshness penalties, then
//! paginates the ranked result with randomized tie-breaking.
//!
//! Storage is behind the [`FeedStore`] trait; this crate performs no I/O of
//! its own.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::FeedError;
pub use models::{
    CandidateItem, Coordinate, FeedPage, FeedType, InteractionKind, InteractionSets,
    RecommendationReason, ScoredCandidate, Viewer, ViewerProfile,
};
pub use services::feed::{FeedService, FeedStore, RegionFilter};
pub use services::scoring::FeedScorer;
