pub mod aggregation;
pub mod feed;
pub mod scoring;

pub use aggregation::FeedAggregator;
pub use feed::{FeedService, FeedStore};
pub use scoring::FeedScorer;
