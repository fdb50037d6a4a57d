use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Which feed a ranking pass is assembling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    Network,
    Global,
    Local,
}

impl FeedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedType::Network => "network",
            FeedType::Global => "global",
            FeedType::Local => "local",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// A log fetched from storage, read-only for the duration of a ranking pass.
///
/// Counts are distinct aggregates computed by the storage layer. Location
/// fields are whatever the author currently has on file; absent values mean
/// "no location data" and select the fallback paths in the local feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateItem {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
    pub reaction_count: u64,
    pub comment_count: u64,
    pub view_count: u64,
    pub author_coordinate: Option<Coordinate>,
    pub author_city: Option<String>,
    pub author_state: Option<String>,
    pub author_country: Option<String>,
    /// Empty set when the author has not listed any skills.
    pub author_skills: HashSet<Uuid>,
}

/// Location and skill profile of the viewing user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewerProfile {
    pub coordinate: Option<Coordinate>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub skills: HashSet<Uuid>,
}

/// The viewing user plus their resolved social graph, assembled per request.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub id: Uuid,
    pub profile: ViewerProfile,
    /// Users the viewer follows directly.
    pub primary_network: HashSet<Uuid>,
    /// Followed-by-followed, excluding the viewer and the primary network.
    pub secondary_network: HashSet<Uuid>,
}

/// Per-viewer sets of previously interacted item ids.
///
/// `commented` includes replies. An item may appear in several sets; penalty
/// resolution picks the deepest interaction.
#[derive(Debug, Clone, Default)]
pub struct InteractionSets {
    pub viewed: HashSet<Uuid>,
    pub reacted: HashSet<Uuid>,
    pub commented: HashSet<Uuid>,
}

/// The deepest interaction the viewer has had with an item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Commented,
    Reacted,
    Viewed,
}

/// Structured label explaining why a suggested item appears in the feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationReason {
    pub text: String,
    pub subtext: Option<String>,
    pub icon: String,
}

/// A candidate augmented with everything one ranking pass computed for it.
///
/// The fetched item is embedded untouched; score, feed tag, tie-break and
/// display metadata live here so concurrent passes never alias.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub item: CandidateItem,
    pub score: f64,
    pub feed_type: FeedType,
    pub is_secondary_network: bool,
    #[serde(skip)]
    pub tie_break: f64,
    pub interaction: Option<InteractionKind>,
    pub recommendation_reason: Option<RecommendationReason>,
    /// Haversine or estimated distance, local feed only.
    pub distance_km: Option<f64>,
}

/// One page of a ranked feed.
#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
    pub items: Vec<ScoredCandidate>,
    /// 1-based, clamped to the valid range.
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_type_as_str() {
        assert_eq!(FeedType::Network.as_str(), "network");
        assert_eq!(FeedType::Global.as_str(), "global");
        assert_eq!(FeedType::Local.as_str(), "local");
    }

    #[test]
    fn recommendation_reason_serializes_for_presentation() {
        let reason = RecommendationReason {
            text: "Near you".to_string(),
            subtext: Some("3.2 km away".to_string()),
            icon: "fa-map-marker".to_string(),
        };
        let json = serde_json::to_value(&reason).unwrap();
        assert_eq!(json["text"], "Near you");
        assert_eq!(json["subtext"], "3.2 km away");
        assert_eq!(json["icon"], "fa-map-marker");
    }
}
