//! Storage collaborator contract.
//!
//! The ranking engine is storage-agnostic: callers supply an implementation
//! backed by their database (or an in-memory one in tests). All item
//! queries are recency-ordered and limited, so candidate sets stay bounded
//! by over-fetch multiples of the page size rather than corpus size.

use crate::models::{CandidateItem, InteractionSets, ViewerProfile};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use uuid::Uuid;

/// Case-insensitive author-location filter for the regional fallback
/// fetch. Fields combine with OR; an item matches when its author matches
/// any set field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionFilter {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl RegionFilter {
    pub fn from_profile(profile: &ViewerProfile) -> Self {
        Self {
            city: profile.city.clone(),
            state: profile.state.clone(),
            country: profile.country.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.state.is_none() && self.country.is_none()
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedStore: Send + Sync {
    /// Location/skill profile of a user, `None` when the user is unknown.
    async fn viewer_profile(&self, user_id: Uuid) -> Result<Option<ViewerProfile>>;

    /// Ids the given user follows directly.
    async fn following(&self, user_id: Uuid) -> Result<HashSet<Uuid>>;

    /// Union of follow targets across a set of users (for deriving the
    /// secondary network; the caller handles exclusions).
    async fn followed_by_users(&self, user_ids: &HashSet<Uuid>) -> Result<HashSet<Uuid>>;

    /// The user's viewed/reacted/commented item-id sets.
    async fn interaction_sets(&self, user_id: Uuid) -> Result<InteractionSets>;

    /// Most recent items authored by any of the given users.
    async fn items_by_authors(
        &self,
        author_ids: &HashSet<Uuid>,
        limit: usize,
    ) -> Result<Vec<CandidateItem>>;

    /// Most recent items from the whole corpus, excluding one author.
    async fn recent_items(&self, exclude_author: Uuid, limit: usize)
        -> Result<Vec<CandidateItem>>;

    /// Most recent items whose authors have coordinates on file.
    async fn located_items(
        &self,
        exclude_author: Uuid,
        limit: usize,
    ) -> Result<Vec<CandidateItem>>;

    /// Most recent items whose authors match the region filter, skipping
    /// already-fetched item ids.
    async fn regional_items(
        &self,
        filter: &RegionFilter,
        exclude_author: Uuid,
        exclude_items: &HashSet<Uuid>,
        limit: usize,
    ) -> Result<Vec<CandidateItem>>;

    /// Usernames from `within` who follow the given author, capped.
    async fn mutual_followers(
        &self,
        author_id: Uuid,
        within: &HashSet<Uuid>,
        limit: usize,
    ) -> Result<Vec<String>>;

    /// Total count behind `mutual_followers`, for "and N others follow".
    async fn mutual_follower_count(&self, author_id: Uuid, within: &HashSet<Uuid>)
        -> Result<usize>;
}
