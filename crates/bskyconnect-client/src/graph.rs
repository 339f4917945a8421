//! The remote-service boundary consumed by the policy engine.

use crate::client::BlueskyClient;
use crate::error::ClientError;
use crate::types::{FeedItem, ProfilePage, ProfileStats};

/// The four reads and two mutations the policy engine needs from the
/// social network. [`BlueskyClient`] is the live implementation; tests
/// substitute an in-memory graph.
#[allow(async_fn_in_trait)]
pub trait SocialGraph {
    async fn followers_page(
        &self,
        actor: &str,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<ProfilePage, ClientError>;

    async fn follows_page(
        &self,
        actor: &str,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<ProfilePage, ClientError>;

    /// Newest-first author feed entries for `actor`.
    async fn author_feed(&self, actor: &str, limit: u32) -> Result<Vec<FeedItem>, ClientError>;

    async fn profile_stats(&self, actor: &str) -> Result<ProfileStats, ClientError>;

    /// Follows `subject_did`; returns the new follow record URI.
    async fn follow(&self, subject_did: &str) -> Result<String, ClientError>;

    /// Removes the follow record at `follow_uri`.
    async fn unfollow(&self, follow_uri: &str) -> Result<(), ClientError>;
}

impl SocialGraph for BlueskyClient {
    async fn followers_page(
        &self,
        actor: &str,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<ProfilePage, ClientError> {
        self.get_followers(actor, cursor, limit).await
    }

    async fn follows_page(
        &self,
        actor: &str,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<ProfilePage, ClientError> {
        self.get_follows(actor, cursor, limit).await
    }

    async fn author_feed(&self, actor: &str, limit: u32) -> Result<Vec<FeedItem>, ClientError> {
        self.get_author_feed(actor, limit).await
    }

    async fn profile_stats(&self, actor: &str) -> Result<ProfileStats, ClientError> {
        self.get_profile(actor).await
    }

    async fn follow(&self, subject_did: &str) -> Result<String, ClientError> {
        self.create_follow(subject_did).await
    }

    async fn unfollow(&self, follow_uri: &str) -> Result<(), ClientError> {
        self.delete_follow(follow_uri).await
    }
}
