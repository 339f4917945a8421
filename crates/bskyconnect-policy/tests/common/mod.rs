//! In-memory `SocialGraph` used by the policy integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use bskyconnect_client::{
    ClientError, FeedItem, FeedPost, ProfilePage, ProfileStats, ProfileView, SocialGraph,
    ViewerState,
};
use chrono::{SecondsFormat, TimeDelta, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Follow(String),
    Unfollow(String),
}

#[derive(Default)]
pub struct FakeGraph {
    /// Listing pages keyed by the cursor that requests them.
    pub follower_pages: HashMap<Option<String>, ProfilePage>,
    pub follows_pages: HashMap<Option<String>, ProfilePage>,
    /// Author feeds by DID. A DID with no entry fails the fetch.
    pub feeds: HashMap<String, Vec<FeedItem>>,
    /// Profile statistics by DID. A DID with no entry fails the fetch.
    pub stats: HashMap<String, ProfileStats>,
    /// DIDs whose follow request fails.
    pub failing_follows: HashSet<String>,
    pub mutations: Mutex<Vec<Mutation>>,
    pub page_requests: Mutex<Vec<(Option<String>, u32)>>,
}

fn server_error(what: &str) -> ClientError {
    ClientError::Api {
        status: 500,
        error: "InternalServerError".to_owned(),
        message: format!("{what} unavailable"),
    }
}

impl FakeGraph {
    pub fn mutations(&self) -> Vec<Mutation> {
        self.mutations.lock().unwrap().clone()
    }

    pub fn page_requests(&self) -> Vec<(Option<String>, u32)> {
        self.page_requests.lock().unwrap().clone()
    }

    pub fn posted_recently(&mut self, profile: &ProfileView) {
        self.feeds
            .insert(profile.did.clone(), feed_with_posts_days_ago(&[0, 1, 3]));
    }

    pub fn posted_long_ago(&mut self, profile: &ProfileView) {
        self.feeds
            .insert(profile.did.clone(), feed_with_posts_days_ago(&[0, 60, 90]));
    }

    pub fn never_posted(&mut self, profile: &ProfileView) {
        self.feeds.insert(profile.did.clone(), Vec::new());
    }

    pub fn with_counts(&mut self, profile: &ProfileView, followers: u64, follows: u64) {
        self.stats.insert(
            profile.did.clone(),
            ProfileStats {
                followers_count: followers,
                follows_count: follows,
                posts_count: 10,
            },
        );
    }

    fn page(
        pages: &HashMap<Option<String>, ProfilePage>,
        cursor: Option<&str>,
    ) -> Result<ProfilePage, ClientError> {
        pages
            .get(&cursor.map(str::to_owned))
            .cloned()
            .ok_or_else(|| server_error("listing page"))
    }
}

impl SocialGraph for FakeGraph {
    async fn followers_page(
        &self,
        _actor: &str,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<ProfilePage, ClientError> {
        self.page_requests
            .lock()
            .unwrap()
            .push((cursor.map(str::to_owned), limit));
        Self::page(&self.follower_pages, cursor)
    }

    async fn follows_page(
        &self,
        _actor: &str,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<ProfilePage, ClientError> {
        self.page_requests
            .lock()
            .unwrap()
            .push((cursor.map(str::to_owned), limit));
        Self::page(&self.follows_pages, cursor)
    }

    async fn author_feed(&self, actor: &str, _limit: u32) -> Result<Vec<FeedItem>, ClientError> {
        self.feeds
            .get(actor)
            .cloned()
            .ok_or_else(|| server_error("feed"))
    }

    async fn profile_stats(&self, actor: &str) -> Result<ProfileStats, ClientError> {
        self.stats
            .get(actor)
            .copied()
            .ok_or_else(|| server_error("profile"))
    }

    async fn follow(&self, subject_did: &str) -> Result<String, ClientError> {
        self.mutations
            .lock()
            .unwrap()
            .push(Mutation::Follow(subject_did.to_owned()));
        if self.failing_follows.contains(subject_did) {
            return Err(server_error("createRecord"));
        }
        Ok(format!("at://did:plc:me/app.bsky.graph.follow/{subject_did}"))
    }

    async fn unfollow(&self, follow_uri: &str) -> Result<(), ClientError> {
        self.mutations
            .lock()
            .unwrap()
            .push(Mutation::Unfollow(follow_uri.to_owned()));
        Ok(())
    }
}

/// Builds a profile named `name`; `following` and `followed_back` set the
/// viewer relationship.
pub fn profile(name: &str, following: bool, followed_back: bool) -> ProfileView {
    ProfileView {
        did: format!("did:plc:{name}"),
        handle: format!("{name}.bsky.social"),
        display_name: None,
        viewer: Some(ViewerState {
            following: following.then(|| follow_uri(name)),
            followed_by: followed_back.then(|| format!("at://did:plc:{name}/app.bsky.graph.follow/me")),
        }),
    }
}

pub fn follow_uri(name: &str) -> String {
    format!("at://did:plc:me/app.bsky.graph.follow/{name}")
}

pub fn did(name: &str) -> String {
    format!("did:plc:{name}")
}

/// A newest-first feed with one post per entry of `days_ago`.
pub fn feed_with_posts_days_ago(days_ago: &[i64]) -> Vec<FeedItem> {
    let now = Utc::now();
    days_ago
        .iter()
        .enumerate()
        .map(|(i, days)| FeedItem {
            post: FeedPost {
                uri: format!("at://did:plc:x/app.bsky.feed.post/{i}"),
                indexed_at: Some(
                    (now - TimeDelta::days(*days)).to_rfc3339_opts(SecondsFormat::Millis, true),
                ),
            },
        })
        .collect()
}

/// Splits `profiles` into pages of `size`, chaining them with cursors
/// `c1`, `c2`, ... and leaving the last page without one.
pub fn paginate(profiles: &[ProfileView], size: usize) -> HashMap<Option<String>, ProfilePage> {
    let chunks: Vec<&[ProfileView]> = profiles.chunks(size).collect();
    let mut pages = HashMap::new();
    if chunks.is_empty() {
        pages.insert(None, ProfilePage::default());
        return pages;
    }
    for (i, chunk) in chunks.iter().enumerate() {
        let key = (i > 0).then(|| format!("c{i}"));
        let cursor = (i + 1 < chunks.len()).then(|| format!("c{}", i + 1));
        pages.insert(
            key,
            ProfilePage {
                profiles: chunk.to_vec(),
                cursor,
            },
        );
    }
    pages
}
