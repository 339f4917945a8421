//! Bluesky XRPC request and response types.
//!
//! Only the fields the policy engine reads are modelled; everything else in
//! the lexicon objects is ignored during deserialization.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// com.atproto.server.createSession
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct CreateSessionRequest<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateSessionResponse {
    pub did: String,
    pub handle: String,
    pub access_jwt: String,
}

/// XRPC error envelope returned with non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct XrpcErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// app.bsky.graph.getFollowers / getFollows
// ---------------------------------------------------------------------------

/// Relationship between the authenticated account and a profile.
///
/// `following` holds the URI of our follow record for this profile;
/// `followed_by` the URI of theirs for us.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerState {
    #[serde(default)]
    pub following: Option<String>,
    #[serde(default)]
    pub followed_by: Option<String>,
}

/// A profile as it appears in follower and follows listings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub did: String,
    pub handle: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Absent when the server could not resolve the relationship.
    #[serde(default)]
    pub viewer: Option<ViewerState>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FollowersResponse {
    pub followers: Vec<ProfileView>,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FollowsResponse {
    pub follows: Vec<ProfileView>,
    #[serde(default)]
    pub cursor: Option<String>,
}

/// One page of a profile listing plus its continuation cursor.
#[derive(Debug, Clone, Default)]
pub struct ProfilePage {
    pub profiles: Vec<ProfileView>,
    /// `None` (or empty) on the last page.
    pub cursor: Option<String>,
}

impl From<FollowersResponse> for ProfilePage {
    fn from(r: FollowersResponse) -> Self {
        Self {
            profiles: r.followers,
            cursor: r.cursor,
        }
    }
}

impl From<FollowsResponse> for ProfilePage {
    fn from(r: FollowsResponse) -> Self {
        Self {
            profiles: r.follows,
            cursor: r.cursor,
        }
    }
}

// ---------------------------------------------------------------------------
// app.bsky.feed.getAuthorFeed
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct AuthorFeedResponse {
    pub feed: Vec<FeedItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedItem {
    pub post: FeedPost,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPost {
    pub uri: String,
    /// RFC 3339 timestamp at which the app view indexed the post. Kept as a
    /// string so a malformed value surfaces at classification time.
    #[serde(default)]
    pub indexed_at: Option<String>,
}

// ---------------------------------------------------------------------------
// app.bsky.actor.getProfile
// ---------------------------------------------------------------------------

/// Live follower/following counts for a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub follows_count: u64,
    #[serde(default)]
    pub posts_count: u64,
}

// ---------------------------------------------------------------------------
// com.atproto.repo.createRecord / deleteRecord
// ---------------------------------------------------------------------------

pub(crate) const FOLLOW_COLLECTION: &str = "app.bsky.graph.follow";

#[derive(Debug, Serialize)]
pub(crate) struct FollowRecord<'a> {
    #[serde(rename = "$type")]
    pub record_type: &'static str,
    pub subject: &'a str,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateRecordRequest<'a> {
    pub repo: &'a str,
    pub collection: &'static str,
    pub record: FollowRecord<'a>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateRecordResponse {
    pub uri: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteRecordRequest<'a> {
    pub repo: &'a str,
    pub collection: &'static str,
    pub rkey: &'a str,
}
