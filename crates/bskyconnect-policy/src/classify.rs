//! Per-profile classifiers: follow state, reciprocity, posting recency, and
//! influencer status.
//!
//! The remote-backed classifiers never fail. A read error is logged and the
//! classifier returns the default that leaves the relationship untouched.

use bskyconnect_client::{FeedItem, ProfileStats, ProfileView, SocialGraph};
use bskyconnect_core::PolicyConfig;
use chrono::{DateTime, TimeDelta, Utc};

/// Number of author-feed entries requested per recency check.
pub const FEED_SAMPLE_SIZE: u32 = 10;

/// Feed position consulted for the recency check. The entry at index 0 is
/// skipped; it may be a pinned post or a repost.
const RECENCY_FEED_INDEX: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// Posted within the recency window.
    Current,
    Old,
    /// Never posted, or too few posts to judge.
    BotSuspect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Influence {
    Influencer,
    Regular,
    /// Zero followers or zero follows.
    BotSuspect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfluenceThresholds {
    /// Minimum followers/follows ratio.
    pub ratio: f64,
    /// Follower count that must be exceeded.
    pub min_followers: u64,
}

impl Default for InfluenceThresholds {
    fn default() -> Self {
        Self::from(&PolicyConfig::default())
    }
}

impl From<&PolicyConfig> for InfluenceThresholds {
    fn from(policy: &PolicyConfig) -> Self {
        Self {
            ratio: policy.influencer_ratio,
            min_followers: policy.influencer_min_followers,
        }
    }
}

/// Whether we currently follow `profile`.
///
/// A profile without relationship data counts as followed, so it is never
/// followed a second time.
#[must_use]
pub fn is_following(profile: &ProfileView) -> bool {
    if let Some(viewer) = &profile.viewer {
        return viewer.following.is_some();
    }
    tracing::warn!(
        event = "FAILED",
        handle = %profile.handle,
        "follow status unreadable; treating as followed"
    );
    true
}

/// Whether `profile` follows us back.
///
/// A profile without relationship data counts as following back.
#[must_use]
pub fn is_followed_back(profile: &ProfileView) -> bool {
    if let Some(viewer) = &profile.viewer {
        return viewer.followed_by.is_some();
    }
    tracing::warn!(
        event = "FAILED",
        handle = %profile.handle,
        "reciprocal follow status unreadable; treating as followed back"
    );
    true
}

/// Classifies how recently `profile` posted relative to a `window_days` window.
///
/// A feed that cannot be fetched yields [`Activity::Current`].
pub async fn activity_status<G: SocialGraph>(
    graph: &G,
    profile: &ProfileView,
    window_days: u32,
) -> Activity {
    let feed = match graph.author_feed(&profile.did, FEED_SAMPLE_SIZE).await {
        Ok(feed) => feed,
        Err(e) => {
            tracing::warn!(
                event = "FAILED",
                handle = %profile.handle,
                error = %e,
                "could not scan feed; skipping last post check"
            );
            return Activity::Current;
        }
    };

    let cutoff = Utc::now() - TimeDelta::days(i64::from(window_days));
    let activity = classify_feed(&feed, cutoff);
    if activity == Activity::BotSuspect {
        if feed.is_empty() {
            tracing::info!(event = "BOTALERT", handle = %profile.handle, "account has never posted");
        } else {
            tracing::info!(
                event = "BOTALERT",
                handle = %profile.handle,
                posts = feed.len(),
                "account has too few readable posts"
            );
        }
    }
    activity
}

/// Classifies a newest-first feed against `cutoff`.
///
/// The second entry decides: strictly newer than `cutoff` is current,
/// anything else old. A feed without a readable second entry is a bot
/// suspect.
#[must_use]
pub fn classify_feed(feed: &[FeedItem], cutoff: DateTime<Utc>) -> Activity {
    let Some(indexed_at) = feed
        .get(RECENCY_FEED_INDEX)
        .and_then(|item| item.post.indexed_at.as_deref())
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
    else {
        return Activity::BotSuspect;
    };

    if indexed_at.with_timezone(&Utc) > cutoff {
        Activity::Current
    } else {
        Activity::Old
    }
}

/// Classifies `profile` by its live follower/follows counts.
///
/// A profile whose statistics cannot be fetched yields
/// [`Influence::Influencer`], which shields it from unfollow.
pub async fn influence_status<G: SocialGraph>(
    graph: &G,
    profile: &ProfileView,
    thresholds: InfluenceThresholds,
) -> Influence {
    let stats = match graph.profile_stats(&profile.did).await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::warn!(
                event = "FAILED",
                handle = %profile.handle,
                error = %e,
                "could not fetch profile statistics; preserving connection"
            );
            return Influence::Influencer;
        }
    };

    let influence = classify_counts(stats, thresholds);
    match influence {
        Influence::BotSuspect => tracing::info!(
            event = "BOTALERT",
            handle = %profile.handle,
            "account has no follows or followers; probable bot"
        ),
        Influence::Influencer => tracing::info!(
            event = "INFLUENCER",
            handle = %profile.handle,
            followers = stats.followers_count,
            follows = stats.follows_count,
            "account is an influencer"
        ),
        Influence::Regular => {
            tracing::debug!(handle = %profile.handle, "account is not an influencer");
        }
    }
    influence
}

#[must_use]
pub fn classify_counts(stats: ProfileStats, thresholds: InfluenceThresholds) -> Influence {
    let followers = stats.followers_count;
    let follows = stats.follows_count;
    if followers == 0 || follows == 0 {
        return Influence::BotSuspect;
    }

    #[allow(clippy::cast_precision_loss)]
    let ratio = followers as f64 / follows as f64;
    if ratio >= thresholds.ratio && followers > thresholds.min_followers {
        Influence::Influencer
    } else {
        Influence::Regular
    }
}
