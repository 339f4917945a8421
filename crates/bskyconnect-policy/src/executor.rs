//! Performs follow and unfollow mutations with fixed pacing and a running
//! action count.

use std::time::Duration;

use bskyconnect_client::{ProfileView, SocialGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Done,
    /// The mutation failed or could not be attempted; already logged.
    Failed,
}

/// Running totals for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub followed: u32,
    pub unfollowed: u32,
    pub failed: u32,
}

/// Issues mutations against a [`SocialGraph`] for a single run.
///
/// Every remote mutation attempt, successful or not, counts toward the
/// optional `limit`. Failures are logged and swallowed.
pub struct ActionExecutor<'g, G> {
    graph: &'g G,
    delay: Duration,
    limit: Option<u32>,
    count: u32,
    tally: Tally,
}

impl<'g, G: SocialGraph> ActionExecutor<'g, G> {
    #[must_use]
    pub fn new(graph: &'g G, delay: Duration, limit: Option<u32>) -> Self {
        Self {
            graph,
            delay,
            limit,
            count: 0,
            tally: Tally::default(),
        }
    }

    /// Mutations attempted so far.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[must_use]
    pub fn tally(&self) -> Tally {
        self.tally
    }

    #[must_use]
    pub fn limit_reached(&self) -> bool {
        self.limit.is_some_and(|limit| self.count >= limit)
    }

    pub async fn follow(&mut self, profile: &ProfileView) -> ActionOutcome {
        self.count += 1;
        match self.graph.follow(&profile.did).await {
            Ok(_) => {
                tokio::time::sleep(self.delay).await;
                self.tally.followed += 1;
                tracing::info!(event = "FOLLOWED", handle = %profile.handle, "followed account");
                ActionOutcome::Done
            }
            Err(e) => {
                self.tally.failed += 1;
                tracing::error!(
                    event = "FAILED",
                    handle = %profile.handle,
                    error = %e,
                    "failed to follow account"
                );
                ActionOutcome::Failed
            }
        }
    }

    /// Removes our follow of `profile` using its `viewer.following` record.
    /// A profile without that record is logged as a failure and not sent.
    pub async fn unfollow(&mut self, profile: &ProfileView) -> ActionOutcome {
        let Some(follow_uri) = profile
            .viewer
            .as_ref()
            .and_then(|v| v.following.as_deref())
        else {
            self.tally.failed += 1;
            tracing::error!(
                event = "FAILED",
                handle = %profile.handle,
                "failed to unfollow account: no follow record to delete"
            );
            return ActionOutcome::Failed;
        };

        self.count += 1;
        match self.graph.unfollow(follow_uri).await {
            Ok(()) => {
                tokio::time::sleep(self.delay).await;
                self.tally.unfollowed += 1;
                tracing::info!(event = "UNFOLLOWED", handle = %profile.handle, "unfollowed account");
                ActionOutcome::Done
            }
            Err(e) => {
                self.tally.failed += 1;
                tracing::error!(
                    event = "FAILED",
                    handle = %profile.handle,
                    error = %e,
                    "failed to unfollow account"
                );
                ActionOutcome::Failed
            }
        }
    }
}
